use super::{analyze, emit};
use crate::cli::{IoArgs, TableFormat};
use postlens_core::{Period, TemporalBucket};

fn render(buckets: &[TemporalBucket], format: TableFormat) -> anyhow::Result<String> {
    match format {
        TableFormat::Csv => postlens_io::buckets_csv(buckets),
        TableFormat::Json => {
            let mut out = serde_json::to_string_pretty(buckets)?;
            out.push('\n');
            Ok(out)
        }
    }
}

pub fn run(
    io: &IoArgs,
    period: Option<&str>,
    dense: bool,
    format: TableFormat,
) -> anyhow::Result<()> {
    // parse before loading so a bad period fails fast
    let period = period.map(str::parse::<Period>).transpose()?;

    let analysis = analyze(io)?;
    let period = period.unwrap_or(analysis.config.period);
    let buckets = analysis.buckets(period, dense || analysis.config.zero_fill);
    tracing::info!(%period, buckets = buckets.len(), "aggregated activity");

    emit(io.output.as_deref(), &render(&buckets, format)?)
}
