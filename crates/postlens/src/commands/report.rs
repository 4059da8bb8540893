use super::analyze;
use crate::cli::IoArgs;
use postlens_salience::Report;

fn log_diagnostics(report: &Report) {
    let d = &report.diagnostics;
    tracing::info!(
        records = d.raw_records,
        missing_text = d.missing_text,
        missing_timestamp = d.missing_timestamp,
        bad_timestamp = d.bad_timestamp,
        below_min_length = d.below_min_length,
        qualifying = d.qualifying,
        "report diagnostics"
    );
    if d.qualifying == 0 {
        tracing::warn!("no qualifying posts, report is empty");
    }
}

pub fn run(io: &IoArgs) -> anyhow::Result<()> {
    let analysis = analyze(io)?;
    let report = analysis.report();
    log_diagnostics(&report);

    match io.output.as_deref() {
        Some(path) => {
            postlens_io::write_json_pretty(path, &report)?;
            tracing::info!(path = %path.display(), "wrote report");
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
