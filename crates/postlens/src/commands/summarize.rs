use super::{analyze, emit};
use crate::cli::IoArgs;
use postlens_salience::CorpusSummary;

fn build_summary_text(summary: &CorpusSummary) -> String {
    if summary.is_empty() {
        return "No posts to summarize.\n".to_string();
    }
    summary
        .entries
        .iter()
        .enumerate()
        .map(|(rank, entry)| format!("{}. [{:.3}] {}\n", rank + 1, entry.score, entry.text))
        .collect()
}

pub fn run(io: &IoArgs, num_results: Option<usize>) -> anyhow::Result<()> {
    let analysis = analyze(io)?;
    let n = num_results.unwrap_or(analysis.config.num_results);
    let summary = analysis.summary(n);
    emit(io.output.as_deref(), &build_summary_text(&summary))
}
