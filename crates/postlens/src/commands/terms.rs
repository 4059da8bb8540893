use super::{analyze, emit};
use crate::cli::IoArgs;
use postlens_core::temporal::TermCount;
use postlens_salience::CorpusStats;

fn counts_section(title: &str, counts: &[TermCount]) -> String {
    let rows: Vec<String> = counts
        .iter()
        .map(|c| format!("  {}\t{}", c.term, c.count))
        .collect();
    format!("\n{}\n{}\n{}", title, "-".repeat(title.len()), rows.join("\n"))
}

fn build_terms_report(stats: &CorpusStats) -> String {
    if stats.total_posts == 0 && stats.top_hashtags.is_empty() && stats.top_mentions.is_empty() {
        return "No posts to analyze.\n".to_string();
    }

    let mut sections = Vec::new();

    let terms: Vec<String> = stats
        .top_terms
        .iter()
        .map(|t| format!("  {}\t{:.4}", t.term, t.weight))
        .collect();
    sections.push(format!(
        "Salient Terms\n=============\n\
         Posts: {} | Avg length: {:.1} chars | Avg words: {:.1}\n{}",
        stats.total_posts,
        stats.avg_length,
        stats.avg_words,
        terms.join("\n")
    ));

    if !stats.top_words.is_empty() {
        sections.push(counts_section("Frequent Words", &stats.top_words));
    }
    if !stats.top_hashtags.is_empty() {
        sections.push(counts_section("Hashtags", &stats.top_hashtags));
    }
    if !stats.top_mentions.is_empty() {
        sections.push(counts_section("Mentions", &stats.top_mentions));
    }

    let mut report = sections.join("\n");
    report.push('\n');
    report
}

pub fn run(io: &IoArgs, top: Option<usize>) -> anyhow::Result<()> {
    let mut analysis = analyze(io)?;
    if let Some(n) = top {
        analysis.config.top_terms = n;
    }
    emit(io.output.as_deref(), &build_terms_report(&analysis.stats()))
}
