use super::{analyze, emit};
use crate::cli::{IoArgs, TableFormat};
use postlens_core::FeatureRecord;

/// CSV with a header row, or one JSON object per line
fn render(records: &[FeatureRecord], format: TableFormat) -> anyhow::Result<String> {
    match format {
        TableFormat::Csv => postlens_io::features_csv(records),
        TableFormat::Json => Ok(postlens_io::to_jsonl(records)?),
    }
}

pub fn run(io: &IoArgs, format: TableFormat) -> anyhow::Result<()> {
    let analysis = analyze(io)?;
    let d = &analysis.diagnostics;
    tracing::info!(
        qualifying = d.qualifying,
        below_min_length = d.below_min_length,
        malformed = d.malformed(),
        "built feature table"
    );
    emit(io.output.as_deref(), &render(&analysis.table.records, format)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use postlens_core::{extract, Post};

    fn records() -> Vec<FeatureRecord> {
        let at = Utc.with_ymd_and_hms(2024, 5, 4, 21, 15, 0).unwrap();
        vec![
            extract(&Post::new("1", at, "@friend see you at the meetup tonight!")),
            extract(&Post::new("2", at, "Plain text")),
        ]
    }

    #[test]
    fn test_render_csv() {
        let csv = render(&records(), TableFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,created_at,text"));
        assert!(lines[1].contains("reply"));
    }

    #[test]
    fn test_render_jsonl() {
        let jsonl = render(&records(), TableFormat::Json).unwrap();
        let parsed: Vec<serde_json::Value> = jsonl
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["tweet_type"], "reply");
        assert_eq!(parsed[1]["time_category"], "evening");
    }

    #[test]
    fn test_render_empty() {
        assert!(render(&[], TableFormat::Json).unwrap().is_empty());
    }
}
