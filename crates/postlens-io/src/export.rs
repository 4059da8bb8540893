//! CSV export of feature tables and bucket series

use crate::io::atomic_write;
use anyhow::{Context, Result};
use csv::{Reader, Writer};
use postlens_core::{FeatureRecord, TemporalBucket};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One CSV row per bucket. Feature totals are zero when the bucket was built
/// from bare events; top terms are `term:count` pairs joined by `;`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRow {
    pub period: String,
    pub start: String,
    pub original: usize,
    pub retweet: usize,
    pub reply: usize,
    pub total: usize,
    pub char_count: usize,
    pub word_count: usize,
    pub mention_count: usize,
    pub hashtag_count: usize,
    pub url_count: usize,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub engagement_score: usize,
    pub top_terms: String,
}

impl From<&TemporalBucket> for BucketRow {
    fn from(bucket: &TemporalBucket) -> Self {
        let totals = bucket.features.clone().unwrap_or_default();
        let top_terms = bucket
            .top_terms
            .iter()
            .map(|t| format!("{}:{}", t.term, t.count))
            .collect::<Vec<_>>()
            .join(";");
        Self {
            period: bucket.period.to_string(),
            start: bucket.label(),
            original: bucket.original,
            retweet: bucket.retweet,
            reply: bucket.reply,
            total: bucket.total,
            char_count: totals.char_count,
            word_count: totals.word_count,
            mention_count: totals.mention_count,
            hashtag_count: totals.hashtag_count,
            url_count: totals.url_count,
            exclamation_count: totals.exclamation_count,
            question_count: totals.question_count,
            engagement_score: totals.engagement_score,
            top_terms,
        }
    }
}

fn to_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    let data = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV: {}", e.error()))?;
    Ok(String::from_utf8(data)?)
}

/// The feature table as CSV with a header row
pub fn features_csv(records: &[FeatureRecord]) -> Result<String> {
    to_csv(records)
}

pub fn buckets_csv(buckets: &[TemporalBucket]) -> Result<String> {
    to_csv(buckets.iter().map(BucketRow::from))
}

pub fn write_features_csv(path: &Path, records: &[FeatureRecord]) -> Result<()> {
    let data = features_csv(records)?;
    atomic_write(path, data.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(rows = records.len(), path = %path.display(), "wrote feature table");
    Ok(())
}

/// Read a feature table written by [`write_features_csv`]
pub fn read_features_csv(path: &Path) -> Result<Vec<FeatureRecord>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut records = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let record: FeatureRecord =
            result.with_context(|| format!("Failed to parse feature row {}", row + 1))?;
        records.push(record);
    }
    Ok(records)
}

pub fn write_buckets_csv(path: &Path, buckets: &[TemporalBucket]) -> Result<()> {
    let data = buckets_csv(buckets)?;
    atomic_write(path, data.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(rows = buckets.len(), path = %path.display(), "wrote bucket table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use postlens_core::temporal::{aggregate_records, TermCount};
    use postlens_core::{extract, Period, Post};
    use tempfile::TempDir;

    fn record(day: u32, text: &str) -> FeatureRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, day, 14, 5, 0).unwrap();
        extract(&Post::new(format!("p{day}"), at, text))
    }

    #[test]
    fn test_features_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("features.csv");
        let records = vec![
            record(8, "RT @someone: Big news about the release, check it out! https://t.co/a"),
            record(9, "Quiet evening, nothing to report?"),
        ];

        write_features_csv(&path, &records).unwrap();
        let header = std::fs::read_to_string(&path).unwrap();
        assert!(header.starts_with("id,created_at,text,year"));

        let back = read_features_csv(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].tweet_type, records[0].tweet_type);
        assert_eq!(back[0].season, records[0].season);
        assert_eq!(back[1].punctuation_intensity, records[1].punctuation_intensity);
        assert_eq!(back[0].created_at, records[0].created_at);
        assert_eq!(back[1].text, records[1].text);
    }

    #[test]
    fn test_bucket_row() {
        let records = vec![record(8, "alpha beta"), record(9, "alpha")];
        let buckets = aggregate_records(&records, Period::Week, 2);
        let row = BucketRow::from(&buckets[0]);
        assert_eq!(row.period, "week");
        assert_eq!(row.start, "2024-01-08");
        assert_eq!(row.total, 2);
        assert_eq!(row.char_count, 15);
        assert_eq!(row.top_terms, "alpha:2;beta:1");
    }

    #[test]
    fn test_bucket_row_without_features() {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let mut bucket = TemporalBucket::empty(Period::Month, start);
        bucket.top_terms = vec![TermCount {
            term: "x".to_string(),
            count: 1,
        }];
        let row = BucketRow::from(&bucket);
        assert_eq!(row.start, "2024-02");
        assert_eq!(row.char_count, 0);
        assert_eq!(row.top_terms, "x:1");
    }

    #[test]
    fn test_write_buckets_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weekly.csv");
        let buckets = aggregate_records(&[record(8, "alpha")], Period::Day, 0);
        write_buckets_csv(&path, &buckets).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("period,start,original"));
        assert!(lines.next().unwrap().starts_with("day,2024-01-08,1,0,0,1,"));
    }
}
