//! Turning raw records into posts, with per-record diagnostics

use crate::error::{AnalysisError, MalformedReason, Result};
use crate::types::{Post, RawRecord};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the archive export, e.g.
/// `Wed Jan 10 08:30:00 +0000 2024`
pub const ARCHIVE_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Minute-precision layout used by exported tables
pub const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a timestamp in archive, RFC 3339 or table layout into UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_str(raw, ARCHIVE_TIME_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, TABLE_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Counters describing what happened to each raw record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub raw_records: usize,
    pub missing_text: usize,
    pub missing_timestamp: usize,
    pub bad_timestamp: usize,
    pub below_min_length: usize,
    pub qualifying: usize,
}

impl Diagnostics {
    pub fn malformed(&self) -> usize {
        self.missing_text + self.missing_timestamp + self.bad_timestamp
    }

    pub fn ingested(&self) -> usize {
        self.raw_records - self.malformed()
    }

    fn record_malformed(&mut self, reason: MalformedReason) {
        match reason {
            MalformedReason::MissingText => self.missing_text += 1,
            MalformedReason::MissingTimestamp => self.missing_timestamp += 1,
            MalformedReason::BadTimestamp => self.bad_timestamp += 1,
        }
    }
}

impl Post {
    /// Build a post from the `index`-th raw record.
    ///
    /// Records without an id get a positional one, stable for a given input.
    pub fn from_record(index: usize, record: RawRecord) -> Result<Post> {
        Self::try_from_record(index, record)
            .map_err(|reason| AnalysisError::MalformedRecord { index, reason })
    }

    fn try_from_record(
        index: usize,
        record: RawRecord,
    ) -> std::result::Result<Post, MalformedReason> {
        let text = record.full_text.ok_or(MalformedReason::MissingText)?;
        let created_at = record
            .created_at
            .as_deref()
            .ok_or(MalformedReason::MissingTimestamp)?;
        let created_at = parse_timestamp(created_at).ok_or(MalformedReason::BadTimestamp)?;

        let id = record
            .id_str
            .or(record.id)
            .unwrap_or_else(|| format!("record-{index}"));

        let post = Post::new(id, created_at, text);
        Ok(match record.entities {
            Some(entities) => post.with_entities(entities),
            None => post,
        })
    }
}

/// Posts that made it through ingestion plus the counters for those that
/// did not
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub posts: Vec<Post>,
    pub diagnostics: Diagnostics,
}

/// Convert raw records into posts. Malformed records are skipped and
/// counted; this never fails as a whole.
pub fn ingest(records: Vec<RawRecord>) -> Ingested {
    let mut diagnostics = Diagnostics {
        raw_records: records.len(),
        ..Default::default()
    };
    let mut posts = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match Post::try_from_record(index, record) {
            Ok(post) => posts.push(post),
            Err(reason) => {
                tracing::debug!(index, %reason, "skipping record");
                diagnostics.record_malformed(reason);
            }
        }
    }

    if diagnostics.malformed() > 0 {
        tracing::info!(
            skipped = diagnostics.malformed(),
            total = diagnostics.raw_records,
            "skipped malformed records"
        );
    }

    Ingested { posts, diagnostics }
}
