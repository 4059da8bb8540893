//! Calendar bucketing of post activity
//!
//! Buckets are keyed by the UTC calendar date their period starts on:
//!
//! - day: the date itself
//! - week: the Monday of the ISO week. A bucket covers Monday 00:00
//!   (inclusive) to the next Monday 00:00 (exclusive) and is labelled with
//!   its first day.
//! - month: the first of the month
//!
//! Output is sparse: periods without posts are omitted unless the caller
//! asks for [`densify`].

use crate::error::AnalysisError;
use crate::features::FeatureRecord;
use crate::text::{TermTokenizer, Tokenizer};
use crate::types::{Post, PostKind};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// Aggregation period. Parsing accepts the same spellings everywhere,
/// case-insensitively: `d`/`day`/`daily` and likewise for week and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// First day of the period containing `date`
    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Day => date,
            Period::Week => date.week(Weekday::Mon).first_day(),
            Period::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Start of the following period
    pub fn next(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Day => start.checked_add_days(Days::new(1)),
            Period::Week => start.checked_add_days(Days::new(7)),
            Period::Month => start.checked_add_months(Months::new(1)),
        }
    }

    /// Display label of a bucket start
    pub fn label(&self, start: NaiveDate) -> String {
        match self {
            Period::Day | Period::Week => start.format("%Y-%m-%d").to_string(),
            Period::Month => start.format("%Y-%m").to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

impl FromStr for Period {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Period::Day),
            "w" | "week" | "weekly" => Ok(Period::Week),
            "m" | "month" | "monthly" => Ok(Period::Month),
            other => Err(AnalysisError::InvalidConfiguration(format!(
                "unknown aggregation period '{other}' (expected day, week or month)"
            ))),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = AnalysisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal input to the aggregator: when, and what kind of post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityEvent {
    pub at: DateTime<Utc>,
    pub kind: PostKind,
}

impl From<&Post> for ActivityEvent {
    fn from(post: &Post) -> Self {
        Self {
            at: post.created_at(),
            kind: post.kind(),
        }
    }
}

impl From<&FeatureRecord> for ActivityEvent {
    fn from(record: &FeatureRecord) -> Self {
        Self {
            at: record.created_at,
            kind: record.kind(),
        }
    }
}

/// Sums of the numeric features of the posts in a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTotals {
    pub char_count: usize,
    pub word_count: usize,
    pub mention_count: usize,
    pub hashtag_count: usize,
    pub url_count: usize,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub engagement_score: usize,
}

impl FeatureTotals {
    fn add(&mut self, r: &FeatureRecord) {
        self.char_count += r.char_count;
        self.word_count += r.word_count;
        self.mention_count += r.mention_count;
        self.hashtag_count += r.hashtag_count;
        self.url_count += r.url_count;
        self.exclamation_count += r.exclamation_count;
        self.question_count += r.question_count;
        self.engagement_score += r.engagement_score;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalBucket {
    pub period: Period,
    pub start: NaiveDate,
    pub original: usize,
    pub retweet: usize,
    pub reply: usize,
    /// `original + retweet + reply`
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureTotals>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_terms: Vec<TermCount>,
}

impl TemporalBucket {
    pub fn empty(period: Period, start: NaiveDate) -> Self {
        Self {
            period,
            start,
            original: 0,
            retweet: 0,
            reply: 0,
            total: 0,
            features: None,
            top_terms: Vec::new(),
        }
    }

    pub fn label(&self) -> String {
        self.period.label(self.start)
    }

    fn count(&mut self, kind: PostKind) {
        match kind {
            PostKind::Original => self.original += 1,
            PostKind::Retweet => self.retweet += 1,
            PostKind::Reply => self.reply += 1,
        }
        self.total = self.original + self.retweet + self.reply;
    }
}

/// Bucket events by `period`. Input order does not matter; output is
/// strictly increasing by start with one bucket per non-empty period.
pub fn aggregate(events: &[ActivityEvent], period: Period) -> Vec<TemporalBucket> {
    let mut buckets: BTreeMap<NaiveDate, TemporalBucket> = BTreeMap::new();
    for event in events {
        let start = period.start_of(event.at.date_naive());
        buckets
            .entry(start)
            .or_insert_with(|| TemporalBucket::empty(period, start))
            .count(event.kind);
    }
    tracing::debug!(events = events.len(), buckets = buckets.len(), %period, "aggregated");
    buckets.into_values().collect()
}

/// Like [`aggregate`], also summing numeric features and keeping the
/// `top_terms` most frequent terms of each bucket (ties broken by term).
pub fn aggregate_records(
    records: &[FeatureRecord],
    period: Period,
    top_terms: usize,
) -> Vec<TemporalBucket> {
    let mut buckets: BTreeMap<NaiveDate, (TemporalBucket, HashMap<String, usize>)> =
        BTreeMap::new();

    for record in records {
        let start = period.start_of(record.date());
        let (bucket, terms) = buckets.entry(start).or_insert_with(|| {
            let mut bucket = TemporalBucket::empty(period, start);
            bucket.features = Some(FeatureTotals::default());
            (bucket, HashMap::new())
        });
        bucket.count(record.kind());
        if let Some(totals) = bucket.features.as_mut() {
            totals.add(record);
        }
        if top_terms > 0 {
            for term in TermTokenizer.tokens(&record.text) {
                *terms.entry(term).or_default() += 1;
            }
        }
    }

    buckets
        .into_values()
        .map(|(mut bucket, terms)| {
            bucket.top_terms = top_counts(terms, top_terms);
            bucket
        })
        .collect()
}

fn top_counts(counts: HashMap<String, usize>, n: usize) -> Vec<TermCount> {
    let mut counts: Vec<TermCount> = counts
        .into_iter()
        .map(|(term, count)| TermCount { term, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    counts.truncate(n);
    counts
}

/// Zero-fill every missing period between the first and last bucket.
///
/// Only called when a consumer explicitly wants a dense series.
pub fn densify(buckets: Vec<TemporalBucket>, period: Period) -> Vec<TemporalBucket> {
    let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
        return buckets;
    };
    let (first_start, last_start) = (first.start, last.start);
    let with_features = buckets.iter().any(|b| b.features.is_some());

    let mut by_start: BTreeMap<NaiveDate, TemporalBucket> =
        buckets.into_iter().map(|b| (b.start, b)).collect();

    let mut cursor = Some(first_start);
    while let Some(start) = cursor {
        if start > last_start {
            break;
        }
        by_start.entry(start).or_insert_with(|| {
            let mut gap = TemporalBucket::empty(period, start);
            if with_features {
                gap.features = Some(FeatureTotals::default());
            }
            gap
        });
        cursor = period.next(start);
    }

    by_start.into_values().collect()
}
