//! Descriptive statistics over a feature table

use crate::features::FeatureRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; 0 with fewer than two values
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl NumericStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        let std_dev = if n > 1 {
            let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };

        Some(Self {
            mean,
            median,
            std_dev,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Numeric column statistics and label shares for the categorical columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub rows: usize,
    pub numeric: BTreeMap<String, NumericStats>,
    /// column -> label -> share of rows in `[0, 1]`
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

fn bool_label(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

fn numeric_columns(r: &FeatureRecord) -> [(&'static str, f64); 16] {
    [
        ("year", r.year as f64),
        ("month", r.month as f64),
        ("day", r.day as f64),
        ("hour", r.hour as f64),
        ("minute", r.minute as f64),
        ("weekday", r.weekday as f64),
        ("char_count", r.char_count as f64),
        ("word_count", r.word_count as f64),
        ("mention_count", r.mention_count as f64),
        ("hashtag_count", r.hashtag_count as f64),
        ("url_count", r.url_count as f64),
        ("exclamation_count", r.exclamation_count as f64),
        ("question_count", r.question_count as f64),
        ("tweet_frequency", r.tweet_frequency as f64),
        ("tweet_density", r.tweet_density as f64),
        ("engagement_score", r.engagement_score as f64),
    ]
}

fn categorical_columns(r: &FeatureRecord) -> [(&'static str, &'static str); 18] {
    [
        ("is_weekend", bool_label(r.is_weekend)),
        ("is_retweet", bool_label(r.is_retweet)),
        ("is_reply", bool_label(r.is_reply)),
        ("has_mention", bool_label(r.has_mention)),
        ("has_hashtag", bool_label(r.has_hashtag)),
        ("has_url", bool_label(r.has_url)),
        ("day_type", r.day_type.as_str()),
        ("time_category", r.time_category.as_str()),
        ("season", r.season.as_str()),
        ("tweet_length_category", r.tweet_length_category.as_str()),
        ("tweet_type", r.tweet_type.as_str()),
        ("mention_category", r.mention_category.as_str()),
        ("hashtag_category", r.hashtag_category.as_str()),
        ("punctuation_intensity", r.punctuation_intensity.as_str()),
        ("tweet_frequency_category", r.tweet_frequency_category.as_str()),
        ("tweet_density_category", r.tweet_density_category.as_str()),
        ("engagement_category", r.engagement_category.as_str()),
        ("tweet_complexity", r.tweet_complexity.as_str()),
    ]
}

impl FeatureSummary {
    pub fn from_records(records: &[FeatureRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut columns: BTreeMap<&'static str, Vec<f64>> = BTreeMap::new();
        let mut labels: BTreeMap<&'static str, BTreeMap<&'static str, usize>> = BTreeMap::new();
        for r in records {
            for (name, value) in numeric_columns(r) {
                columns.entry(name).or_default().push(value);
            }
            for (name, label) in categorical_columns(r) {
                *labels.entry(name).or_default().entry(label).or_default() += 1;
            }
        }

        let rows = records.len();
        let numeric = columns
            .into_iter()
            .filter_map(|(name, values)| {
                NumericStats::from_values(&values).map(|s| (name.to_string(), s))
            })
            .collect();
        let categorical = labels
            .into_iter()
            .map(|(name, counts)| {
                let shares = counts
                    .into_iter()
                    .map(|(label, n)| (label.to_string(), n as f64 / rows as f64))
                    .collect();
                (name.to_string(), shares)
            })
            .collect();

        Self {
            rows,
            numeric,
            categorical,
        }
    }
}
