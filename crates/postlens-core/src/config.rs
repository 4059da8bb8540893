//! Configuration for a single analysis run

use crate::error::{AnalysisError, Result};
use crate::temporal::Period;
use serde::{Deserialize, Serialize};

/// Per-day post count thresholds for `tweet_frequency_category`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyThresholds {
    /// Counts above this are at least `medium`
    pub medium_above: usize,
    /// Counts above this are `high`
    pub high_above: usize,
}

impl FrequencyThresholds {
    pub fn new() -> Self {
        Self {
            medium_above: 5,
            high_above: 10,
        }
    }
}

impl Default for FrequencyThresholds {
    fn default() -> Self {
        Self::new()
    }
}

/// Quantiles of the per-hour counts used to bin `tweet_density`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityQuantiles {
    pub low: f64,
    pub high: f64,
}

impl DensityQuantiles {
    pub fn new() -> Self {
        Self {
            low: 0.33,
            high: 0.67,
        }
    }
}

impl Default for DensityQuantiles {
    fn default() -> Self {
        Self::new()
    }
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Posts whose normalized text is this long or shorter are left out of
    /// the feature table (they still count as ingested)
    pub min_text_length: usize,

    /// Number of texts in a summary
    pub num_results: usize,

    /// Number of TF-IDF terms in the top-term list
    pub top_terms: usize,

    /// Number of words in the raw frequency list
    pub top_words: usize,

    /// Number of hashtags / mentioned users reported
    pub top_entities: usize,

    /// Aggregation period
    pub period: Period,

    /// Fill empty periods between the first and last bucket with zeros
    pub zero_fill: bool,

    /// Number of frequent terms kept per bucket
    pub bucket_top_terms: usize,

    pub frequency_thresholds: FrequencyThresholds,

    pub density_quantiles: DensityQuantiles,
}

impl Config {
    pub fn new() -> Self {
        Self {
            min_text_length: 50,
            num_results: 3,
            top_terms: 30,
            top_words: 20,
            top_entities: 30,
            period: Period::Week,
            zero_fill: false,
            bucket_top_terms: 5,
            frequency_thresholds: FrequencyThresholds::new(),
            density_quantiles: DensityQuantiles::new(),
        }
    }

    /// Parse a JSON config document and validate it.
    ///
    /// Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)
            .map_err(|e| AnalysisError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let freq = &self.frequency_thresholds;
        if freq.medium_above >= freq.high_above {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "frequency thresholds must increase (medium_above={}, high_above={})",
                freq.medium_above, freq.high_above
            )));
        }

        let q = &self.density_quantiles;
        let in_range = |v: f64| v > 0.0 && v < 1.0;
        if !in_range(q.low) || !in_range(q.high) || q.low >= q.high {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "density quantiles must satisfy 0 < low < high < 1 (low={}, high={})",
                q.low, q.high
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
