//! One pass over an archive: ingestion, feature table, and every derived view

use crate::corpus::CorpusStats;
use crate::scorer::{SalienceScorer, TermScore};
use crate::summary::{build_summary, CorpusSummary};
use postlens_core::temporal::{aggregate_records, densify};
use postlens_core::{
    ingest, Config, Diagnostics, FeatureSummary, FeatureTable, Period, Post, RawRecord,
    TemporalBucket,
};
use serde::{Deserialize, Serialize};

/// Everything the CLI writes for `report`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub diagnostics: Diagnostics,
    pub stats: CorpusStats,
    pub features: FeatureSummary,
    pub summary: Vec<String>,
    pub buckets: Vec<TemporalBucket>,
}

/// Ingested posts and their feature table. Every view is derived on demand
/// and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub config: Config,
    pub posts: Vec<Post>,
    pub table: FeatureTable,
    pub diagnostics: Diagnostics,
}

impl Analysis {
    pub fn run(records: Vec<RawRecord>, config: Config) -> Self {
        let ingested = ingest(records);
        let mut diagnostics = ingested.diagnostics;
        let table = FeatureTable::build(&ingested.posts, &config, &mut diagnostics);
        tracing::info!(
            records = diagnostics.raw_records,
            posts = ingested.posts.len(),
            qualifying = diagnostics.qualifying,
            "analyzed archive"
        );
        Self {
            config,
            posts: ingested.posts,
            table,
            diagnostics,
        }
    }

    /// Activity buckets over the qualifying posts, sparse unless `zero_fill`
    pub fn buckets(&self, period: Period, zero_fill: bool) -> Vec<TemporalBucket> {
        let buckets = aggregate_records(&self.table.records, period, self.config.bucket_top_terms);
        if zero_fill {
            densify(buckets, period)
        } else {
            buckets
        }
    }

    pub fn top_terms(&self, n: usize) -> Vec<TermScore> {
        SalienceScorer::new().top_terms(&self.table.texts(), n)
    }

    pub fn summary(&self, num_results: usize) -> CorpusSummary {
        build_summary(&self.table.texts(), num_results)
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats::compute(&self.posts, &self.table, &self.config)
    }

    pub fn report(&self) -> Report {
        Report {
            diagnostics: self.diagnostics.clone(),
            stats: self.stats(),
            features: FeatureSummary::from_records(&self.table.records),
            summary: self
                .summary(self.config.num_results)
                .entries
                .into_iter()
                .map(|e| e.text)
                .collect(),
            buckets: self.buckets(self.config.period, self.config.zero_fill),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(created_at: &str, text: &str) -> RawRecord {
        RawRecord {
            created_at: Some(created_at.to_string()),
            full_text: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn records() -> Vec<RawRecord> {
        vec![
            raw(
                "Mon Jan 01 10:00:00 +0000 2024",
                "Started the year by rewriting the ingestion pipeline from scratch today",
            ),
            raw(
                "Mon Jan 15 18:30:00 +0000 2024",
                "Benchmarks for the new tokenizer look far better than expected, very happy",
            ),
            raw("Tue Jan 16 09:00:00 +0000 2024", "hi"),
            RawRecord::default(),
        ]
    }

    #[test]
    fn test_run_counts() {
        let analysis = Analysis::run(records(), Config::default());
        assert_eq!(analysis.posts.len(), 3);
        assert_eq!(analysis.table.len(), 2);
        let d = &analysis.diagnostics;
        assert_eq!(d.raw_records, 4);
        assert_eq!(d.missing_text, 1);
        assert_eq!(d.below_min_length, 1);
        assert_eq!(d.qualifying, 2);
    }

    #[test]
    fn test_buckets_sparse_and_dense() {
        let analysis = Analysis::run(records(), Config::default());
        let sparse = analysis.buckets(Period::Week, false);
        assert_eq!(sparse.len(), 2);
        let dense = analysis.buckets(Period::Week, true);
        assert_eq!(dense.len(), 3);
        assert_eq!(dense[1].total, 0);
    }

    #[test]
    fn test_report() {
        let analysis = Analysis::run(records(), Config::default());
        let report = analysis.report();
        assert_eq!(report.stats.total_posts, 2);
        assert_eq!(report.features.rows, 2);
        assert_eq!(report.summary.len(), 2);
        assert_eq!(report.buckets.len(), 2);
        assert!(report.buckets.iter().all(|b| b.top_terms.len() <= 5));
    }

    #[test]
    fn test_empty_archive() {
        let analysis = Analysis::run(Vec::new(), Config::default());
        let report = analysis.report();
        assert_eq!(report.diagnostics, Diagnostics::default());
        assert!(report.summary.is_empty());
        assert!(report.buckets.is_empty());
        assert!(analysis.top_terms(30).is_empty());
    }
}
