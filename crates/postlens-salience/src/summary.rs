//! Extractive summaries: the most salient posts or sentences of a collection

use crate::scorer::{RankedDocument, SalienceScorer};
use postlens_core::text::normalize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static SENTENCE_RE: OnceLock<Regex> = OnceLock::new();

/// Top-k texts of a collection, most salient first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub entries: Vec<RankedDocument>,
}

impl CorpusSummary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }

    /// Entries joined with a single space, in rank order
    pub fn joined(&self) -> String {
        self.texts().join(" ")
    }
}

/// Normalize every text and keep the `num_results` most salient.
///
/// Texts that normalize to nothing never take a slot; entry indices still
/// point into `texts`.
pub fn build_summary<S: AsRef<str>>(texts: &[S], num_results: usize) -> CorpusSummary {
    let (positions, normalized): (Vec<usize>, Vec<String>) = texts
        .iter()
        .map(|t| normalize(t.as_ref()))
        .enumerate()
        .filter(|(_, t)| !t.is_empty())
        .unzip();
    if normalized.is_empty() {
        return CorpusSummary::default();
    }

    let mut entries = SalienceScorer::new().rank_documents(&normalized, num_results);
    for entry in &mut entries {
        entry.index = positions[entry.index];
    }
    tracing::debug!(
        texts = texts.len(),
        selected = entries.len(),
        "built summary"
    );
    CorpusSummary { entries }
}

/// Texts of [`build_summary`]. A single text comes back normalized.
pub fn summarize<S: AsRef<str>>(texts: &[S], num_results: usize) -> Vec<String> {
    build_summary(texts, num_results)
        .entries
        .into_iter()
        .map(|e| e.text)
        .collect()
}

/// Split on terminal punctuation, keeping it with its sentence
fn sentences(text: &str) -> Vec<&str> {
    let re = SENTENCE_RE.get_or_init(|| Regex::new(r"[^.!?]+[.!?]*").unwrap());
    re.find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Summary of a single long text, ranking its sentences against each other
pub fn summarize_sentences(text: &str, num_results: usize) -> CorpusSummary {
    build_summary(&sentences(text), num_results)
}
