//! TF-IDF term salience and document ranking

use postlens_core::text::{TermTokenizer, Tokenizer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Term -> salience weight
pub type TermWeights = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermScore {
    pub term: String,
    pub weight: f64,
}

/// A document with its position in the input and its salience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub index: usize,
    pub text: String,
    pub score: f64,
}

/// Vocabulary and IDF of a document collection.
///
/// Built once per collection; every per-document score reads from it, so the
/// corpus pass always completes before ranking starts.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    idf: HashMap<String, f64>,
    term_freqs: Vec<HashMap<String, usize>>,
}

impl CorpusIndex {
    pub fn build<T: Tokenizer, S: AsRef<str>>(tokenizer: &T, documents: &[S]) -> Self {
        if documents.is_empty() {
            return Self::default();
        }

        let term_freqs: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf: HashMap<String, usize> = HashMap::new();
                for token in tokenizer.tokens(doc.as_ref()) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tf in &term_freqs {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let doc_count = documents.len() as f64;
        let idf = doc_freq
            .into_iter()
            .map(|(term, df)| (term.to_string(), (doc_count / df as f64).ln()))
            .collect();

        Self { idf, term_freqs }
    }

    /// No document produced a single token
    pub fn is_degenerate(&self) -> bool {
        self.idf.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.term_freqs.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    /// Sum of tf × idf over the terms of document `index`
    pub fn document_score(&self, index: usize) -> f64 {
        self.term_freqs
            .get(index)
            .map(|tf| {
                tf.iter()
                    .map(|(term, &count)| count as f64 * self.idf.get(term).copied().unwrap_or(0.0))
                    .sum()
            })
            .unwrap_or(0.0)
    }

    /// Corpus-wide weight per term: tf × idf summed over every document
    pub fn term_weights(&self) -> TermWeights {
        let mut weights = TermWeights::new();
        for tf in &self.term_freqs {
            for (term, &count) in tf {
                let idf = self.idf.get(term).copied().unwrap_or(0.0);
                *weights.entry(term.clone()).or_insert(0.0) += count as f64 * idf;
            }
        }
        weights
    }
}

/// TF-IDF scorer.
///
/// weight(t) = tf(t, d) × ln(N / df(t)). Tokens come from the injected
/// tokenizer; the default lower-cases and drops English stop words.
#[derive(Debug, Clone, Default)]
pub struct SalienceScorer<T = TermTokenizer> {
    tokenizer: T,
}

impl SalienceScorer {
    pub fn new() -> Self {
        Self {
            tokenizer: TermTokenizer,
        }
    }
}

impl<T: Tokenizer> SalienceScorer<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    pub fn index<S: AsRef<str>>(&self, documents: &[S]) -> CorpusIndex {
        CorpusIndex::build(&self.tokenizer, documents)
    }

    /// Corpus-wide term weights; empty for an empty or token-less collection
    pub fn score_corpus<S: AsRef<str>>(&self, documents: &[S]) -> TermWeights {
        let index = self.index(documents);
        if index.is_degenerate() {
            tracing::debug!(documents = documents.len(), "degenerate vocabulary");
            return TermWeights::new();
        }
        index.term_weights()
    }

    /// The `n` heaviest terms, ties broken alphabetically
    pub fn top_terms<S: AsRef<str>>(&self, documents: &[S], n: usize) -> Vec<TermScore> {
        let mut terms: Vec<TermScore> = self
            .score_corpus(documents)
            .into_iter()
            .map(|(term, weight)| TermScore { term, weight })
            .collect();
        // BTreeMap order makes the stable sort alphabetical within ties
        terms.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        terms.truncate(n);
        terms
    }

    /// Documents ordered by salience, highest first; equal scores keep input
    /// order.
    ///
    /// With no usable vocabulary the first `top_k` documents come back in
    /// input order with a zero score.
    pub fn rank_documents<S: AsRef<str>>(
        &self,
        documents: &[S],
        top_k: usize,
    ) -> Vec<RankedDocument> {
        let index = self.index(documents);

        if index.is_degenerate() {
            tracing::debug!(
                documents = documents.len(),
                "degenerate vocabulary, returning input order"
            );
            return documents
                .iter()
                .take(top_k)
                .enumerate()
                .map(|(i, doc)| RankedDocument {
                    index: i,
                    text: doc.as_ref().to_string(),
                    score: 0.0,
                })
                .collect();
        }

        let mut ranked: Vec<RankedDocument> = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| RankedDocument {
                index: i,
                text: doc.as_ref().to_string(),
                score: index.document_score(i),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(top_k);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postlens_core::text::WordTokenizer;

    #[test]
    fn test_score_corpus_formula() {
        let docs = ["rust code rust", "python code", "rust systems"];
        let weights = SalienceScorer::new().score_corpus(&docs);

        let ln = |x: f64| x.ln();
        // rust: tf 2 + 1, df 2
        assert!((weights["rust"] - 3.0 * ln(3.0 / 2.0)).abs() < 1e-12);
        // code: tf 1 + 1, df 2
        assert!((weights["code"] - 2.0 * ln(3.0 / 2.0)).abs() < 1e-12);
        // python, systems: df 1
        assert!((weights["python"] - ln(3.0)).abs() < 1e-12);
        assert!((weights["systems"] - ln(3.0)).abs() < 1e-12);
        assert_eq!(weights.len(), 4);
    }

    #[test]
    fn test_term_in_every_document_weighs_zero() {
        let weights = SalienceScorer::new().score_corpus(&["shared alpha", "shared beta"]);
        assert_eq!(weights["shared"], 0.0);
        assert!(weights.values().all(|&w| w >= 0.0));
    }

    #[test]
    fn test_empty_and_degenerate() {
        let scorer = SalienceScorer::new();
        let empty: [&str; 0] = [];
        assert!(scorer.score_corpus(&empty).is_empty());
        assert!(scorer.rank_documents(&empty, 3).is_empty());

        let blank = ["", "a", "the and of"];
        assert!(scorer.score_corpus(&blank).is_empty());
        let ranked = scorer.rank_documents(&blank, 2);
        let texts: Vec<&str> = ranked.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["", "a"]);
        assert!(ranked.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_rank_is_stable_permutation() {
        let docs = ["twin", "unique salient rarity", "twin", "lonely"];
        let ranked = SalienceScorer::new().rank_documents(&docs, 10);

        let mut seen: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3]);

        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        let order: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        // the two identical documents tie and keep input order
        let same: Vec<usize> = ranked
            .iter()
            .filter(|r| r.text == "twin")
            .map(|r| r.index)
            .collect();
        assert_eq!(same, vec![0, 2]);
    }

    #[test]
    fn test_top_k_larger_than_input() {
        let ranked = SalienceScorer::new().rank_documents(&["alpha", "beta"], 5);
        assert_eq!(ranked.len(), 2);
        assert!(SalienceScorer::new().rank_documents(&["alpha"], 0).is_empty());
    }

    #[test]
    fn test_top_terms_order() {
        let docs = ["zeta beta", "beta gamma", "alpha"];
        let top = SalienceScorer::new().top_terms(&docs, 3);
        // alpha, gamma, zeta tie at ln(3); beta is lower
        let terms: Vec<&str> = top.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(terms, vec!["alpha", "gamma", "zeta"]);
    }

    #[test]
    fn test_injected_tokenizer_preserves_case() {
        let scorer = SalienceScorer::with_tokenizer(WordTokenizer);
        let weights = scorer.score_corpus(&["Rust rust", "The end"]);
        assert!(weights.contains_key("Rust"));
        assert!(weights.contains_key("rust"));
        assert!(weights.contains_key("The"));
    }

    #[test]
    fn test_index_exposes_idf() {
        let index = SalienceScorer::new().index(&["rust code", "code"]);
        assert_eq!(index.document_count(), 2);
        assert_eq!(index.vocabulary_size(), 2);
        assert_eq!(index.idf("code"), Some(0.0));
        assert!(index.idf("missing").is_none());
        assert!(index.document_score(0) > index.document_score(1));
    }
}
