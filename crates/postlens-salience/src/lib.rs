//! TF-IDF salience scoring, extractive summaries and corpus statistics

mod analysis;
mod corpus;
mod scorer;
mod summary;

pub use analysis::{Analysis, Report};
pub use corpus::CorpusStats;
pub use scorer::{CorpusIndex, RankedDocument, SalienceScorer, TermScore, TermWeights};
pub use summary::{build_summary, summarize, summarize_sentences, CorpusSummary};
