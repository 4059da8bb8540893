//! Post normalization, feature extraction and temporal aggregation

mod categories;
mod config;
mod error;
mod features;
mod ingest;
mod stats;
mod stopwords;
pub mod temporal;
pub mod text;
mod types;

pub use categories::{
    ActivityLevel, Complexity, DayType, EngagementCategory, HashtagCategory, LengthCategory,
    MentionCategory, PunctuationIntensity, Season, TimeCategory,
};
pub use config::{Config, DensityQuantiles, FrequencyThresholds};
pub use error::{AnalysisError, MalformedReason, Result};
pub use features::{extract, quantile, FeatureRecord, FeatureTable};
pub use ingest::{ingest, parse_timestamp, Diagnostics, Ingested, ARCHIVE_TIME_FORMAT};
pub use stats::{FeatureSummary, NumericStats};
pub use stopwords::is_stop_word;
pub use temporal::{ActivityEvent, Period, TemporalBucket};
pub use types::{Entities, HashtagEntity, MentionEntity, Post, PostKind, RawRecord};
