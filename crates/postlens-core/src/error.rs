//! Error taxonomy for the analysis engine

use thiserror::Error;

/// Errors raised by the core.
///
/// Only `InvalidConfiguration` is meant to abort a run. `MalformedRecord`
/// values are produced per post during ingestion and folded into
/// [`Diagnostics`](crate::Diagnostics); callers never see them as a batch
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("malformed record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: MalformedReason },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Why a raw record could not become a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    MissingText,
    MissingTimestamp,
    BadTimestamp,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MalformedReason::MissingText => "missing full_text",
            MalformedReason::MissingTimestamp => "missing created_at",
            MalformedReason::BadTimestamp => "unparseable created_at",
        };
        f.write_str(s)
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::MalformedRecord {
            index: 4,
            reason: MalformedReason::BadTimestamp,
        };
        assert_eq!(err.to_string(), "malformed record #4: unparseable created_at");

        let err = AnalysisError::InvalidConfiguration("unknown period 'year'".to_string());
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
