//! Error types callers can match on

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::sources::SourceKind;

/// Failure of a single external source call.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("source call timed out after {}", humantime::format_duration(*.0))]
    Timeout(Duration),

    #[error("call budget exhausted ({limit} calls)")]
    BudgetExhausted { limit: usize },

    #[error("provider reported an error: {0}")]
    Provider(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Unavailable { .. } | SourceError::Timeout(_))
    }
}

/// Failure of a whole aggregation request.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("insufficient data for APO calculation")]
    InsufficientData,

    #[error("malformed {slot} payload: {detail}")]
    MalformedPayload { slot: SourceKind, detail: String },
}
