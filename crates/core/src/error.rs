//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only input-boundary failures live here (malformed records, bad form
/// submissions, rejected configuration). Aggregation itself is total and never
/// produces one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an empty product name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A timestamp could not be parsed into an instant.
    #[error("invalid timestamp {value:?} for field `{field}`")]
    InvalidTimestamp { field: &'static str, value: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_timestamp(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            field,
            value: value.into(),
        }
    }
}
