//! Error types for the query engine.

use thiserror::Error;

/// Errors that can occur when building or executing queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Invalid regular expression pattern passed to a pattern operator.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Operator applied to a value that does not support it, e.g. a
    /// containment test against a number that was never coerced to a string.
    #[error("operator '{op}' is not valid for {value_type} values")]
    InvalidOperatorUsage {
        op: &'static str,
        value_type: &'static str,
    },

    /// Sort specification was not a list of sort keys.
    #[error("sort spec must be an array of sort keys, got {0}")]
    InvalidSortSpec(&'static str),

    /// A condition map could not be built from its description.
    #[error("invalid condition: {0}")]
    InvalidCondition(String),

    /// JSON input could not be decoded.
    #[error("invalid query json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
