//! Error types for cronmatch

use thiserror::Error;

/// Result type alias for schedule operations
pub type Result<T> = std::result::Result<T, CronError>;

/// Errors raised while parsing, validating, or running a schedule expression
#[derive(Debug, Error)]
pub enum CronError {
    /// A field value sits outside its declared domain
    #[error("syntax error: out of bound: {field} ({min} ~ {max})")]
    OutOfBounds {
        /// Human-readable field name
        field: &'static str,
        /// Smallest admissible value for the field
        min: i64,
        /// Largest admissible value for the field
        max: i64,
    },

    /// A token matched none of the recognized field shapes
    #[error("syntax error: unknown token: {0}")]
    UnknownToken(String),

    /// The expression supplied neither 5 nor 6 fields
    #[error("syntax error: incorrect field number: {0}")]
    FieldCount(usize),

    /// `match_run` was invoked with nothing to execute
    #[error("no command")]
    NoCommand,

    /// Timestamp text matched none of the supported layouts
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// I/O error while reading expression text
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
