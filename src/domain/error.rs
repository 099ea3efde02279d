//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid outline configuration.
/// Parsing text never fails; only the pattern and separator setup can.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid heading pattern for level {level}: {pattern}")]
    InvalidPattern {
        level: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("heading pattern for level {level} needs a numeral and a title group: {pattern}")]
    MissingCaptureGroups { level: usize, pattern: String },

    #[error("at least one heading pattern is required")]
    EmptyPatternSet,

    #[error("{0} key separator must not be empty")]
    EmptySeparator(&'static str),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
