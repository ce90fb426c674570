//! Config Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configuration source could not be read or parsed.
    #[display("failed to load configuration from {_0}")]
    Load(#[error(not(source))] String),
    /// A value parsed, but doesn't make sense.
    #[display("invalid configuration value for '{field}': {value:?}")]
    Invalid {
        /// Dotted key of the offending value.
        field: String,
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            // The file might be mid-write, or on a mount that isn't ready yet.
            ErrorKind::Load(_) => true,
            ErrorKind::Invalid { .. } => false,
        }
    }
}
