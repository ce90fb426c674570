//! Command-line Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A command error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A source file could not be read.
    #[display("failed to read {_0}")]
    Io(#[error(not(source))] String),
    /// The manifest was read but is not a usable manifest document.
    #[display("failed to load manifest")]
    Manifest,
    #[display("invalid configuration")]
    Config,
    /// A command-line value could not be parsed.
    #[display("invalid value for {_0}")]
    Argument(#[error(not(source))] &'static str),
    #[display("failed to write output")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            // The manifest may be mid-publish or on a mount that isn't ready.
            ErrorKind::Io(_) | ErrorKind::Manifest => true,
            ErrorKind::Config | ErrorKind::Argument(_) | ErrorKind::Output => false,
        }
    }
}
