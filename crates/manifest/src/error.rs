//! Manifest Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Individual bad records are never errors: they are skipped and reported via
//! [`Manifest::skipped`](crate::Manifest::skipped). Only a document that cannot
//! be read as a manifest at all raises.

use derive_more::{Display, Error};

/// A manifest error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for manifest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document is not JSON, or is JSON of the wrong shape.
    #[display("malformed {_0} document")]
    MalformedJson(#[error(not(source))] &'static str),
    /// A value could not be interpreted as a two-letter language code.
    #[display("invalid language code: {_0:?}")]
    InvalidLanguage(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Parsing is deterministic; the same bytes will fail the same way.
        // Refetching the document is the collaborator's call.
        false
    }
}
