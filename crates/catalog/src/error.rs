//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Building, filtering, counting and locating never fail; a partial manifest
//! still produces a catalog. Only parsing user-supplied selections and options
//! can raise.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Neither `"all"` nor a two-letter language code.
    #[display("invalid language selection: {_0:?}")]
    InvalidSelection(#[error(not(source))] String),
    /// An option value that isn't one of the known variants.
    #[display("invalid value for '{field}': {value:?}")]
    InvalidOption {
        /// The option being parsed.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Bad input stays bad input.
        false
    }
}
