//! Media manifest models and normalization.
//!
//! A manifest is a flat, ordered list of file descriptors fetched by some
//! collaborator. This crate turns it into validated [`FileRecord`]s, skipping
//! (and reporting) entries that can't be placed in a catalog, and provides the
//! language primitives the catalog resolves against.
//!
//! ```
//! use mediacenter_manifest::parse_manifest;
//!
//! let manifest = parse_manifest(r#"[
//!     {"hash": "h1", "fullFileName": "en_Guide.pdf", "folderLocation": ["Docs"]},
//!     {"hash": "h2", "fullFileName": "Lost.pdf", "folderLocation": []}
//! ]"#).unwrap();
//! assert_eq!(manifest.records.len(), 1);
//! assert_eq!(manifest.skipped.len(), 1);
//! ```

mod consts;
pub mod error;
pub mod models;
mod normalize;

pub use crate::models::FileRecord;
pub use crate::normalize::{
    Manifest, SkipReason, Skipped, normalize, normalize_with, parse_categories, parse_manifest, parse_manifest_with,
};
