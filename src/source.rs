//! Reading the manifest and category metadata from disk.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use mediacenter_manifest::models::{CategoryMeta, LanguageTable};
use mediacenter_manifest::{Manifest, parse_categories, parse_manifest_with};
use std::fs;
use std::path::Path;
use tracing::instrument;

/// Reads and parses the manifest, taking `xx_` file name prefixes as
/// languages only when `known` has them. Without a manifest there is no
/// catalog, so every failure here is fatal.
#[instrument(skip(path, known), fields(path = %path.display()))]
pub fn read_manifest(path: &Path, known: &LanguageTable) -> Result<Manifest> {
    let bytes = fs::read(path).or_raise(|| ErrorKind::Io(path.display().to_string()))?;
    let manifest = parse_manifest_with(bytes, known).or_raise(|| ErrorKind::Manifest)?;
    if !manifest.skipped.is_empty() {
        tracing::info!(skipped = manifest.skipped.len(), "Some manifest entries were skipped");
    }
    Ok(manifest)
}

/// Reads category metadata. Metadata is decoration only: a missing or broken
/// file is logged and treated as empty.
pub fn read_categories(path: Option<&Path>) -> Vec<CategoryMeta> {
    let Some(path) = path else {
        return Vec::new();
    };
    match try_read_categories(path) {
        Ok(categories) => categories,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = ?err, "Ignoring category metadata");
            Vec::new()
        },
    }
}

fn try_read_categories(path: &Path) -> Result<Vec<CategoryMeta>> {
    let bytes = fs::read(path).or_raise(|| ErrorKind::Io(path.display().to_string()))?;
    parse_categories(bytes).or_raise(|| ErrorKind::Io(path.display().to_string()))
}
