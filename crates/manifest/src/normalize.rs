//! Turning raw manifest documents into [`FileRecord`]s.

use crate::error::{ErrorKind, Result};
use crate::models::{CategoryMeta, FileRecord, LanguageCode, LanguageTable, RawRecord};
use derive_more::Display;
use exn::ResultExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

/// Why a manifest entry was left out of the catalog.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry isn't an object of the expected shape.
    #[display("entry is not a valid record")]
    Undecodable,
    /// No usable folder location; the record has nowhere to live.
    #[display("empty folder location")]
    EmptyFolderLocation,
    #[display("missing hash")]
    MissingHash,
    #[display("missing file name")]
    MissingFileName,
}

/// A manifest entry that was skipped, and where it was in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skipped {
    pub index: usize,
    pub reason: SkipReason,
}

/// The usable records of a manifest, in input order, plus a report of every
/// entry that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub records: Vec<FileRecord>,
    pub skipped: Vec<Skipped>,
}
impl Manifest {
    fn push(&mut self, index: usize, outcome: std::result::Result<FileRecord, SkipReason>) {
        match outcome {
            Ok(record) => self.records.push(record),
            Err(reason) => {
                tracing::warn!(index, %reason, "Skipping manifest entry");
                self.skipped.push(Skipped { index, reason });
            },
        }
    }
}

/// Validates and interprets a single raw entry.
///
/// Folder segments are trimmed and blank segments dropped. The language comes
/// from `languageCode` when that holds a two-letter code, otherwise from a
/// `xx_` file name prefix naming a built-in language, otherwise the record
/// has no language.
pub fn normalize(raw: RawRecord) -> std::result::Result<FileRecord, SkipReason> {
    normalize_with(raw, LanguageTable::builtin())
}

/// [`normalize`], recognizing file name prefixes for every language in `known`.
pub fn normalize_with(raw: RawRecord, known: &LanguageTable) -> std::result::Result<FileRecord, SkipReason> {
    let folder_location: Vec<String> = raw
        .folder_location
        .unwrap_or_default()
        .into_iter()
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect();
    if folder_location.is_empty() {
        return Err(SkipReason::EmptyFolderLocation);
    }
    let hash = raw.hash.filter(|h| !h.trim().is_empty()).ok_or(SkipReason::MissingHash)?;
    let full_file_name = trimmed(raw.full_file_name).ok_or(SkipReason::MissingFileName)?;
    let language = raw.language_code.as_deref().and_then(LanguageCode::parse_lenient);
    let mut record = FileRecord::with_known_languages(hash, full_file_name, language, folder_location, known);
    record.description = trimmed(raw.description);
    Ok(record)
}

/// Parses a manifest document: either a JSON array of entries, or an object
/// holding them under `files`.
///
/// Entries that can't be decoded are skipped rather than failing the document.
pub fn parse_manifest(json: impl AsRef<[u8]>) -> Result<Manifest> {
    parse_manifest_with(json, LanguageTable::builtin())
}

/// [`parse_manifest`], recognizing file name prefixes for every language in
/// `known`.
#[instrument(skip(json, known), fields(json_size = json.as_ref().len()))]
pub fn parse_manifest_with(json: impl AsRef<[u8]>, known: &LanguageTable) -> Result<Manifest> {
    let mut manifest = Manifest::default();
    for (index, entry) in entries(json.as_ref(), "files", "manifest")?.into_iter().enumerate() {
        let outcome = decode::<RawRecord>(entry)
            .ok_or(SkipReason::Undecodable)
            .and_then(|raw| normalize_with(raw, known));
        manifest.push(index, outcome);
    }
    tracing::debug!(records = manifest.records.len(), skipped = manifest.skipped.len(), "Parsed manifest");
    Ok(manifest)
}

/// Parses a category metadata document: either a JSON array, or an object
/// holding the entries under `categories`. Undecodable entries are dropped.
#[instrument(skip(json), fields(json_size = json.as_ref().len()))]
pub fn parse_categories(json: impl AsRef<[u8]>) -> Result<Vec<CategoryMeta>> {
    let entries = entries(json.as_ref(), "categories", "category metadata")?;
    let total = entries.len();
    let categories: Vec<CategoryMeta> = entries.into_iter().filter_map(decode).collect();
    if categories.len() != total {
        tracing::warn!(dropped = total - categories.len(), "Dropped undecodable category metadata entries");
    }
    Ok(categories)
}

fn entries(json: &[u8], key: &'static str, document: &'static str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_slice(json).or_raise(|| ErrorKind::MalformedJson(document))?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            _ => exn::bail!(ErrorKind::MalformedJson(document)),
        },
        _ => exn::bail!(ErrorKind::MalformedJson(document)),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
