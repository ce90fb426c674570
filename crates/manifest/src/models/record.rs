use super::{FileType, LanguageCode, LanguageTable};
use crate::consts::LANGUAGE_PREFIX_REGEX;
use serde::{Deserialize, Serialize};

/// A manifest entry exactly as it appears on the wire.
///
/// Every field is optional here; [`normalize`](crate::normalize) decides what
/// is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub full_file_name: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub folder_location: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A normalized, immutable file descriptor.
///
/// Records are created once per manifest entry and only ever shared or cloned
/// afterwards. `folder_location[0]` is the category; any further segments are
/// nested subfolders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Stable identifier, unique per language variant of a document.
    pub hash: String,
    /// Original file name, possibly with a `xx_` language prefix.
    pub full_file_name: String,
    /// Language of this variant, if known.
    #[serde(rename = "languageCode")]
    pub language: Option<LanguageCode>,
    /// Category followed by subfolder names, outermost first.
    pub folder_location: Vec<String>,
    #[serde(rename = "type")]
    pub kind: FileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
impl FileRecord {
    /// Builds a record, deriving [`FileType`] from the file name and, when no
    /// explicit language is given, the language from a `xx_` name prefix
    /// naming a built-in language.
    pub fn new(
        hash: impl Into<String>,
        full_file_name: impl Into<String>,
        language: Option<LanguageCode>,
        folder_location: Vec<String>,
    ) -> Self {
        Self::with_known_languages(hash, full_file_name, language, folder_location, LanguageTable::builtin())
    }

    /// Like [`FileRecord::new`], but a name prefix only counts as a language
    /// when `known` has it. `TV_Commercial.mp4` has no language.
    pub fn with_known_languages(
        hash: impl Into<String>,
        full_file_name: impl Into<String>,
        language: Option<LanguageCode>,
        folder_location: Vec<String>,
        known: &LanguageTable,
    ) -> Self {
        let full_file_name = full_file_name.into();
        let language = language.or_else(|| language_from_file_name(&full_file_name, known));
        Self {
            hash: hash.into(),
            kind: FileType::from_file_name(&full_file_name),
            full_file_name,
            language,
            folder_location,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this record can be placed in a tree.
    pub fn is_placeable(&self) -> bool {
        !self.folder_location.is_empty()
    }

    /// The file name with its language prefix removed. A prefix that isn't a
    /// language (`my_notes.pdf`) is part of the name.
    ///
    /// ```
    /// use mediacenter_manifest::models::FileRecord;
    /// let record = FileRecord::new("h1", "en_Instructions.pdf", None, vec!["Docs".into()]);
    /// assert_eq!(record.document_name(), "Instructions.pdf");
    /// assert_eq!(record.language.unwrap().as_str(), "en");
    /// ```
    pub fn document_name(&self) -> &str {
        let Some(captures) = LANGUAGE_PREFIX_REGEX.captures(&self.full_file_name) else {
            return &self.full_file_name;
        };
        let is_language = captures
            .get(1)
            .and_then(|m| LanguageCode::parse_lenient(m.as_str()))
            .is_some_and(|code| self.language.as_ref() == Some(&code) || LanguageTable::builtin().contains(&code));
        match captures.get(2) {
            Some(rest) if is_language => rest.as_str(),
            _ => &self.full_file_name,
        }
    }

    /// Human-friendly title: the document name without its extension.
    pub fn display_name(&self) -> &str {
        let name = self.document_name();
        if self.kind == FileType::ExternalLink {
            return name;
        }
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }
}

/// Extracts a language code from a `xx_` file name prefix, if `known` has it.
fn language_from_file_name(name: &str, known: &LanguageTable) -> Option<LanguageCode> {
    LANGUAGE_PREFIX_REGEX
        .captures(name.trim())
        .and_then(|c| c.get(1))
        .and_then(|m| LanguageCode::parse_lenient(m.as_str()))
        .filter(|code| known.contains(code))
}
