//! Choosing which language variants of each document to show.
//!
//! Two policies coexist because callers differ in whether several variants of
//! the same document may be displayed side by side:
//!
//! - [`Policy::Strict`] is a per-record filter: a record is shown only if it
//!   is in the selected language.
//! - [`Policy::Fallback`] reduces each logical document to exactly one
//!   variant: the selected language, else the default language, else the first
//!   variant in input order.
//!
//! Under both policies [`Selection::All`] is a passthrough.

use crate::error::{Error, ErrorKind};
use crate::node::CategoryNode;
use exn::ResultExt;
use mediacenter_manifest::FileRecord;
use mediacenter_manifest::models::LanguageCode;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use tracing::instrument;

const ALL: &str = "all";

/// The user's language choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    /// Every variant of every document.
    All,
    Language(LanguageCode),
}
impl Selection {
    pub fn language(&self) -> Option<&LanguageCode> {
        match self {
            Selection::All => None,
            Selection::Language(code) => Some(code),
        }
    }
}
impl FromStr for Selection {
    type Err = Error;

    /// Accepts `"all"` (any case) or a two-letter language code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        let code = s.parse::<LanguageCode>().or_raise(|| ErrorKind::InvalidSelection(s.to_string()))?;
        Ok(Self::Language(code))
    }
}
impl From<LanguageCode> for Selection {
    fn from(code: LanguageCode) -> Self {
        Self::Language(code)
    }
}
impl Display for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Language(code) => write!(f, "{code}"),
        }
    }
}
#[cfg(feature = "serde")]
impl serde::Serialize for Selection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a specific language selection is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "kebab-case"))]
pub enum Policy {
    /// Only records in the selected language.
    Strict,
    /// Exactly one variant per logical document.
    #[default]
    Fallback,
}
impl FromStr for Policy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Self::Strict,
            "fallback" => Self::Fallback,
            _ => exn::bail!(ErrorKind::InvalidOption { field: "policy", value: s.to_string() }),
        })
    }
}

/// What makes two records variants of the same logical document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "kebab-case"))]
pub enum GroupKey {
    /// Variants share a hash.
    #[default]
    Hash,
    /// Variants share a file name once the language prefix is removed
    /// (compared case-insensitively).
    DocumentName,
}
impl GroupKey {
    fn key(&self, record: &FileRecord) -> String {
        match self {
            GroupKey::Hash => record.hash.clone(),
            GroupKey::DocumentName => record.document_name().to_lowercase(),
        }
    }
}
impl FromStr for GroupKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Self::Hash,
            "document-name" | "document_name" | "name" => Self::DocumentName,
            _ => exn::bail!(ErrorKind::InvalidOption { field: "group_by", value: s.to_string() }),
        })
    }
}

/// A configured language resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFilter {
    pub policy: Policy,
    /// Second choice under [`Policy::Fallback`].
    pub default_language: LanguageCode,
    pub group_by: GroupKey,
}
impl Default for LanguageFilter {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}
impl LanguageFilter {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            default_language: LanguageCode::default_language(),
            group_by: GroupKey::default(),
        }
    }

    pub fn with_default_language(mut self, code: LanguageCode) -> Self {
        self.default_language = code;
        self
    }

    pub fn with_group_by(mut self, group_by: GroupKey) -> Self {
        self.group_by = group_by;
        self
    }

    /// Applies the selection to a flat list of records.
    ///
    /// Output order follows input order (for [`Policy::Fallback`], the order
    /// in which each document first appears). Repeated calls with the same
    /// input always return the same records.
    pub fn resolve(&self, records: &[FileRecord], selection: &Selection) -> Vec<FileRecord> {
        let Selection::Language(code) = selection else {
            return records.to_vec();
        };
        match self.policy {
            Policy::Strict => records.iter().filter(|r| r.language.as_ref() == Some(code)).cloned().collect(),
            Policy::Fallback => self.fallback(records, code),
        }
    }

    /// Applies [`resolve`](Self::resolve) to the files of every node in the
    /// tree, keeping the tree's structure. Documents are grouped per node.
    #[instrument(skip(self, tree), fields(policy = ?self.policy, categories = tree.len()))]
    pub fn filter_tree(&self, tree: &[CategoryNode], selection: &Selection) -> Vec<CategoryNode> {
        if *selection == Selection::All {
            return tree.to_vec();
        }
        tree.iter()
            .map(|category| category.map_files(&|files: &[FileRecord]| self.resolve(files, selection)))
            .collect()
    }

    fn fallback(&self, records: &[FileRecord], code: &LanguageCode) -> Vec<FileRecord> {
        let mut groups: Vec<Variants<'_>> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in records {
            let slot = *index.entry(self.group_by.key(record)).or_insert_with(|| {
                groups.push(Variants::new(record));
                groups.len() - 1
            });
            let group = &mut groups[slot];
            match record.language.as_ref() {
                Some(language) if language == code => {
                    group.exact.get_or_insert(record);
                },
                Some(language) if *language == self.default_language => {
                    group.default.get_or_insert(record);
                },
                _ => {},
            }
        }
        groups.into_iter().map(|group| group.pick().clone()).collect()
    }
}

/// Candidate variants of one logical document, first-encountered per tier.
struct Variants<'a> {
    first: &'a FileRecord,
    exact: Option<&'a FileRecord>,
    default: Option<&'a FileRecord>,
}
impl<'a> Variants<'a> {
    fn new(first: &'a FileRecord) -> Self {
        Self { first, exact: None, default: None }
    }

    fn pick(&self) -> &'a FileRecord {
        self.exact.or(self.default).unwrap_or(self.first)
    }
}
