//! Language codes and their display metadata.
//!
//! Codes are the two-letter identifiers found in manifest entries (either the
//! `languageCode` field or a `xx_` file name prefix). Display metadata lives in
//! a [`LanguageTable`], which ships with a built-in set of languages and can be
//! extended from configuration without touching code.

use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::LazyLock;

/// The language every fallback eventually lands on.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A validated, lower-cased two-letter language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);
impl LanguageCode {
    /// The code for [`DEFAULT_LANGUAGE`].
    pub fn default_language() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lenient parse used on manifest input, where a bad code means "no
    /// language" rather than an error.
    ///
    /// ```
    /// use mediacenter_manifest::models::LanguageCode;
    /// assert_eq!(LanguageCode::parse_lenient(" DE ").unwrap().as_str(), "de");
    /// assert!(LanguageCode::parse_lenient("deu").is_none());
    /// assert!(LanguageCode::parse_lenient("").is_none());
    /// ```
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let s = s.trim();
        (s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic())).then(|| Self(s.to_ascii_lowercase()))
    }
}
impl Default for LanguageCode {
    fn default() -> Self {
        Self::default_language()
    }
}
impl FromStr for LanguageCode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_lenient(s) {
            Some(code) => Ok(code),
            None => exn::bail!(ErrorKind::InvalidLanguage(s.to_string())),
        }
    }
}
impl TryFrom<String> for LanguageCode {
    type Error = ErrorKind;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        // Serde wants a plain `Display` error rather than an `Exn` tree.
        Self::parse_lenient(&value).ok_or(ErrorKind::InvalidLanguage(value))
    }
}
impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}
impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
impl Display for LanguageCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// How a language is presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDisplay {
    /// Native name, e.g. "Deutsch"
    pub name: String,
    /// Optional flag emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}
impl LanguageDisplay {
    pub fn new(name: impl Into<String>, flag: Option<impl Into<String>>) -> Self {
        Self { name: name.into(), flag: flag.map(Into::into) }
    }
}

/// Finite mapping from [`LanguageCode`] to [`LanguageDisplay`].
///
/// [`LanguageTable::default`] contains the built-in languages; use
/// [`extend`](Self::extend) to add or override entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    entries: HashMap<LanguageCode, LanguageDisplay>,
}
impl Default for LanguageTable {
    fn default() -> Self {
        BUILTIN_TABLE.clone()
    }
}
impl LanguageTable {
    /// The built-in languages, shared.
    pub fn builtin() -> &'static Self {
        &BUILTIN_TABLE
    }

    /// A table with no entries; every code displays as itself.
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    pub fn insert(&mut self, code: LanguageCode, display: LanguageDisplay) -> Option<LanguageDisplay> {
        self.entries.insert(code, display)
    }

    pub fn get(&self, code: &LanguageCode) -> Option<&LanguageDisplay> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name for `code`, falling back to the upper-cased code itself.
    ///
    /// ```
    /// use mediacenter_manifest::models::{LanguageCode, LanguageTable};
    /// let table = LanguageTable::default();
    /// assert_eq!(table.name(&"de".parse().unwrap()), "Deutsch");
    /// assert_eq!(table.name(&"xx".parse().unwrap()), "XX");
    /// ```
    pub fn name(&self, code: &LanguageCode) -> String {
        match self.entries.get(code) {
            Some(display) => display.name.clone(),
            None => code.as_str().to_ascii_uppercase(),
        }
    }

    /// Name prefixed with the flag, if the table has one.
    pub fn label(&self, code: &LanguageCode) -> String {
        match self.entries.get(code) {
            Some(LanguageDisplay { name, flag: Some(flag) }) => format!("{flag} {name}"),
            Some(LanguageDisplay { name, flag: None }) => name.clone(),
            None => code.as_str().to_ascii_uppercase(),
        }
    }
}
impl Extend<(LanguageCode, LanguageDisplay)> for LanguageTable {
    fn extend<T: IntoIterator<Item = (LanguageCode, LanguageDisplay)>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}
impl FromIterator<(LanguageCode, LanguageDisplay)> for LanguageTable {
    fn from_iter<T: IntoIterator<Item = (LanguageCode, LanguageDisplay)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Built-in display metadata: code to (native name, flag).
static BUILTIN: LazyLock<HashMap<&'static str, (&'static str, &'static str)>> = LazyLock::new(|| {
    HashMap::from([
        ("ar", ("العربية", "🇸🇦")),
        ("bg", ("Български", "🇧🇬")),
        ("cs", ("Čeština", "🇨🇿")),
        ("da", ("Dansk", "🇩🇰")),
        ("de", ("Deutsch", "🇩🇪")),
        ("el", ("Ελληνικά", "🇬🇷")),
        ("en", ("English", "🇬🇧")),
        ("es", ("Español", "🇪🇸")),
        ("fi", ("Suomi", "🇫🇮")),
        ("fr", ("Français", "🇫🇷")),
        ("he", ("עברית", "🇮🇱")),
        ("hi", ("हिन्दी", "🇮🇳")),
        ("hr", ("Hrvatski", "🇭🇷")),
        ("hu", ("Magyar", "🇭🇺")),
        ("id", ("Bahasa Indonesia", "🇮🇩")),
        ("it", ("Italiano", "🇮🇹")),
        ("ja", ("日本語", "🇯🇵")),
        ("ko", ("한국어", "🇰🇷")),
        ("nl", ("Nederlands", "🇳🇱")),
        ("no", ("Norsk", "🇳🇴")),
        ("pl", ("Polski", "🇵🇱")),
        ("pt", ("Português", "🇵🇹")),
        ("ro", ("Română", "🇷🇴")),
        ("ru", ("Русский", "🇷🇺")),
        ("sv", ("Svenska", "🇸🇪")),
        ("th", ("ไทย", "🇹🇭")),
        ("tr", ("Türkçe", "🇹🇷")),
        ("uk", ("Українська", "🇺🇦")),
        ("vi", ("Tiếng Việt", "🇻🇳")),
        ("zh", ("中文", "🇨🇳")),
    ])
});

static BUILTIN_TABLE: LazyLock<LanguageTable> = LazyLock::new(|| LanguageTable {
    entries: BUILTIN
        .iter()
        .map(|(code, (name, flag))| (LanguageCode(code.to_string()), LanguageDisplay::new(*name, Some(*flag))))
        .collect(),
});
