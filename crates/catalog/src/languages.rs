//! Selectable languages and the initial selection.

use crate::node::compare_names;
use crate::resolve::Selection;
use mediacenter_manifest::FileRecord;
use mediacenter_manifest::models::{LanguageCode, LanguageTable};

/// Label of the [`Selection::All`] option.
pub const ALL_LANGUAGES_LABEL: &str = "🌐 All Languages";

/// One entry of a language picker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LanguageOption {
    pub selection: Selection,
    pub label: String,
}

/// Distinct language codes across `records`, in first-seen order.
pub fn present_languages<'a>(records: impl IntoIterator<Item = &'a FileRecord>) -> Vec<LanguageCode> {
    let mut codes: Vec<LanguageCode> = Vec::new();
    for code in records.into_iter().filter_map(|r| r.language.as_ref()) {
        if !codes.contains(code) {
            codes.push(code.clone());
        }
    }
    codes
}

/// Builds the list of selectable languages.
///
/// English and `default` are always offered. Languages are sorted by display
/// name, then the `preferred` language (typically the detected device
/// language) is moved to the front when offered, or `default` when it isn't.
/// "All languages" is pinned first of all.
pub fn language_options(
    present: &[LanguageCode],
    preferred: Option<&LanguageCode>,
    default: &LanguageCode,
    table: &LanguageTable,
) -> Vec<LanguageOption> {
    let mut codes: Vec<LanguageCode> = present.to_vec();
    for always in [LanguageCode::default_language(), default.clone()] {
        if !codes.contains(&always) {
            codes.push(always);
        }
    }
    codes.sort_by(|a, b| compare_names(&table.name(a), &table.name(b)).then_with(|| a.cmp(b)));
    codes.dedup();
    let front = preferred.filter(|p| codes.contains(p)).unwrap_or(default);
    if let Some(position) = codes.iter().position(|c| c == front) {
        let code = codes.remove(position);
        codes.insert(0, code);
    }
    std::iter::once(LanguageOption {
        selection: Selection::All,
        label: ALL_LANGUAGES_LABEL.to_string(),
    })
    .chain(codes.into_iter().map(|code| LanguageOption {
        label: table.label(&code),
        selection: Selection::Language(code),
    }))
    .collect()
}

/// Chooses the selection to start with.
///
/// An explicit `query` value (e.g. from a URL) wins when it names an offered
/// option. Otherwise the `device` language is used when offered; it may carry
/// a region (`"de-AT"`, `"pt_BR"`). Otherwise `fallback`.
pub fn initial_selection(
    query: Option<&str>,
    device: Option<&str>,
    options: &[LanguageOption],
    fallback: &LanguageCode,
) -> Selection {
    let offered = |selection: &Selection| options.iter().any(|o| &o.selection == selection);
    if let Some(selection) = query.and_then(|q| q.parse::<Selection>().ok())
        && offered(&selection)
    {
        return selection;
    }
    if let Some(code) = device.and_then(device_language)
        && offered(&Selection::Language(code.clone()))
    {
        return Selection::Language(code);
    }
    Selection::Language(fallback.clone())
}

/// Primary language of a device locale such as `"de-AT"`.
pub fn device_language(locale: &str) -> Option<LanguageCode> {
    let primary = locale.trim().split(['-', '_']).next()?;
    LanguageCode::parse_lenient(primary)
}
