//! Attaching externally sourced category metadata.

use mediacenter_manifest::models::CategoryMeta;

/// Presentation fields merged onto a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedMeta {
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// Finds the metadata for a category.
///
/// An entry matches when its `id` or its `name` equals the category name; the
/// first such entry in list order wins. Only when none does is an entry whose
/// `id` equals the category's slug id used. No match yields empty metadata.
pub fn merge(category_name: &str, category_id: &str, external: &[CategoryMeta]) -> MergedMeta {
    let has_id = |meta: &&CategoryMeta, id: &str| meta.id.as_deref() == Some(id);
    let found = external
        .iter()
        .find(|meta| has_id(meta, category_name) || meta.name == category_name)
        .or_else(|| external.iter().find(|meta| has_id(meta, category_id)));
    match found {
        Some(meta) => MergedMeta {
            icon: meta.icon.clone(),
            description: meta.description.clone(),
        },
        None => {
            tracing::debug!(category = category_name, "No metadata for category");
            MergedMeta::default()
        },
    }
}
