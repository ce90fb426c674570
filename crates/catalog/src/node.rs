//! Catalog tree nodes.
//!
//! Nodes are plain values. Every transformation (language filtering, pruning)
//! produces a new tree; nothing is patched in place.

use mediacenter_manifest::FileRecord;
use std::cmp::Ordering;

/// Read access shared by categories and subfolders, so that recursive
/// operations can treat both levels alike.
pub trait Folder {
    /// Stable slug, derived purely from the node's full path.
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    /// Files directly inside this node, in manifest order.
    fn files(&self) -> &[FileRecord];
    /// Child subfolders, sorted by name.
    fn subfolders(&self) -> &[SubfolderNode];

    /// A node without files or subfolders. Valid, just uninteresting.
    fn is_leaf(&self) -> bool {
        self.files().is_empty() && self.subfolders().is_empty()
    }
}

/// A top-level grouping, named by the first folder segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub files: Vec<FileRecord>,
    pub subfolders: Vec<SubfolderNode>,
}

/// A nested grouping below a category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct SubfolderNode {
    pub id: String,
    /// Last path segment.
    pub name: String,
    /// Every segment from the category down, joined with `/`.
    pub path: String,
    /// Depth below the category, starting at 1.
    pub level: usize,
    pub files: Vec<FileRecord>,
    pub subfolders: Vec<SubfolderNode>,
}

impl Folder for CategoryNode {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn files(&self) -> &[FileRecord] {
        &self.files
    }
    fn subfolders(&self) -> &[SubfolderNode] {
        &self.subfolders
    }
}
impl Folder for SubfolderNode {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn files(&self) -> &[FileRecord] {
        &self.files
    }
    fn subfolders(&self) -> &[SubfolderNode] {
        &self.subfolders
    }
}

impl CategoryNode {
    /// Copies the category, replacing the file list of every node in the
    /// subtree with `f(files)`. Structure is untouched.
    pub fn map_files(&self, f: &impl Fn(&[FileRecord]) -> Vec<FileRecord>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            description: self.description.clone(),
            files: f(&self.files),
            subfolders: self.subfolders.iter().map(|s| s.map_files(f)).collect(),
        }
    }
}
impl SubfolderNode {
    /// See [`CategoryNode::map_files`].
    pub fn map_files(&self, f: &impl Fn(&[FileRecord]) -> Vec<FileRecord>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            level: self.level,
            files: f(&self.files),
            subfolders: self.subfolders.iter().map(|s| s.map_files(f)).collect(),
        }
    }
}

/// Sibling ordering: case-insensitive first, then case-sensitive so that the
/// order stays total and deterministic.
///
/// Both passes compare code points, not locale collation: `Übersicht` sorts
/// after `Zubehör`.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Converts a name or path into a node id.
///
/// Distinct names can share a slug (`Docs` and `docs`); the tree builder
/// suffixes the later ones.
///
/// Quotation marks are stripped before slugifying to avoid artifacts like
/// leading/trailing hyphens. Names that slugify to nothing (e.g. pure
/// punctuation) keep a lower-cased copy of the original instead.
pub(crate) fn slug(value: &str) -> String {
    use rslug::slugify;
    // Various quotation marks: '"''""„"`«»
    let marks = [
        '\u{0027}', '\u{0022}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201B}', '\u{0060}',
        '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}',
    ];
    let stripped: String = value.chars().filter(|c| !marks.contains(c)).collect();
    let slug = slugify!(&stripped);
    match slug.is_empty() {
        true => value.trim().to_lowercase(),
        false => slug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Docs", "docs")]
    #[case("Docs/Legal/2023", "docs-legal-2023")]
    #[case("\"Quoted\" Name", "quoted-name")]
    #[case("User's Guide", "users-guide")]
    #[case("Legal-Stuff", "legal-stuff")]
    #[case("Legal Stuff", "legal-stuff")]
    fn test_slug(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slug(input), expected);
    }

    #[rstest]
    #[case("apple", "Banana", Ordering::Less)]
    #[case("Banana", "apple", Ordering::Greater)]
    #[case("Docs", "docs", Ordering::Less)]
    #[case("2023", "2024", Ordering::Less)]
    #[case("same", "same", Ordering::Equal)]
    #[case("Übersicht", "Zubehör", Ordering::Greater)]
    fn test_compare_names(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare_names(a, b), expected);
    }

    #[test]
    fn test_empty_node_is_leaf() {
        let node = SubfolderNode {
            id: "a-b".into(),
            name: "b".into(),
            path: "a/b".into(),
            level: 1,
            files: vec![],
            subfolders: vec![],
        };
        assert!(node.is_leaf());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_camel_case() {
        let record = FileRecord::new("h1", "de_Guide.pdf", None, vec!["Docs".into(), "Legal".into()]);
        let node = SubfolderNode {
            id: "docs-legal".into(),
            name: "Legal".into(),
            path: "Docs/Legal".into(),
            level: 1,
            files: vec![record],
            subfolders: vec![],
        };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["path"], "Docs/Legal");
        assert_eq!(value["level"], 1);
        assert_eq!(value["files"][0]["fullFileName"], "de_Guide.pdf");
        assert_eq!(value["files"][0]["languageCode"], "de");
        assert_eq!(value["files"][0]["type"], "pdf");
    }
}
