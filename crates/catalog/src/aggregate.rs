//! Recursive counts and per-category summaries.
//!
//! Counting knows nothing about languages: run it on a tree that has already
//! been through [`LanguageFilter::filter_tree`](crate::LanguageFilter::filter_tree).

use crate::node::{CategoryNode, Folder, SubfolderNode};

/// Number of files in `node` and all of its descendants.
pub fn count_files<F: Folder + ?Sized>(node: &F) -> usize {
    node.files().len() + node.subfolders().iter().map(count_files).sum::<usize>()
}

/// Counts for a single category, as shown in list views.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    /// Files directly in the category.
    pub direct_files: usize,
    /// Files anywhere in the category's subtree.
    pub total_files: usize,
}
impl CategorySummary {
    /// No content for the current selection. Whether to hide the category is
    /// up to the caller.
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }
}

pub fn summarize(tree: &[CategoryNode]) -> Vec<CategorySummary> {
    tree.iter()
        .map(|category| CategorySummary {
            id: category.id.clone(),
            name: category.name.clone(),
            direct_files: category.files.len(),
            total_files: count_files(category),
        })
        .collect()
}

/// Returns a copy of the tree without subfolders whose subtree holds no files.
///
/// Categories themselves are always kept, even when empty.
pub fn prune_empty(tree: &[CategoryNode]) -> Vec<CategoryNode> {
    tree.iter()
        .map(|category| CategoryNode {
            subfolders: prune_subfolders(&category.subfolders),
            ..category.clone()
        })
        .collect()
}

fn prune_subfolders(subfolders: &[SubfolderNode]) -> Vec<SubfolderNode> {
    subfolders
        .iter()
        .filter(|node| count_files(*node) > 0)
        .map(|node| SubfolderNode {
            subfolders: prune_subfolders(&node.subfolders),
            ..node.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use crate::resolve::{LanguageFilter, Policy};
    use mediacenter_manifest::FileRecord;
    use mediacenter_manifest::models::LanguageCode;

    fn record(hash: &str, lang: &str, folders: &[&str]) -> FileRecord {
        FileRecord::new(hash, "file.pdf", LanguageCode::parse_lenient(lang), folders.iter().map(|s| s.to_string()).collect())
    }

    fn sample() -> Vec<CategoryNode> {
        build(
            &[
                record("a", "en", &["Docs"]),
                record("b", "de", &["Docs", "Legal", "2023"]),
                record("c", "en", &["Docs", "Legal", "2024"]),
                record("d", "en", &["Docs", "Legal", "2024"]),
                record("e", "de", &["Media", "Clips"]),
            ],
            &[],
        )
    }

    #[test]
    fn test_count_files_recursive() {
        let tree = sample();
        assert_eq!(count_files(&tree[0]), 4);
        assert_eq!(count_files(&tree[0].subfolders[0]), 3);
        assert_eq!(count_files(&tree[0].subfolders[0].subfolders[1]), 2);
        assert_eq!(count_files(&tree[1]), 1);
    }

    #[test]
    fn test_count_after_filter() {
        let filtered = LanguageFilter::new(Policy::Strict).filter_tree(&sample(), &"de".parse().unwrap());
        let summaries = summarize(&filtered);
        assert_eq!(
            summaries.iter().map(|s| (s.name.as_str(), s.direct_files, s.total_files)).collect::<Vec<_>>(),
            vec![("Docs", 0, 1), ("Media", 0, 1)]
        );
        let filtered = LanguageFilter::new(Policy::Strict).filter_tree(&sample(), &"fr".parse().unwrap());
        assert!(summarize(&filtered).iter().all(CategorySummary::is_empty));
    }

    #[test]
    fn test_prune_empty_keeps_categories() {
        let filtered = LanguageFilter::new(Policy::Strict).filter_tree(&sample(), &"en".parse().unwrap());
        let pruned = prune_empty(&filtered);
        assert_eq!(pruned.len(), 2);
        let legal = &pruned[0].subfolders[0];
        assert_eq!(legal.subfolders.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["2024"]);
        assert!(pruned[1].subfolders.is_empty());
        assert_eq!(count_files(&pruned[1]), 0);
        for (before, after) in filtered.iter().zip(&pruned) {
            assert_eq!(count_files(before), count_files(after));
        }
    }

    #[test]
    fn test_empty_leaf_counts_zero() {
        let node = CategoryNode {
            id: "empty".into(),
            name: "Empty".into(),
            icon: None,
            description: None,
            files: vec![],
            subfolders: vec![],
        };
        assert_eq!(count_files(&node), 0);
        assert!(summarize(std::slice::from_ref(&node))[0].is_empty());
        assert_eq!(prune_empty(std::slice::from_ref(&node)), vec![node]);
    }
}
