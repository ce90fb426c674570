//! Grouping flat records into a category tree.
//!
//! Records are first collected into an intermediate map keyed by their full
//! segment path, then frozen into sorted node arrays in a single postorder
//! pass. Nothing outside this module ever sees a partially built tree.

use crate::meta::merge;
use crate::node::{CategoryNode, SubfolderNode, compare_names, slug};
use mediacenter_manifest::FileRecord;
use mediacenter_manifest::models::CategoryMeta;
use std::collections::{HashMap, HashSet};
use tracing::instrument;

/// Builds the catalog tree from manifest records.
///
/// - Records without a folder location are skipped.
/// - Each distinct path prefix becomes exactly one node; subfolders are keyed
///   by their full path, so same-named folders under different parents never
///   collide.
/// - Categories and sibling subfolders are sorted by name; files keep their
///   input order within a node.
/// - Category metadata is merged once per category.
/// - Node ids are unique across the tree. Names that slugify alike (`Docs`
///   and `docs`) get a numeric suffix, handed out in tree order.
///
/// The result depends only on the set of paths and the relative order of
/// records within each folder, never on how folders are interleaved in the
/// input.
#[instrument(skip_all, fields(records = records.len(), metadata = category_meta.len()))]
pub fn build(records: &[FileRecord], category_meta: &[CategoryMeta]) -> Vec<CategoryNode> {
    let mut grouping = Grouping::default();
    for record in records {
        if !record.is_placeable() {
            tracing::debug!(hash = %record.hash, "Record has no folder location; skipping");
            continue;
        }
        grouping.insert(record);
    }
    let tree = grouping.freeze(category_meta);
    tracing::debug!(categories = tree.len(), "Built catalog tree");
    tree
}

#[derive(Default)]
struct Draft {
    files: Vec<FileRecord>,
    /// Full keys of child folders, in first-seen order (sorted on freeze).
    children: Vec<Vec<String>>,
}

#[derive(Default)]
struct Grouping {
    /// Single-segment keys of the categories, in first-seen order.
    roots: Vec<Vec<String>>,
    drafts: HashMap<Vec<String>, Draft>,
}
impl Grouping {
    fn insert(&mut self, record: &FileRecord) {
        let segments = record.folder_location.as_slice();
        for depth in 1..=segments.len() {
            let prefix = &segments[..depth];
            if self.drafts.contains_key(prefix) {
                continue;
            }
            let key = prefix.to_vec();
            match depth {
                1 => self.roots.push(key.clone()),
                _ => {
                    // The parent prefix was visited on the previous iteration.
                    if let Some(parent) = self.drafts.get_mut(&segments[..depth - 1]) {
                        parent.children.push(key.clone());
                    }
                },
            }
            self.drafts.insert(key, Draft::default());
        }
        if let Some(node) = self.drafts.get_mut(segments) {
            node.files.push(record.clone());
        }
    }

    fn freeze(mut self, category_meta: &[CategoryMeta]) -> Vec<CategoryNode> {
        let roots = std::mem::take(&mut self.roots);
        let mut categories: Vec<CategoryNode> = roots
            .into_iter()
            .filter_map(|key| {
                let draft = self.drafts.remove(&key)?;
                let name = key.into_iter().next()?;
                let id = slug(&name);
                let meta = merge(&name, &id, category_meta);
                Some(CategoryNode {
                    subfolders: self.freeze_children(draft.children),
                    files: draft.files,
                    icon: meta.icon,
                    description: meta.description,
                    id,
                    name,
                })
            })
            .collect();
        categories.sort_by(|a, b| compare_names(&a.name, &b.name));
        let mut used = HashSet::new();
        for category in &mut categories {
            category.id = unique_id(&mut used, std::mem::take(&mut category.id));
            unique_ids(&mut used, &mut category.subfolders);
        }
        categories
    }

    fn freeze_children(&mut self, children: Vec<Vec<String>>) -> Vec<SubfolderNode> {
        let mut nodes: Vec<SubfolderNode> = children.into_iter().filter_map(|key| self.freeze_subfolder(key)).collect();
        nodes.sort_by(|a, b| compare_names(&a.name, &b.name));
        nodes
    }

    fn freeze_subfolder(&mut self, key: Vec<String>) -> Option<SubfolderNode> {
        let draft = self.drafts.remove(&key)?;
        // Children are complete (and sorted) before the parent is assembled.
        let subfolders = self.freeze_children(draft.children);
        let path = key.join("/");
        Some(SubfolderNode {
            id: slug(&path),
            name: key.last()?.clone(),
            level: key.len() - 1,
            path,
            files: draft.files,
            subfolders,
        })
    }
}

/// Preorder, so a parent keeps its id ahead of anything below it.
fn unique_ids(used: &mut HashSet<String>, nodes: &mut [SubfolderNode]) {
    for node in nodes {
        node.id = unique_id(used, std::mem::take(&mut node.id));
        unique_ids(used, &mut node.subfolders);
    }
}

fn unique_id(used: &mut HashSet<String>, id: String) -> String {
    if used.insert(id.clone()) {
        return id;
    }
    let mut n = 2;
    loop {
        let unique = format!("{id}-{n}");
        if used.insert(unique.clone()) {
            tracing::debug!(%id, %unique, "Node id already taken");
            return unique;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::count_files;
    use crate::locate::locate;
    use crate::node::Folder;
    use rstest::rstest;

    fn record(hash: &str, folders: &[&str]) -> FileRecord {
        FileRecord::new(hash, format!("{hash}.pdf"), None, folders.iter().map(|s| s.to_string()).collect())
    }

    fn shape(nodes: &[SubfolderNode]) -> Vec<(String, usize, Vec<String>)> {
        nodes
            .iter()
            .map(|n| (n.id.clone(), n.level, n.files.iter().map(|f| f.hash.clone()).collect()))
            .collect()
    }

    #[test]
    fn test_nested_subfolders() {
        let records = vec![record("a", &["Docs", "Legal", "2024"]), record("b", &["Docs", "Legal", "2023"])];
        let tree = build(&records, &[]);
        assert_eq!(tree.len(), 1);
        let docs = &tree[0];
        assert_eq!((docs.id.as_str(), docs.name.as_str()), ("docs", "Docs"));
        assert!(docs.files.is_empty());
        assert_eq!(docs.subfolders.len(), 1);

        let legal = &docs.subfolders[0];
        assert_eq!((legal.path.as_str(), legal.level), ("Docs/Legal", 1));
        let expected: Vec<(String, usize, Vec<String>)> = vec![
            ("docs-legal-2023".to_string(), 2, vec!["b".to_string()]),
            ("docs-legal-2024".to_string(), 2, vec!["a".to_string()]),
        ];
        assert_eq!(shape(&legal.subfolders), expected);
        assert_eq!(legal.subfolders[0].path, "Docs/Legal/2023");
        assert_eq!(count_files(docs), 2);
    }

    #[test]
    fn test_single_segment_goes_to_category() {
        let tree = build(&[record("a", &["Docs"]), record("b", &["Docs"])], &[]);
        assert_eq!(tree[0].files.iter().map(|f| f.hash.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(tree[0].subfolders.is_empty());
    }

    #[test]
    fn test_same_named_subfolders_do_not_collide() {
        let tree = build(&[record("a", &["Docs", "2024"]), record("b", &["Media", "2024"])], &[]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].subfolders[0].id, "docs-2024");
        assert_eq!(tree[0].subfolders[0].files[0].hash, "a");
        assert_eq!(tree[1].subfolders[0].id, "media-2024");
        assert_eq!(tree[1].subfolders[0].files[0].hash, "b");
    }

    #[test]
    fn test_siblings_sorted_case_insensitively() {
        let records = vec![
            record("1", &["zeta"]),
            record("2", &["Alpha"]),
            record("3", &["beta"]),
            record("4", &["Alpha", "videos"]),
            record("5", &["Alpha", "Images"]),
        ];
        let tree = build(&records, &[]);
        assert_eq!(tree.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["Alpha", "beta", "zeta"]);
        assert_eq!(
            tree[0].subfolders.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["Images", "videos"]
        );
    }

    #[test]
    fn test_order_independent() {
        let records = vec![
            record("a", &["Docs", "Legal", "2023"]),
            record("b", &["Media"]),
            record("c", &["Docs", "Manuals"]),
            record("d", &["Docs", "Legal", "2024"]),
            record("e", &["Docs"]),
        ];
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(build(&records, &[]), build(&reversed, &[]));
        let rotated: Vec<_> = records[2..].iter().chain(&records[..2]).cloned().collect();
        assert_eq!(build(&records, &[]), build(&rotated, &[]));
    }

    #[rstest]
    #[case(&["Docs"], &["docs"], vec!["docs", "docs-2"])]
    #[case(&["Legal Stuff"], &["Legal-Stuff"], vec!["legal-stuff", "legal-stuff-2"])]
    fn test_colliding_category_ids(#[case] a: &[&str], #[case] b: &[&str], #[case] expected: Vec<&str>) {
        let tree = build(&[record("b", b), record("a", a)], &[]);
        assert_eq!(tree.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), expected);
        assert_eq!(locate(&tree, "a").unwrap().nodes, vec![expected[0]]);
        assert_eq!(locate(&tree, "b").unwrap().nodes, vec![expected[1]]);
    }

    #[test]
    fn test_subfolder_id_collides_with_category() {
        let records = vec![record("a", &["Docs Legal"]), record("b", &["Docs", "Legal"])];
        let tree = build(&records, &[]);
        assert_eq!(tree[0].subfolders[0].id, "docs-legal");
        assert_eq!(tree[1].id, "docs-legal-2");
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(build(&reversed, &[]), tree);
    }

    #[test]
    fn test_duplicate_hash_kept() {
        let tree = build(&[record("a", &["Docs"]), record("a", &["Docs"])], &[]);
        assert_eq!(tree[0].files.len(), 2);
    }

    #[test]
    fn test_unplaceable_records_skipped() {
        let tree = build(&[record("a", &[]), record("b", &["Docs"])], &[]);
        assert_eq!(tree.len(), 1);
        assert_eq!(count_files(&tree[0]), 1);
        assert!(build(&[record("a", &[])], &[]).is_empty());
    }

    #[test]
    fn test_metadata_merged() {
        let meta = vec![CategoryMeta::new("Docs").with_icon("📄").with_description("Manuals and more")];
        let tree = build(&[record("a", &["Docs"]), record("b", &["Media"])], &meta);
        assert_eq!(tree[0].icon.as_deref(), Some("📄"));
        assert_eq!(tree[0].description.as_deref(), Some("Manuals and more"));
        assert_eq!((tree[1].icon.as_ref(), tree[1].description.as_ref()), (None, None));
    }

    #[test]
    fn test_every_record_lands_at_its_path() {
        let records = vec![
            record("a", &["Docs", "Legal", "2023"]),
            record("b", &["Docs"]),
            record("c", &["Docs", "Legal"]),
            record("d", &["Media", "Clips"]),
        ];
        let tree = build(&records, &[]);
        for r in &records {
            let category = tree.iter().find(|c| c.name == r.folder_location[0]).unwrap();
            let mut files = category.files();
            let mut subfolders = category.subfolders();
            for segment in &r.folder_location[1..] {
                let node = subfolders.iter().find(|s| &s.name == segment).unwrap();
                files = node.files();
                subfolders = node.subfolders();
            }
            assert_eq!(files.iter().filter(|f| f.hash == r.hash).count(), 1);
        }
        let total: usize = tree.iter().map(|c| count_files(c)).sum();
        assert_eq!(total, records.len());
    }
}
