//! Finding a file by hash and the ancestors that must be revealed to show it.
//!
//! Hashes are expected to be unique across the manifest. When they aren't,
//! the first match in traversal order wins: categories in tree order, and at
//! each node its own files before its subfolders (depth-first). The answer is
//! the same on every call for the same tree.

use crate::node::{CategoryNode, Folder};

/// Ordered node ids from a category down to the node that holds the file,
/// followed by the file's hash.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RevealPath {
    /// Category id first, containing node last. Never empty.
    pub nodes: Vec<String>,
    /// Hash of the located file.
    pub file: String,
}
impl RevealPath {
    pub fn category(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    /// Id of the node that directly contains the file.
    pub fn container(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Node ids followed by the file hash.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str).chain(std::iter::once(self.file.as_str()))
    }

    /// Whether the node with this id has to be expanded to show the file.
    pub fn reveals(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node == id)
    }
}

/// Depth-first search for the first file with `hash`.
pub fn locate(tree: &[CategoryNode], hash: &str) -> Option<RevealPath> {
    let mut trail = Vec::new();
    for category in tree {
        if search(category, hash, &mut trail) {
            return Some(RevealPath { nodes: trail, file: hash.to_string() });
        }
    }
    tracing::debug!(hash, "File not found in catalog");
    None
}

/// Whether the subtree rooted at `node` contains a file with `hash`.
pub fn contains<F: Folder + ?Sized>(node: &F, hash: &str) -> bool {
    node.files().iter().any(|file| file.hash == hash) || node.subfolders().iter().any(|child| contains(child, hash))
}

fn search<F: Folder + ?Sized>(node: &F, hash: &str, trail: &mut Vec<String>) -> bool {
    trail.push(node.id().to_string());
    if node.files().iter().any(|file| file.hash == hash) {
        return true;
    }
    if node.subfolders().iter().any(|child| search(child, hash, trail)) {
        return true;
    }
    trail.pop();
    false
}
