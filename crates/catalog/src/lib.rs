//! Hierarchical, language-aware media catalog.
//!
//! Turns the flat [`FileRecord`]s of a manifest into a tree of
//! [`CategoryNode`]s and [`SubfolderNode`]s, then answers the questions a
//! catalog UI asks on every interaction:
//!
//! - which language variants to show for the current [`Selection`]
//!   ([`LanguageFilter`]),
//! - how many files each node holds ([`count_files`], [`summarize`]),
//! - where a deep-linked file lives ([`locate`]).
//!
//! Everything here is a pure function of its inputs. The tree is built once
//! per manifest; a language change only produces a new [`View`].
//!
//! ```
//! use mediacenter_catalog::{Catalog, LanguageFilter, Selection};
//! use mediacenter_manifest::FileRecord;
//!
//! let records = vec![
//!     FileRecord::new("h1", "Guide.pdf", "en".parse().ok(), vec!["Docs".into()]),
//!     FileRecord::new("h1", "Guide.pdf", "de".parse().ok(), vec!["Docs".into()]),
//! ];
//! let catalog = Catalog::new(&records, &[]);
//! let view = catalog.view(&LanguageFilter::default(), &"fr".parse::<Selection>().unwrap());
//! assert_eq!(view.count(), 1);
//! assert_eq!(view.categories[0].files[0].language.as_ref().unwrap(), "en");
//! ```

mod aggregate;
mod build;
pub mod error;
mod languages;
mod locate;
mod meta;
mod node;
mod resolve;

pub use crate::aggregate::{CategorySummary, count_files, prune_empty, summarize};
pub use crate::build::build;
pub use crate::languages::{
    ALL_LANGUAGES_LABEL, LanguageOption, device_language, initial_selection, language_options, present_languages,
};
pub use crate::locate::{RevealPath, contains, locate};
pub use crate::meta::{MergedMeta, merge};
pub use crate::node::{CategoryNode, Folder, SubfolderNode};
pub use crate::resolve::{GroupKey, LanguageFilter, Policy, Selection};
use mediacenter_manifest::FileRecord;
use mediacenter_manifest::models::{CategoryMeta, LanguageCode, LanguageTable};
use tracing::instrument;

/// A catalog built from one manifest.
///
/// Holds the unfiltered tree and the languages present in the manifest. It
/// is immutable; rebuild it when the manifest or category metadata changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tree: Vec<CategoryNode>,
    languages: Vec<LanguageCode>,
}
impl Catalog {
    pub fn new(records: &[FileRecord], category_meta: &[CategoryMeta]) -> Self {
        Self {
            tree: build(records, category_meta),
            languages: present_languages(records.iter().filter(|r| r.is_placeable())),
        }
    }

    /// The full tree, every language variant included.
    pub fn tree(&self) -> &[CategoryNode] {
        &self.tree
    }

    /// Language codes present in the catalog, in manifest order.
    pub fn languages(&self) -> &[LanguageCode] {
        &self.languages
    }

    /// Filters the tree for a language selection.
    #[instrument(skip(self, filter))]
    pub fn view(&self, filter: &LanguageFilter, selection: &Selection) -> View {
        let view = View {
            selection: selection.clone(),
            categories: filter.filter_tree(&self.tree, selection),
        };
        tracing::debug!(files = view.count(), "Resolved catalog view");
        view
    }

    /// Finds a file in the unfiltered tree.
    pub fn locate(&self, hash: &str) -> Option<RevealPath> {
        locate(&self.tree, hash)
    }

    /// Picker options for this catalog's languages.
    pub fn language_options(
        &self,
        preferred: Option<&LanguageCode>,
        default: &LanguageCode,
        table: &LanguageTable,
    ) -> Vec<LanguageOption> {
        language_options(&self.languages, preferred, default, table)
    }
}

/// The catalog as seen under one [`Selection`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct View {
    pub selection: Selection,
    pub categories: Vec<CategoryNode>,
}
impl View {
    /// Files visible across every category.
    pub fn count(&self) -> usize {
        self.categories.iter().map(|c| count_files(c)).sum()
    }

    /// Nothing at all to show for this selection.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn summaries(&self) -> Vec<CategorySummary> {
        summarize(&self.categories)
    }

    /// Drops subfolders left empty by language filtering.
    pub fn pruned(self) -> Self {
        Self {
            categories: prune_empty(&self.categories),
            selection: self.selection,
        }
    }

    /// Finds a file among the files visible in this view.
    pub fn locate(&self, hash: &str) -> Option<RevealPath> {
        locate(&self.categories, hash)
    }
}
