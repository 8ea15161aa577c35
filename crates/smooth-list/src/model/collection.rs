//! Sectioned collections, the snapshots the list diffs and renders.

use std::collections::{HashMap, HashSet};

use super::index::IndexPath;
use super::item::ListItem;
use super::section::{EmptySection, ListSection, SectionModel};
use crate::error::{Error, IdentityScope, Result};

/// An ordered sequence of sections, each holding ordered rows.
///
/// A collection is a snapshot: the caller builds a new one on every state
/// change (load more, refresh, filter, delete) and hands it to the list.
///
/// # Invariants
///
/// Section identities are unique within the collection, and item identities
/// are unique within the whole collection (not just within a section).
/// Construction does not enforce this; [`validate`](Self::validate) checks
/// it, and the diff engine refuses snapshots that break it.
///
/// # Example
///
/// ```
/// use smooth_list::model::{Collection, ListItem};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Fruit(&'static str);
///
/// impl ListItem for Fruit {
///     type Id = &'static str;
///     fn id(&self) -> &'static str {
///         self.0
///     }
/// }
///
/// let list = Collection::single_section(vec![Fruit("apple"), Fruit("pear")]);
/// assert_eq!(list.section_count(), 1);
/// assert_eq!(list.item_count(), 2);
/// assert!(list.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<S, I> {
    sections: Vec<SectionModel<S, I>>,
}

impl<S, I> Default for Collection<S, I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S, I> Collection<S, I> {
    /// Creates a collection from sections.
    pub fn new(sections: Vec<SectionModel<S, I>>) -> Self {
        Self { sections }
    }

    /// Creates a collection with no sections.
    pub const fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Builds a collection from `(section, items)` pairs.
    pub fn from_pairs<P>(pairs: P) -> Self
    where
        P: IntoIterator<Item = (S, Vec<I>)>,
    {
        Self {
            sections: pairs
                .into_iter()
                .map(|(section, items)| SectionModel::new(section, items))
                .collect(),
        }
    }

    /// The sections, in display order.
    pub fn sections(&self) -> &[SectionModel<S, I>] {
        &self.sections
    }

    /// Consumes the collection, returning its sections.
    pub fn into_sections(self) -> Vec<SectionModel<S, I>> {
        self.sections
    }

    /// Appends a section.
    pub fn push_section(&mut self, section: S, items: Vec<I>) {
        self.sections.push(SectionModel::new(section, items));
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the collection has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of rows across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(SectionModel::len).sum()
    }

    /// Number of rows in a section, or `None` if the section doesn't exist.
    pub fn row_count(&self, section: usize) -> Option<usize> {
        self.sections.get(section).map(SectionModel::len)
    }

    /// The section at `index`.
    pub fn section(&self, index: usize) -> Option<&SectionModel<S, I>> {
        self.sections.get(index)
    }

    /// The item at `path`.
    pub fn item(&self, path: IndexPath) -> Option<&I> {
        self.sections
            .get(path.section())
            .and_then(|section| section.items.get(path.item()))
    }

    /// The path of the last row of the last section.
    ///
    /// Returns `None` when the collection is empty or its last section has
    /// no rows.
    pub fn last_index_path(&self) -> Option<IndexPath> {
        let section = self.sections.len().checked_sub(1)?;
        let item = self.sections[section].items.len().checked_sub(1)?;
        Some(IndexPath::new(section, item))
    }

    /// Returns `true` if `path` is the last row of the last section.
    pub fn is_last_index_path(&self, path: IndexPath) -> bool {
        self.last_index_path() == Some(path)
    }

    /// Iterates over every row with its path, in display order.
    pub fn iter_items(&self) -> impl Iterator<Item = (IndexPath, &I)> + '_ {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(s, section)| {
                section
                    .items
                    .iter()
                    .enumerate()
                    .map(move |(i, item)| (IndexPath::new(s, i), item))
            })
    }
}

impl<I> Collection<EmptySection, I> {
    /// Wraps a flat list of rows in a single identity-less section.
    pub fn single_section(items: Vec<I>) -> Self {
        Self::new(vec![SectionModel::new(EmptySection, items)])
    }
}

impl<S: ListSection, I: ListItem> Collection<S, I> {
    /// Checks the identity-uniqueness invariants.
    ///
    /// Fails with [`Error::DuplicateIdentity`] naming the first repeated
    /// section identity, or else the first repeated item identity.
    pub fn validate(&self) -> Result<()> {
        self.section_positions()?;
        self.item_positions()?;
        Ok(())
    }

    /// Maps each section identity to its index.
    pub(crate) fn section_positions(&self) -> Result<HashMap<S::Id, usize>> {
        let mut positions = HashMap::with_capacity(self.sections.len());
        for (index, section) in self.sections.iter().enumerate() {
            let id = section.id();
            if positions.contains_key(&id) {
                return Err(Error::duplicate(IdentityScope::Section, &id));
            }
            positions.insert(id, index);
        }
        Ok(positions)
    }

    /// Maps each item identity to its path.
    pub(crate) fn item_positions(&self) -> Result<HashMap<I::Id, IndexPath>> {
        let mut positions = HashMap::with_capacity(self.item_count());
        for (path, item) in self.iter_items() {
            let id = item.id();
            if positions.contains_key(&id) {
                return Err(Error::duplicate(IdentityScope::Item, &id));
            }
            positions.insert(id, path);
        }
        Ok(positions)
    }

    /// The position of the section with the given identity.
    pub fn position_of_section(&self, id: &S::Id) -> Option<usize> {
        self.sections.iter().position(|section| &section.id() == id)
    }

    /// The path of the item with the given identity.
    pub fn position_of_item(&self, id: &I::Id) -> Option<IndexPath> {
        self.iter_items()
            .find(|(_, item)| &item.id() == id)
            .map(|(path, _)| path)
    }

    /// Index titles of the sections that provide one, in display order.
    pub fn index_titles(&self) -> Vec<String> {
        self.sections
            .iter()
            .filter_map(|section| section.section.index_title())
            .collect()
    }

    /// The section identities, in display order.
    pub fn section_ids(&self) -> Vec<S::Id> {
        self.sections.iter().map(SectionModel::id).collect()
    }

    /// Returns a copy keeping only the rows matching `keep`.
    ///
    /// Sections left without rows are kept. This is the building block for
    /// caller-side search filtering.
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&I) -> bool,
    {
        Self {
            sections: self
                .sections
                .iter()
                .map(|section| SectionModel {
                    section: section.section.clone(),
                    items: section.items.iter().filter(|i| keep(i)).cloned().collect(),
                })
                .collect(),
        }
    }

    /// Identity of every row, grouped by section.
    pub fn identity_shape(&self) -> Vec<(S::Id, Vec<I::Id>)> {
        self.sections
            .iter()
            .map(|section| (section.id(), section.items.iter().map(I::id).collect()))
            .collect()
    }

    /// Returns `true` if any identity repeats.
    pub fn has_duplicates(&self) -> bool {
        let mut sections = HashSet::new();
        let mut items = HashSet::new();
        for section in &self.sections {
            if !sections.insert(section.id()) {
                return true;
            }
            for item in &section.items {
                if !items.insert(item.id()) {
                    return true;
                }
            }
        }
        false
    }
}
