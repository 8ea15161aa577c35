//! The backing arrangement: the snapshot the surface renders, with interned
//! identities.

use std::collections::HashMap;

use slotmap::SlotMap;

use super::surface::{DataSource, RowKey, SectionKey};
use crate::model::{Collection, IndexPath, ListItem, ListSection};

/// The collection currently rendered, keyed for the surface.
///
/// Every section and row identity is interned into a slot key. A snapshot
/// built with [`rearranged`](Self::rearranged) keeps the keys of identities
/// that survive, so the surface can follow rows across updates, and retires
/// the keys of identities that left.
#[derive(Debug, Clone)]
pub struct Arrangement<S: ListSection, I: ListItem> {
    collection: Collection<S, I>,
    section_keys: Vec<SectionKey>,
    row_keys: Vec<Vec<RowKey>>,
    sections: SlotMap<SectionKey, S::Id>,
    rows: SlotMap<RowKey, I::Id>,
    section_lookup: HashMap<S::Id, SectionKey>,
    row_lookup: HashMap<I::Id, RowKey>,
}

impl<S: ListSection, I: ListItem> Default for Arrangement<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ListSection, I: ListItem> Arrangement<S, I> {
    /// An empty arrangement.
    pub fn new() -> Self {
        Self {
            collection: Collection::empty(),
            section_keys: Vec::new(),
            row_keys: Vec::new(),
            sections: SlotMap::with_key(),
            rows: SlotMap::with_key(),
            section_lookup: HashMap::new(),
            row_lookup: HashMap::new(),
        }
    }

    /// An arrangement of `collection` with fresh keys.
    pub fn from_collection(collection: Collection<S, I>) -> Self {
        Self::new().rearranged(collection)
    }

    /// The arrangement of `collection`, reusing this arrangement's keys for
    /// identities present in both.
    ///
    /// `collection` must satisfy the identity-uniqueness invariants.
    pub fn rearranged(&self, collection: Collection<S, I>) -> Self {
        let mut sections = self.sections.clone();
        let mut rows = self.rows.clone();
        let mut section_lookup = HashMap::with_capacity(collection.section_count());
        let mut row_lookup = HashMap::with_capacity(collection.item_count());
        let mut section_keys = Vec::with_capacity(collection.section_count());
        let mut row_keys = Vec::with_capacity(collection.section_count());

        for section in collection.sections() {
            let id = section.id();
            let key = match self.section_lookup.get(&id) {
                Some(&key) => key,
                None => sections.insert(id.clone()),
            };
            section_lookup.insert(id, key);
            section_keys.push(key);

            let mut keys = Vec::with_capacity(section.len());
            for item in &section.items {
                let id = item.id();
                let key = match self.row_lookup.get(&id) {
                    Some(&key) => key,
                    None => rows.insert(id.clone()),
                };
                row_lookup.insert(id, key);
                keys.push(key);
            }
            row_keys.push(keys);
        }

        for (id, key) in &self.section_lookup {
            if !section_lookup.contains_key(id) {
                sections.remove(*key);
            }
        }
        for (id, key) in &self.row_lookup {
            if !row_lookup.contains_key(id) {
                rows.remove(*key);
            }
        }

        Self {
            collection,
            section_keys,
            row_keys,
            sections,
            rows,
            section_lookup,
            row_lookup,
        }
    }

    /// The rendered collection.
    pub fn collection(&self) -> &Collection<S, I> {
        &self.collection
    }

    /// Returns `true` if nothing has been arranged yet.
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// The item at `path` with its section value.
    pub fn entry(&self, path: IndexPath) -> Option<(&S, &I)> {
        let section = self.collection.section(path.section())?;
        let item = section.items.get(path.item())?;
        Some((&section.section, item))
    }

    /// Key of the row with identity `id`.
    pub fn key_of_item(&self, id: &I::Id) -> Option<RowKey> {
        self.row_lookup.get(id).copied()
    }

    /// Key of the section with identity `id`.
    pub fn key_of_section(&self, id: &S::Id) -> Option<SectionKey> {
        self.section_lookup.get(id).copied()
    }

    /// Returns `true` if `key` names a row of this arrangement.
    pub fn contains_row(&self, key: RowKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Returns `true` if `key` names a section of this arrangement.
    pub fn contains_section(&self, key: SectionKey) -> bool {
        self.sections.contains_key(key)
    }
}

impl<S: ListSection, I: ListItem> DataSource for Arrangement<S, I> {
    fn section_count(&self) -> usize {
        self.section_keys.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.row_keys.get(section).map_or(0, Vec::len)
    }

    fn section_key(&self, section: usize) -> Option<SectionKey> {
        self.section_keys.get(section).copied()
    }

    fn row_key(&self, path: IndexPath) -> Option<RowKey> {
        self.row_keys
            .get(path.section())
            .and_then(|rows| rows.get(path.item()))
            .copied()
    }
}
