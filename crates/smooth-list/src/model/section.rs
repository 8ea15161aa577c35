//! Sections: identity-keyed groups of rows.

use std::fmt::Debug;
use std::hash::Hash;

/// The value describing a section (what its header and footer render from).
///
/// Two sections are *the same section* across snapshots when their
/// [`id`](ListSection::id)s are equal, whatever their contents.
pub trait ListSection: Clone + PartialEq + 'static {
    /// The identity type.
    type Id: Clone + Eq + Hash + Debug + 'static;

    /// Returns the stable identity of this section.
    fn id(&self) -> Self::Id;

    /// Title shown for this section in the list's fast-scroll index.
    ///
    /// Sections returning `None` are left out of the index.
    fn index_title(&self) -> Option<String> {
        None
    }
}

/// A section with no identity of its own, for flat lists.
///
/// See [`Collection::single_section`](super::Collection::single_section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EmptySection;

impl ListSection for EmptySection {
    type Id = ();

    fn id(&self) {}
}

/// One section of a snapshot: the section value and its ordered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionModel<S, I> {
    /// The section value.
    pub section: S,
    /// The rows of the section, in display order.
    pub items: Vec<I>,
}

impl<S, I> SectionModel<S, I> {
    /// Creates a section with the given rows.
    pub fn new(section: S, items: Vec<I>) -> Self {
        Self { section, items }
    }

    /// Number of rows in the section.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: ListSection, I> SectionModel<S, I> {
    /// The identity of the section.
    pub fn id(&self) -> S::Id {
        self.section.id()
    }
}
