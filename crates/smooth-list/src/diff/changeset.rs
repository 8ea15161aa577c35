//! The delta between two collection snapshots.

use std::fmt;

use crate::model::IndexPath;

/// A section that changed position.
///
/// `from` is the index in the old snapshot, `to` the index in the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionMove {
    pub from: usize,
    pub to: usize,
}

/// An item that changed position inside its (surviving) section.
///
/// `from` resolves against the old snapshot and `to` against the new one.
/// Both paths always name the same section identity; cross-section moves are
/// expressed as a deletion plus an insertion instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemMove {
    pub from: IndexPath,
    pub to: IndexPath,
}

/// Per-category operation counts of a [`Changeset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeCounts {
    pub deleted_sections: usize,
    pub inserted_sections: usize,
    pub moved_sections: usize,
    pub deleted_items: usize,
    pub inserted_items: usize,
    pub updated_items: usize,
    pub moved_items: usize,
}

impl ChangeCounts {
    /// Total number of operations.
    pub fn total(&self) -> usize {
        self.deleted_sections
            + self.inserted_sections
            + self.moved_sections
            + self.deleted_items
            + self.inserted_items
            + self.updated_items
            + self.moved_items
    }
}

/// The operations that turn an old snapshot into a new one.
///
/// Indices follow batch-update semantics: deletions, updates and move
/// sources are positions in the *old* snapshot; insertions and move targets
/// are positions in the *new* snapshot. Each list is ordered so it can be
/// replayed without recomputing indices:
///
/// | List | Order |
/// |---|---|
/// | `deleted_sections`, `deleted_items` | descending |
/// | `inserted_sections`, `inserted_items`, `updated_items` | ascending |
/// | `moved_sections`, `moved_items` | ascending by target |
///
/// A changeset is produced by [`compute`](super::compute) and consumed by
/// [`apply`](crate::view::apply).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Changeset {
    pub deleted_sections: Vec<usize>,
    pub inserted_sections: Vec<usize>,
    pub moved_sections: Vec<SectionMove>,
    pub deleted_items: Vec<IndexPath>,
    pub inserted_items: Vec<IndexPath>,
    pub updated_items: Vec<IndexPath>,
    pub moved_items: Vec<ItemMove>,
}

impl Changeset {
    /// Creates an empty changeset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the changeset contains no operation of any kind.
    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }

    /// Returns `true` if the changeset changes section or row counts.
    pub fn changes_counts(&self) -> bool {
        !(self.deleted_sections.is_empty()
            && self.inserted_sections.is_empty()
            && self.deleted_items.is_empty()
            && self.inserted_items.is_empty())
    }

    /// Operation counts per category.
    pub fn counts(&self) -> ChangeCounts {
        ChangeCounts {
            deleted_sections: self.deleted_sections.len(),
            inserted_sections: self.inserted_sections.len(),
            moved_sections: self.moved_sections.len(),
            deleted_items: self.deleted_items.len(),
            inserted_items: self.inserted_items.len(),
            updated_items: self.updated_items.len(),
            moved_items: self.moved_items.len(),
        }
    }

    /// Sorts every list into its replay order.
    pub(crate) fn normalize(&mut self) {
        self.deleted_sections.sort_unstable_by(|a, b| b.cmp(a));
        self.inserted_sections.sort_unstable();
        self.moved_sections.sort_unstable_by_key(|m| m.to);
        self.deleted_items.sort_unstable_by(|a, b| b.cmp(a));
        self.inserted_items.sort_unstable();
        self.updated_items.sort_unstable();
        self.moved_items.sort_unstable_by_key(|m| m.to);
    }
}

impl fmt::Display for ChangeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sections -{} +{} ~{}, items -{} +{} *{} ~{}",
            self.deleted_sections,
            self.inserted_sections,
            self.moved_sections,
            self.deleted_items,
            self.inserted_items,
            self.updated_items,
            self.moved_items,
        )
    }
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("no changes")
        } else {
            self.counts().fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_changeset() {
        let changeset = Changeset::new();
        assert!(changeset.is_empty());
        assert!(!changeset.changes_counts());
        assert_eq!(changeset.to_string(), "no changes");
    }

    #[test]
    fn test_normalize_orders_for_replay() {
        let mut changeset = Changeset {
            deleted_sections: vec![0, 3, 1],
            inserted_sections: vec![2, 0],
            deleted_items: vec![IndexPath::new(0, 1), IndexPath::new(1, 0), IndexPath::new(0, 4)],
            inserted_items: vec![IndexPath::new(1, 2), IndexPath::new(0, 3)],
            moved_items: vec![
                ItemMove { from: IndexPath::new(0, 0), to: IndexPath::new(0, 2) },
                ItemMove { from: IndexPath::new(0, 2), to: IndexPath::new(0, 0) },
            ],
            ..Changeset::default()
        };
        changeset.normalize();

        assert_eq!(changeset.deleted_sections, vec![3, 1, 0]);
        assert_eq!(changeset.inserted_sections, vec![0, 2]);
        assert_eq!(
            changeset.deleted_items,
            vec![IndexPath::new(1, 0), IndexPath::new(0, 4), IndexPath::new(0, 1)]
        );
        assert_eq!(
            changeset.inserted_items,
            vec![IndexPath::new(0, 3), IndexPath::new(1, 2)]
        );
        assert_eq!(changeset.moved_items[0].to, IndexPath::new(0, 0));
    }

    #[test]
    fn test_counts_display() {
        let changeset = Changeset {
            inserted_items: vec![IndexPath::new(0, 0), IndexPath::new(0, 1)],
            updated_items: vec![IndexPath::new(0, 3)],
            ..Changeset::default()
        };
        assert_eq!(changeset.counts().total(), 3);
        assert!(changeset.changes_counts());
        assert_eq!(changeset.to_string(), "sections -0 +0 ~0, items -0 +2 *1 ~0");
    }
}
