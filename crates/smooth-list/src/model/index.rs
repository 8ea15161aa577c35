//! Row positions within a sectioned collection.

use std::fmt;

/// The position of a row: a section index and an item index inside it.
///
/// An `IndexPath` is only meaningful against a particular snapshot. Inside a
/// [`Changeset`](crate::diff::Changeset), source-side paths refer to the old
/// snapshot and destination-side paths refer to the new one.
///
/// Paths order by section first, then by item, which is also the visual
/// top-to-bottom order of rows.
///
/// # Example
///
/// ```
/// use smooth_list::model::IndexPath;
///
/// let path = IndexPath::new(1, 4);
/// assert_eq!(path.section(), 1);
/// assert_eq!(path.item(), 4);
/// assert!(IndexPath::new(0, 9) < path);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IndexPath {
    section: usize,
    item: usize,
}

impl IndexPath {
    /// Creates a path for the given section and item.
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// The section index.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// The item (row) index within the section.
    #[inline]
    pub const fn item(&self) -> usize {
        self.item
    }

    /// The path of the same item in another section.
    pub const fn with_section(self, section: usize) -> Self {
        Self {
            section,
            item: self.item,
        }
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_visual_order() {
        let mut paths = vec![
            IndexPath::new(1, 0),
            IndexPath::new(0, 2),
            IndexPath::new(0, 0),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                IndexPath::new(0, 0),
                IndexPath::new(0, 2),
                IndexPath::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_display_and_conversion() {
        let path: IndexPath = (2, 3).into();
        assert_eq!(path.to_string(), "(2, 3)");
        assert_eq!(path.with_section(0), IndexPath::new(0, 3));
    }
}
