//! Row items and their capabilities.

use std::fmt::Debug;
use std::hash::Hash;

/// Flags indicating what a user may do with a row.
///
/// Capabilities are declared per item through [`ListItem::flags`], never
/// probed at runtime. The default is enabled, not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemFlags {
    /// Row can be edited; editable rows expose a swipe-to-delete action.
    pub editable: bool,
    /// Row accepts interaction. Disabled rows reveal no swipe actions.
    pub enabled: bool,
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemFlags {
    /// Creates flags with all defaults (enabled only).
    pub const fn new() -> Self {
        Self {
            editable: false,
            enabled: true,
        }
    }

    /// Creates flags for an editable row.
    pub const fn editable() -> Self {
        Self {
            editable: true,
            enabled: true,
        }
    }

    /// Creates flags for a disabled row.
    pub const fn disabled() -> Self {
        Self {
            editable: false,
            enabled: false,
        }
    }

    /// Sets the editable flag.
    pub const fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Sets the enabled flag.
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A row of a sectioned list.
///
/// Two items are *the same item* when their [`id`](ListItem::id)s are equal,
/// and *unchanged* when additionally the whole values compare equal. Item
/// identities must be unique across the entire collection, not only within
/// their section.
///
/// # Example
///
/// ```
/// use smooth_list::model::{ItemFlags, ListItem};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Employee {
///     id: u32,
///     name: String,
///     can_edit: bool,
/// }
///
/// impl ListItem for Employee {
///     type Id = u32;
///
///     fn id(&self) -> u32 {
///         self.id
///     }
///
///     fn flags(&self) -> ItemFlags {
///         ItemFlags::new().with_editable(self.can_edit)
///     }
/// }
/// ```
pub trait ListItem: Clone + PartialEq + 'static {
    /// The identity type.
    type Id: Clone + Eq + Hash + Debug + 'static;

    /// Returns the stable identity of this item.
    fn id(&self) -> Self::Id;

    /// Returns the capabilities of this item.
    fn flags(&self) -> ItemFlags {
        ItemFlags::new()
    }

    /// Convenience for `flags().editable`.
    fn can_edit(&self) -> bool {
        self.flags().editable
    }

    /// Convenience for `flags().enabled`.
    fn is_enabled(&self) -> bool {
        self.flags().enabled
    }
}
