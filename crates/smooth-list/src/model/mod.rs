//! The sectioned data model.
//!
//! A [`Collection`] is an ordered list of sections, each holding ordered
//! rows. Sections implement [`ListSection`] and rows implement [`ListItem`];
//! both are keyed by a stable identity that the diff engine matches across
//! snapshots.

mod collection;
mod index;
mod item;
mod section;

pub use collection::Collection;
pub use index::IndexPath;
pub use item::{ItemFlags, ListItem};
pub use section::{EmptySection, ListSection, SectionModel};
