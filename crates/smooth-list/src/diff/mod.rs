//! Changeset computation.
//!
//! [`compute`] reconciles two [`Collection`](crate::model::Collection)
//! snapshots by identity and returns a [`Changeset`] that the applier can
//! replay as one batch update.

mod changeset;
mod engine;

pub use changeset::{ChangeCounts, Changeset, ItemMove, SectionMove};
pub use engine::compute;
