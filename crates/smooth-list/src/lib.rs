//! A sectioned list component that animates only what changed.
//!
//! smooth-list renders large, sectioned, frequently-changing collections on
//! a cell-recycling list surface. Every new snapshot is diffed against the
//! previous one by identity, and the resulting changeset is replayed as one
//! batch update:
//!
//! - **Model**: [`Collection`](model::Collection)s of sections and rows keyed
//!   by stable identities ([`ListSection`](model::ListSection),
//!   [`ListItem`](model::ListItem))
//! - **Diff**: [`diff::compute`] produces a minimal
//!   [`Changeset`](diff::Changeset) of section and row operations
//! - **View**: the [`ListController`](view::ListController) replays
//!   changesets onto a [`ListSurface`](view::ListSurface), recycles cell
//!   containers and wires load-more, pull-to-refresh, swipe actions and
//!   scroll-to-top
//! - **Facade**: [`SmoothList`] ties it together for callers
//!
//! # Example
//!
//! ```
//! use smooth_list::prelude::*;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Department(&'static str);
//!
//! impl ListSection for Department {
//!     type Id = &'static str;
//!     fn id(&self) -> &'static str {
//!         self.0
//!     }
//! }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Employee(u32);
//!
//! impl ListItem for Employee {
//!     type Id = u32;
//!     fn id(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let data = Collection::from_pairs([
//!     (Department("R&D"), (0..30).map(Employee).collect::<Vec<_>>()),
//! ]);
//! let mut list = SmoothList::builder(|e: &Employee| format!("emp {}", e.0))
//!     .section_header(|d: &Department, rows: &[Employee]| format!("{} ({})", d.0, rows.len()))
//!     .data(data)
//!     .build();
//!
//! let loads = Arc::new(AtomicUsize::new(0));
//! let counter = loads.clone();
//! list.signals().load_more.connect(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! list.appear(HeadlessList::new().with_viewport(10)).unwrap();
//! list.controller_mut().surface_mut().unwrap().scroll_to_bottom();
//! list.layout_cells().unwrap();
//! assert_eq!(loads.load(Ordering::SeqCst), 1);
//! ```

pub mod config;
pub mod diff;
mod error;
pub mod list;
pub mod model;
pub mod style;
pub mod view;

pub use error::{Error, IdentityScope, IndexKind, Result};
pub use list::{PendingReport, SmoothList, SmoothListBuilder};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::{
        AnimationConfiguration, Color, EdgeInsets, EditConfiguration, ListConfiguration,
        RowAnimation, SeparatorConfiguration,
    };
    pub use crate::diff::{ChangeCounts, Changeset, compute};
    pub use crate::list::{PendingReport, SmoothList};
    pub use crate::model::{Collection, EmptySection, IndexPath, ItemFlags, ListItem, ListSection};
    pub use crate::style::ListStyle;
    pub use crate::view::{
        ApplyOutcome, ConsistencyPolicy, HeadlessList, ListSurface, RefreshMode, RowDeletion,
        SwipeAction, SwipeEdge,
    };
    pub use crate::{Error, Result};
}
