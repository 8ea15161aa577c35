//! Core infrastructure for smooth-list.
//!
//! This crate provides the UI-thread plumbing the list component is built on:
//!
//! - **Signals**: callback hooks for list events (load-more, refresh, row deleted)
//! - **Properties**: change-detecting value cells and edge triggers
//! - **Update queue**: ordered delivery of snapshots produced off the UI thread
//! - **Thread affinity**: checks that list operations stay on the UI thread
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Example
//!
//! ```
//! use smooth_list_core::{Property, Signal};
//!
//! struct SearchField {
//!     text: Property<String>,
//!     text_changed: Signal<String>,
//! }
//!
//! impl SearchField {
//!     fn set_text(&self, text: &str) {
//!         if self.text.set(text.to_string()) {
//!             self.text_changed.emit(text.to_string());
//!         }
//!     }
//! }
//!
//! let field = SearchField { text: Property::default(), text_changed: Signal::new() };
//! field.text_changed.connect(|text| println!("filter by {text}"));
//! field.set_text("emp");
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod queue;
pub mod signal;
pub mod thread_check;

pub use error::{Error, Result};
pub use logging::PerfSpan;
pub use property::{EdgeTrigger, Property};
pub use queue::{UpdateId, UpdateQueue, UpdateSender};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
