//! The caller-facing list component.
//!
//! [`SmoothList`] holds the caller's current [`Collection`], diffs every new
//! snapshot against the one it last rendered and hands the changeset to its
//! [`ListController`]. Snapshots produced off the UI thread (by load-more or
//! refresh work) are posted through an [`UpdateSender`] and processed in
//! arrival order by [`SmoothList::process_pending`].
//!
//! # Example
//!
//! ```
//! use smooth_list::prelude::*;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Employee {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl ListItem for Employee {
//!     type Id = u32;
//!     fn id(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! let page = |range: std::ops::Range<u32>| {
//!     Collection::single_section(
//!         range.map(|id| Employee { id, name: format!("emp {id}") }).collect(),
//!     )
//! };
//!
//! let mut list = SmoothList::builder(|employee: &Employee| employee.name.clone())
//!     .data(page(0..20))
//!     .build();
//! list.appear(HeadlessList::new()).unwrap();
//!
//! let outcome = list.set_data(page(0..40)).unwrap();
//! assert!(matches!(outcome, ApplyOutcome::Animated(counts) if counts.inserted_items == 20));
//! ```

use std::marker::PhantomData;

use smooth_list_core::logging::targets;
use smooth_list_core::{EdgeTrigger, Property, ThreadAffinity, UpdateQueue, UpdateSender};

use crate::config::ListConfiguration;
use crate::diff;
use crate::error::{Error, Result};
use crate::model::{Collection, IndexPath, ListItem, ListSection};
use crate::style::ListStyle;
use crate::view::{
    ApplyOutcome, ConsistencyPolicy, ContentProviders, ControllerState, ListController,
    ListSignals, ListSurface, RefreshMode, SwipeAction, SwipeEdge,
};

/// Tally of a [`SmoothList::process_pending`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingReport {
    /// Snapshots that reached the surface.
    pub applied: usize,
    /// Snapshots rejected and skipped, leaving the last rendered state.
    pub skipped: usize,
}

/// Builder for [`SmoothList`].
///
/// The surface type `L` is usually inferred from the surface later passed
/// to [`SmoothList::appear`].
pub struct SmoothListBuilder<S, I, V, L> {
    content: ContentProviders<S, I, V>,
    data: Option<Collection<S, I>>,
    style: ListStyle,
    configuration: ListConfiguration,
    refresh_mode: RefreshMode,
    policy: ConsistencyPolicy,
    searchable: bool,
    surface: PhantomData<fn() -> L>,
}

impl<S: ListSection, I: ListItem, V, L: ListSurface> SmoothListBuilder<S, I, V, L> {
    /// The collection rendered on first appearance.
    pub fn data(mut self, data: Collection<S, I>) -> Self {
        self.data = Some(data);
        self
    }

    /// Render a header above every section.
    pub fn section_header<F>(mut self, header: F) -> Self
    where
        F: Fn(&S, &[I]) -> V + 'static,
    {
        self.content = self.content.with_header(header);
        self
    }

    /// Render a footer below every section.
    pub fn section_footer<F>(mut self, footer: F) -> Self
    where
        F: Fn(&S, &[I]) -> V + 'static,
    {
        self.content = self.content.with_footer(footer);
        self
    }

    pub fn style(mut self, style: ListStyle) -> Self {
        self.style = style;
        self
    }

    pub fn configuration(mut self, configuration: ListConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn refresh_mode(mut self, mode: RefreshMode) -> Self {
        self.refresh_mode = mode;
        self
    }

    /// Set how changesets that do not fit the surface are handled.
    pub fn consistency_policy(mut self, policy: ConsistencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable the search field.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn build(self) -> SmoothList<S, I, V, L> {
        let controller = ListController::new(self.content)
            .with_style(self.style)
            .with_configuration(self.configuration)
            .with_refresh_mode(self.refresh_mode)
            .with_consistency_policy(self.policy);
        SmoothList {
            controller,
            staged: self.data.unwrap_or_default(),
            queue: UpdateQueue::new(),
            style: Property::new(self.style),
            search_text: Property::new(String::new()),
            searchable: self.searchable,
            scroll_trigger: EdgeTrigger::new(),
            affinity: ThreadAffinity::current(),
        }
    }
}

/// A sectioned list that animates the difference between the snapshots it
/// is given.
pub struct SmoothList<S: ListSection, I: ListItem, V, L: ListSurface> {
    controller: ListController<S, I, V, L>,
    /// Data handed over before the list appeared.
    staged: Collection<S, I>,
    queue: UpdateQueue<Collection<S, I>>,
    style: Property<ListStyle>,
    search_text: Property<String>,
    searchable: bool,
    scroll_trigger: EdgeTrigger,
    affinity: ThreadAffinity,
}

impl<S: ListSection, I: ListItem, V, L: ListSurface> SmoothList<S, I, V, L> {
    /// Start building a list whose rows render with `cell`.
    pub fn builder<F>(cell: F) -> SmoothListBuilder<S, I, V, L>
    where
        F: Fn(&I) -> V + 'static,
    {
        SmoothListBuilder {
            content: ContentProviders::new(cell),
            data: None,
            style: ListStyle::default(),
            configuration: ListConfiguration::default(),
            refresh_mode: RefreshMode::default(),
            policy: ConsistencyPolicy::default(),
            searchable: false,
            surface: PhantomData,
        }
    }

    /// Attaches `surface` and populates it with the current data.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the list already appeared, or
    /// [`Error::DuplicateIdentity`] if the current data repeats an identity.
    /// The surface stays bound and empty in the latter case.
    pub fn appear(&mut self, surface: L) -> Result<ApplyOutcome> {
        self.affinity.debug_assert_same_thread();
        self.controller.bind(surface)?;
        let data = std::mem::take(&mut self.staged);
        tracing::debug!(
            target: targets::FACADE,
            sections = data.section_count(),
            rows = data.item_count(),
            "list appearing"
        );
        self.update(data)
    }

    /// Tears the list down and returns its surface.
    ///
    /// Senders taken from [`sender`](Self::sender) are disconnected and
    /// snapshots still pending are dropped.
    pub fn disappear(&mut self) -> Option<L> {
        self.affinity.debug_assert_same_thread();
        let dropped = self.queue.close();
        if dropped > 0 {
            tracing::debug!(target: targets::FACADE, dropped, "pending updates dropped on teardown");
        }
        self.controller.tear_down()
    }

    /// Replaces the data, animating the difference from what is on screen.
    ///
    /// Snapshots already posted through [`sender`](Self::sender) are
    /// processed first so updates are applied in the order they arrived.
    /// Before the list appears, the data is only stored.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateIdentity`] if `data` repeats an identity. The
    /// snapshot is skipped and the last rendered state stays on screen.
    pub fn set_data(&mut self, data: Collection<S, I>) -> Result<ApplyOutcome> {
        self.affinity.debug_assert_same_thread();
        match self.controller.state() {
            ControllerState::Uninitialized => {
                data.validate()?;
                self.staged = data;
                return Ok(ApplyOutcome::Unchanged);
            }
            ControllerState::TornDown => {
                return Err(Error::InvalidState {
                    state: ControllerState::TornDown,
                    operation: "set data",
                });
            }
            ControllerState::Bound | ControllerState::Live => {}
        }
        self.process_pending()?;
        self.update(data)
    }

    fn update(&mut self, data: Collection<S, I>) -> Result<ApplyOutcome> {
        // The retained snapshot is read here and only replaced by the apply.
        let changeset = match diff::compute(self.controller.collection(), &data) {
            Ok(changeset) => changeset,
            Err(err) => {
                tracing::error!(
                    target: targets::FACADE,
                    error = %err,
                    "skipping snapshot, keeping the last rendered state"
                );
                return Err(err);
            }
        };
        tracing::debug!(target: targets::FACADE, changes = %changeset, "snapshot diffed");
        self.controller.apply(data, &changeset)
    }

    /// A handle for posting snapshots from other threads.
    pub fn sender(&self) -> UpdateSender<Collection<S, I>> {
        self.queue.sender()
    }

    /// Number of posted snapshots not yet processed.
    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    /// Applies every posted snapshot, one full diff and apply each, in
    /// arrival order.
    ///
    /// Snapshots that repeat an identity or no longer fit the surface are
    /// skipped and counted.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the list has not appeared or was torn
    /// down; the snapshots stay queued.
    pub fn process_pending(&mut self) -> Result<PendingReport> {
        self.affinity.debug_assert_same_thread();
        let mut report = PendingReport::default();
        if !self.queue.has_pending() {
            return Ok(report);
        }
        match self.controller.state() {
            ControllerState::Bound | ControllerState::Live => {}
            state => {
                return Err(Error::InvalidState {
                    state,
                    operation: "process pending updates",
                });
            }
        }

        while let Some((id, data)) = self.queue.try_next() {
            match self.update(data) {
                Ok(_) => report.applied += 1,
                Err(err) if err.is_desync() || matches!(err, Error::DuplicateIdentity { .. }) => {
                    tracing::warn!(target: targets::FACADE, update = id.as_u64(), error = %err, "update skipped");
                    report.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }

    /// The collection currently rendered, or the staged data before the
    /// list appeared.
    pub fn data(&self) -> &Collection<S, I> {
        if self.controller.state() == ControllerState::Uninitialized {
            &self.staged
        } else {
            self.controller.collection()
        }
    }

    pub fn signals(&self) -> &ListSignals<S, I> {
        self.controller.signals()
    }

    pub fn controller(&self) -> &ListController<S, I, V, L> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ListController<S, I, V, L> {
        &mut self.controller
    }

    pub fn style(&self) -> ListStyle {
        self.style.get()
    }

    /// Switches the presentation style. Swipe actions are kept.
    pub fn set_style(&mut self, style: ListStyle) -> Result<()> {
        if !self.style.set(style) {
            return Ok(());
        }
        let configuration = self.controller.configuration().clone();
        self.controller.update_layout(style, configuration)
    }

    /// Replaces the separator, edit and animation settings.
    pub fn set_configuration(&mut self, configuration: ListConfiguration) -> Result<()> {
        self.controller.update_layout(self.style.get(), configuration)
    }

    /// Installs custom swipe actions on `edge`.
    pub fn set_swipe_actions<F>(&mut self, edge: SwipeEdge, allow_full_swipe: bool, provider: F) -> Result<()>
    where
        F: Fn(IndexPath, &I) -> Vec<SwipeAction> + Send + Sync + 'static,
    {
        self.controller.set_swipe_actions(edge, allow_full_swipe, provider)
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn search_text(&self) -> String {
        self.search_text.get()
    }

    /// Updates the search text, as typed in the search field.
    ///
    /// Fires [`ListSignals::search_text_changed`] when the text changed.
    /// Filtering the data is left to the slots: they post the filtered
    /// collection through a [`sender`](Self::sender), and the next
    /// [`process_pending`](Self::process_pending) renders it. Returns
    /// `false` and does nothing if the list is not searchable.
    pub fn set_search_text(&self, text: impl Into<String>) -> bool {
        if !self.searchable {
            return false;
        }
        let text = text.into();
        if !self.search_text.set(text.clone()) {
            return false;
        }
        tracing::debug!(target: targets::FACADE, %text, "search text changed");
        self.signals().search_text_changed.emit(text);
        true
    }

    /// Scrolls to the top when `trigger` flips from `false` to `true`.
    ///
    /// Returns `true` if this call scrolled.
    pub fn scroll_to_top(&mut self, trigger: bool) -> Result<bool> {
        if !self.scroll_trigger.observe(trigger) {
            return Ok(false);
        }
        self.controller.scroll_to_top(true)?;
        Ok(true)
    }

    /// Forwards a pull-to-refresh gesture to the controller.
    pub fn handle_refresh(&mut self) -> Result<()> {
        self.controller.handle_refresh()
    }

    /// Runs a layout pass after the surface scrolled.
    pub fn layout_cells(&mut self) -> Result<usize> {
        self.controller.layout_cells()
    }
}
