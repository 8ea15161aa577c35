//! The list controller: owns the live surface and its recycled cells.
//!
//! [`ListController`] binds a [`ListSurface`] to the backing
//! [`Arrangement`], provisions recycled containers for the cells, headers
//! and footers the surface asks for, and wires the cross-cutting list
//! behaviors:
//!
//! - **Load more**: provisioning the last row of the last section fires
//!   [`ListSignals::load_more`] once per reach of that row.
//! - **Swipe actions**: per-edge providers; the built-in trailing delete
//!   action reports confirmed deletions through [`ListSignals::row_deleted`].
//! - **Pull to refresh**: [`ListSignals::refresh`], ended immediately or by
//!   the caller depending on [`RefreshMode`].
//! - **Scroll to top** and restyling.
//!
//! # Lifecycle
//!
//! `Uninitialized` → `Bound` (surface attached) → `Live` (first snapshot
//! applied) → `TornDown`. There are no backward transitions; rebinding
//! takes a new controller.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use smooth_list_core::logging::targets;
use smooth_list_core::{Signal, ThreadAffinity};

use super::applier::{self, ApplyOutcome, ConsistencyPolicy};
use super::arrangement::Arrangement;
use super::pool::{HostedView, ReuseIdentifier, ReusePool};
use super::surface::{CellRequest, DataSource, ListSurface, RowKey, SectionKey};
use super::swipe::{BehaviorBindings, SwipeAction, SwipeActionKind, SwipeActionsConfiguration, SwipeEdge};
use crate::config::ListConfiguration;
use crate::diff::Changeset;
use crate::error::{Error, IndexKind, Result};
use crate::model::{Collection, IndexPath, ListItem, ListSection};
use crate::style::{LayoutConfiguration, ListStyle};

/// Lifecycle state of a [`ListController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    Uninitialized,
    Bound,
    Live,
    TornDown,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Bound => "bound",
            Self::Live => "live",
            Self::TornDown => "torn down",
        })
    }
}

/// A confirmed swipe deletion.
///
/// The controller never removes the row itself: the caller drops the item
/// from its collection and hands the new snapshot back.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDeletion<S, I> {
    pub section_index: usize,
    pub item_index: usize,
    /// The section the row belonged to.
    pub section: S,
    pub item: I,
}

impl<S, I> RowDeletion<S, I> {
    pub fn index_path(&self) -> IndexPath {
        IndexPath::new(self.section_index, self.item_index)
    }
}

/// Event hooks of a list.
pub struct ListSignals<S: 'static, I: 'static> {
    /// The last row of the last section was reached.
    pub load_more: Signal<()>,
    /// The user pulled to refresh.
    pub refresh: Signal<()>,
    /// The user confirmed a swipe deletion.
    pub row_deleted: Signal<RowDeletion<S, I>>,
    /// The search text changed.
    pub search_text_changed: Signal<String>,
}

impl<S: 'static, I: 'static> Default for ListSignals<S, I> {
    fn default() -> Self {
        Self {
            load_more: Signal::new(),
            refresh: Signal::new(),
            row_deleted: Signal::new(),
            search_text_changed: Signal::new(),
        }
    }
}

impl<S: 'static, I: 'static> ListSignals<S, I> {
    fn disconnect_all(&self) {
        self.load_more.disconnect_all();
        self.refresh.disconnect_all();
        self.row_deleted.disconnect_all();
        self.search_text_changed.disconnect_all();
    }
}

impl<S: 'static, I: 'static> fmt::Debug for ListSignals<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSignals")
            .field("load_more", &self.load_more)
            .field("refresh", &self.refresh)
            .field("row_deleted", &self.row_deleted)
            .field("search_text_changed", &self.search_text_changed)
            .finish()
    }
}

/// How pull-to-refresh is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshMode {
    /// The indicator stops as soon as the refresh slots return.
    #[default]
    Immediate,
    /// The indicator keeps spinning until
    /// [`ListController::end_refreshing`] is called.
    Deferred,
}

/// Renders a row's content.
pub type CellContent<I, V> = Box<dyn Fn(&I) -> V>;

/// Renders a section header or footer from the section and its rows.
pub type SupplementaryContent<S, I, V> = Box<dyn Fn(&S, &[I]) -> V>;

/// The caller's render functions.
pub struct ContentProviders<S, I, V> {
    cell: CellContent<I, V>,
    header: Option<SupplementaryContent<S, I, V>>,
    footer: Option<SupplementaryContent<S, I, V>>,
}

impl<S, I, V> ContentProviders<S, I, V> {
    pub fn new<F>(cell: F) -> Self
    where
        F: Fn(&I) -> V + 'static,
    {
        Self {
            cell: Box::new(cell),
            header: None,
            footer: None,
        }
    }

    pub fn with_header<F>(mut self, header: F) -> Self
    where
        F: Fn(&S, &[I]) -> V + 'static,
    {
        self.header = Some(Box::new(header));
        self
    }

    pub fn with_footer<F>(mut self, footer: F) -> Self
    where
        F: Fn(&S, &[I]) -> V + 'static,
    {
        self.footer = Some(Box::new(footer));
        self
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn has_footer(&self) -> bool {
        self.footer.is_some()
    }
}

/// Rising-edge detector for reaching the end of the list.
///
/// Latches on the row that fired, so re-provisioning that row does not fire
/// again until it has left the screen or the list was rebuilt.
#[derive(Debug, Default)]
struct LoadMoreLatch {
    fired_for: Option<RowKey>,
}

impl LoadMoreLatch {
    fn observe(&mut self, key: RowKey) -> bool {
        if self.fired_for == Some(key) {
            return false;
        }
        self.fired_for = Some(key);
        true
    }

    fn release(&mut self, key: RowKey) {
        if self.fired_for == Some(key) {
            self.fired_for = None;
        }
    }

    fn reset(&mut self) {
        self.fired_for = None;
    }
}

/// Owns a live [`ListSurface`] and drives it.
///
/// - `S`, `I`: section and row values
/// - `V`: the rendered content hosted in recycled containers
/// - `L`: the surface
pub struct ListController<S: ListSection, I: ListItem, V, L: ListSurface> {
    state: ControllerState,
    surface: Option<L>,
    arrangement: Arrangement<S, I>,
    content: ContentProviders<S, I, V>,
    style: ListStyle,
    configuration: ListConfiguration,
    layout: LayoutConfiguration,
    behavior: BehaviorBindings<I>,
    pool: ReusePool<V>,
    cells: HashMap<RowKey, HostedView<V>>,
    headers: HashMap<SectionKey, HostedView<V>>,
    footers: HashMap<SectionKey, HostedView<V>>,
    load_more: LoadMoreLatch,
    refresh_mode: RefreshMode,
    policy: ConsistencyPolicy,
    signals: ListSignals<S, I>,
    affinity: ThreadAffinity,
}

impl<S: ListSection, I: ListItem, V, L: ListSurface> ListController<S, I, V, L> {
    /// Creates an unbound controller rendering with `content`.
    pub fn new(content: ContentProviders<S, I, V>) -> Self {
        let configuration = ListConfiguration::default();
        let style = ListStyle::default();
        let layout = LayoutConfiguration::new(
            style,
            &configuration,
            content.has_header(),
            content.has_footer(),
        );
        Self {
            state: ControllerState::Uninitialized,
            surface: None,
            arrangement: Arrangement::new(),
            content,
            style,
            configuration,
            layout,
            behavior: BehaviorBindings::default(),
            pool: ReusePool::new(),
            cells: HashMap::new(),
            headers: HashMap::new(),
            footers: HashMap::new(),
            load_more: LoadMoreLatch::default(),
            refresh_mode: RefreshMode::default(),
            policy: ConsistencyPolicy::default(),
            signals: ListSignals::default(),
            affinity: ThreadAffinity::current(),
        }
    }

    pub fn with_style(mut self, style: ListStyle) -> Self {
        self.style = style;
        self.rebuild_layout();
        self
    }

    pub fn with_configuration(mut self, configuration: ListConfiguration) -> Self {
        self.configuration = configuration;
        self.rebuild_layout();
        self
    }

    pub fn with_refresh_mode(mut self, mode: RefreshMode) -> Self {
        self.refresh_mode = mode;
        self
    }

    pub fn with_consistency_policy(mut self, policy: ConsistencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn signals(&self) -> &ListSignals<S, I> {
        &self.signals
    }

    /// The bound surface.
    pub fn surface(&self) -> Option<&L> {
        self.surface.as_ref()
    }

    /// The bound surface, for feeding it user interaction (scrolling,
    /// pulling).
    pub fn surface_mut(&mut self) -> Option<&mut L> {
        self.surface.as_mut()
    }

    /// The collection currently rendered.
    pub fn collection(&self) -> &Collection<S, I> {
        self.arrangement.collection()
    }

    pub fn arrangement(&self) -> &Arrangement<S, I> {
        &self.arrangement
    }

    pub fn style(&self) -> ListStyle {
        self.style
    }

    pub fn configuration(&self) -> &ListConfiguration {
        &self.configuration
    }

    pub fn layout(&self) -> &LayoutConfiguration {
        &self.layout
    }

    pub fn behavior(&self) -> &BehaviorBindings<I> {
        &self.behavior
    }

    pub fn refresh_mode(&self) -> RefreshMode {
        self.refresh_mode
    }

    pub fn consistency_policy(&self) -> ConsistencyPolicy {
        self.policy
    }

    pub fn pool(&self) -> &ReusePool<V> {
        &self.pool
    }

    /// The realized cell of the row at `path`, if it is on screen.
    pub fn realized_cell(&self, path: IndexPath) -> Option<&HostedView<V>> {
        self.arrangement
            .row_key(path)
            .and_then(|key| self.cells.get(&key))
    }

    /// Number of realized row cells.
    pub fn realized_cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Index titles of the current sections.
    pub fn index_titles(&self) -> Vec<String> {
        self.arrangement.collection().index_titles()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn transition(&mut self, to: ControllerState) {
        tracing::debug!(
            target: targets::CONTROLLER,
            from = %self.state,
            to = %to,
            "controller state changed"
        );
        self.state = to;
    }

    fn invalid(&self, operation: &'static str) -> Error {
        Error::InvalidState {
            state: self.state,
            operation,
        }
    }

    fn require_active(&self, operation: &'static str) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        match self.state {
            ControllerState::Bound | ControllerState::Live => Ok(()),
            _ => Err(self.invalid(operation)),
        }
    }

    fn require_not_torn_down(&self, operation: &'static str) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        if self.state == ControllerState::TornDown {
            Err(self.invalid(operation))
        } else {
            Ok(())
        }
    }

    /// Attaches the surface, applies the layout and installs the built-in
    /// trailing delete action.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the controller is uninitialized.
    pub fn bind(&mut self, mut surface: L) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        if self.state != ControllerState::Uninitialized {
            return Err(self.invalid("bind"));
        }
        surface.apply_layout(&self.layout);
        if !self.behavior.has_provider(SwipeEdge::Trailing) {
            self.behavior.set_delete(SwipeEdge::Trailing, true);
        }
        self.surface = Some(surface);
        self.transition(ControllerState::Bound);
        Ok(())
    }

    /// Applies `new` through `changeset`, computed from the current
    /// collection to `new`, then provisions the cells the surface asks for.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] before [`bind`](Self::bind) or after
    /// [`tear_down`](Self::tear_down); otherwise see
    /// [`applier::apply`].
    pub fn apply(&mut self, new: Collection<S, I>, changeset: &Changeset) -> Result<ApplyOutcome> {
        self.require_active("apply a changeset")?;
        let Some(surface) = self.surface.as_mut() else {
            return Err(self.invalid("apply a changeset"));
        };

        let outcome = applier::apply(
            surface,
            &mut self.arrangement,
            new,
            changeset,
            &self.configuration.animation,
            self.policy,
        )?;

        match outcome {
            ApplyOutcome::Reloaded | ApplyOutcome::Recovered => {
                self.recycle_all();
                self.load_more.reset();
            }
            ApplyOutcome::Animated(_) => self.forget_departed(),
            ApplyOutcome::Unchanged => {}
        }

        if self.state == ControllerState::Bound {
            self.transition(ControllerState::Live);
        }
        self.layout_cells()?;
        Ok(outcome)
    }

    /// Drops every realized container and the surface, and disconnects
    /// every signal. Returns the surface.
    pub fn tear_down(&mut self) -> Option<L> {
        self.affinity.debug_assert_same_thread();
        if self.state == ControllerState::TornDown {
            return None;
        }
        self.cells.clear();
        self.headers.clear();
        self.footers.clear();
        self.pool.clear();
        self.signals.disconnect_all();
        smooth_list_core::list_debug!(rows = self.arrangement.collection().item_count(), "list torn down");
        self.arrangement = Arrangement::new();
        self.transition(ControllerState::TornDown);
        self.surface.take()
    }

    // =========================================================================
    // Cell provisioning
    // =========================================================================

    fn row_out_of_range(&self, path: IndexPath) -> Error {
        let sections = self.arrangement.section_count();
        if path.section() >= sections {
            Error::IndexOutOfRange {
                kind: IndexKind::Section,
                index: path.section(),
                len: sections,
            }
        } else {
            Error::IndexOutOfRange {
                kind: IndexKind::Row {
                    section: path.section(),
                },
                index: path.item(),
                len: self.arrangement.row_count(path.section()),
            }
        }
    }

    fn section_out_of_range(&self, section: usize) -> Error {
        Error::IndexOutOfRange {
            kind: IndexKind::Section,
            index: section,
            len: self.arrangement.section_count(),
        }
    }

    /// Provisions the cell of the row at `path`: a recycled container
    /// configured with the row's rendered content.
    ///
    /// Provisioning the last row of the last section fires
    /// [`ListSignals::load_more`], unless it already fired for that row and
    /// the row has not left the screen since.
    pub fn cell_for_row(&mut self, path: IndexPath) -> Result<&HostedView<V>> {
        self.require_active("provision a cell")?;
        let Some(key) = self.arrangement.row_key(path) else {
            return Err(self.row_out_of_range(path));
        };
        let Some((_, item)) = self.arrangement.entry(path) else {
            return Err(self.row_out_of_range(path));
        };
        let content = (self.content.cell)(item);

        if self.arrangement.collection().is_last_index_path(path) && self.load_more.observe(key) {
            tracing::debug!(target: targets::CONTROLLER, %path, "reached the end of the list");
            self.signals.load_more.emit(());
        }

        let pool = &mut self.pool;
        let view = self
            .cells
            .entry(key)
            .or_insert_with(|| pool.dequeue(ReuseIdentifier::Cell));
        view.configure(content);
        Ok(view)
    }

    /// Provisions the header of `section`, or `None` if the list has no
    /// header content.
    pub fn header_for_section(&mut self, section: usize) -> Result<Option<&HostedView<V>>> {
        self.supplementary(ReuseIdentifier::SectionHeader, section)
    }

    /// Provisions the footer of `section`, or `None` if the list has no
    /// footer content.
    pub fn footer_for_section(&mut self, section: usize) -> Result<Option<&HostedView<V>>> {
        self.supplementary(ReuseIdentifier::SectionFooter, section)
    }

    fn supplementary(
        &mut self,
        reuse_id: ReuseIdentifier,
        section: usize,
    ) -> Result<Option<&HostedView<V>>> {
        self.require_active("provision a supplementary view")?;
        let render = match reuse_id {
            ReuseIdentifier::SectionHeader => self.content.header.as_ref(),
            ReuseIdentifier::SectionFooter => self.content.footer.as_ref(),
            ReuseIdentifier::Cell => None,
        };
        let Some(render) = render else {
            return Ok(None);
        };
        let (Some(model), Some(key)) = (
            self.arrangement.collection().section(section),
            self.arrangement.section_key(section),
        ) else {
            return Err(self.section_out_of_range(section));
        };
        let content = render(&model.section, &model.items);

        let realized = if reuse_id == ReuseIdentifier::SectionHeader {
            &mut self.headers
        } else {
            &mut self.footers
        };
        let pool = &mut self.pool;
        let view = realized.entry(key).or_insert_with(|| pool.dequeue(reuse_id));
        view.configure(content);
        Ok(Some(&*view))
    }

    /// Runs a layout pass: recycles containers that went off screen, then
    /// provisions every cell the surface requests from the freed ones.
    ///
    /// Returns the number of containers provisioned.
    pub fn layout_cells(&mut self) -> Result<usize> {
        self.require_active("lay out cells")?;
        let Some(surface) = self.surface.as_mut() else {
            return Err(self.invalid("lay out cells"));
        };
        let requests = surface.take_cell_requests();
        self.recycle_offscreen();

        let mut provisioned = 0;
        for request in requests {
            let result = match request {
                CellRequest::Row(path) => self.cell_for_row(path).map(|_| true),
                CellRequest::SectionHeader(section) => {
                    self.header_for_section(section).map(|v| v.is_some())
                }
                CellRequest::SectionFooter(section) => {
                    self.footer_for_section(section).map(|v| v.is_some())
                }
            };
            match result {
                Ok(true) => provisioned += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(target: targets::CONTROLLER, ?request, error = %err, "dropping cell request");
                }
            }
        }

        tracing::trace!(
            target: targets::CONTROLLER,
            provisioned,
            realized = self.cells.len(),
            allocated = self.pool.allocated(),
            "layout pass"
        );
        Ok(provisioned)
    }

    fn recycle_offscreen(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let visible = surface.visible_index_paths();
        let visible_rows: HashSet<RowKey> = visible
            .iter()
            .filter_map(|path| self.arrangement.row_key(*path))
            .collect();
        let visible_sections: HashSet<SectionKey> = visible
            .iter()
            .filter_map(|path| self.arrangement.section_key(path.section()))
            .collect();

        let offscreen: Vec<RowKey> = self
            .cells
            .keys()
            .filter(|key| !visible_rows.contains(key))
            .copied()
            .collect();
        for key in offscreen {
            if let Some(view) = self.cells.remove(&key) {
                self.pool.enqueue(view);
            }
            self.load_more.release(key);
        }

        for realized in [&mut self.headers, &mut self.footers] {
            let gone: Vec<SectionKey> = realized
                .keys()
                .filter(|key| !visible_sections.contains(key))
                .copied()
                .collect();
            for key in gone {
                if let Some(view) = realized.remove(&key) {
                    self.pool.enqueue(view);
                }
            }
        }
    }

    fn recycle_all(&mut self) {
        let realized = self
            .cells
            .drain()
            .map(|(_, view)| view)
            .chain(self.headers.drain().map(|(_, view)| view))
            .chain(self.footers.drain().map(|(_, view)| view));
        for view in realized {
            self.pool.enqueue(view);
        }
    }

    /// Recycles containers of rows and sections that left the arrangement.
    fn forget_departed(&mut self) {
        let departed: Vec<RowKey> = self
            .cells
            .keys()
            .filter(|key| !self.arrangement.contains_row(**key))
            .copied()
            .collect();
        for key in departed {
            if let Some(view) = self.cells.remove(&key) {
                self.pool.enqueue(view);
            }
            self.load_more.release(key);
        }
        for realized in [&mut self.headers, &mut self.footers] {
            let departed: Vec<SectionKey> = realized
                .keys()
                .filter(|key| !self.arrangement.contains_section(**key))
                .copied()
                .collect();
            for key in departed {
                if let Some(view) = realized.remove(&key) {
                    self.pool.enqueue(view);
                }
            }
        }
    }

    // =========================================================================
    // Swipe actions
    // =========================================================================

    /// Installs a custom provider for the actions of `edge`.
    ///
    /// Replaces the built-in delete action when `edge` is trailing.
    pub fn set_swipe_actions<F>(&mut self, edge: SwipeEdge, allow_full_swipe: bool, provider: F) -> Result<()>
    where
        F: Fn(IndexPath, &I) -> Vec<SwipeAction> + Send + Sync + 'static,
    {
        self.require_not_torn_down("set swipe actions")?;
        self.behavior.set_provider(edge, allow_full_swipe, Arc::new(provider));
        Ok(())
    }

    /// Removes the provider of `edge`.
    pub fn clear_swipe_actions(&mut self, edge: SwipeEdge) -> Result<()> {
        self.require_not_torn_down("clear swipe actions")?;
        self.behavior.clear(edge);
        Ok(())
    }

    /// The actions revealed when the row at `path` is swiped from `edge`.
    ///
    /// Asking for actions has no side effect; nothing happens until an
    /// action is confirmed.
    pub fn swipe_actions(&self, edge: SwipeEdge, path: IndexPath) -> Result<SwipeActionsConfiguration> {
        self.require_active("query swipe actions")?;
        let Some((_, item)) = self.arrangement.entry(path) else {
            return Err(self.row_out_of_range(path));
        };
        Ok(self
            .behavior
            .actions(edge, path, item, &self.configuration.edit))
    }

    /// Performs the action at `index` of the actions of `path` on `edge`,
    /// as when the user taps it.
    ///
    /// Returns `false` if there is no such action.
    pub fn confirm_swipe_action(&mut self, edge: SwipeEdge, path: IndexPath, index: usize) -> Result<bool> {
        let configuration = self.swipe_actions(edge, path)?;
        let Some(action) = configuration.actions.into_iter().nth(index) else {
            return Ok(false);
        };

        match action.kind {
            SwipeActionKind::Delete => {
                let Some((section, item)) = self.arrangement.entry(path) else {
                    return Err(self.row_out_of_range(path));
                };
                let deletion = RowDeletion {
                    section_index: path.section(),
                    item_index: path.item(),
                    section: section.clone(),
                    item: item.clone(),
                };
                tracing::debug!(
                    target: targets::CONTROLLER,
                    %path,
                    item = ?deletion.item.id(),
                    "row deletion confirmed"
                );
                self.signals.row_deleted.emit(deletion);
            }
            SwipeActionKind::Custom(handler) => {
                tracing::debug!(target: targets::CONTROLLER, %path, title = %action.title, "swipe action confirmed");
                handler(path);
            }
        }
        Ok(true)
    }

    // =========================================================================
    // Refresh, scrolling and layout
    // =========================================================================

    /// Handles a pull-to-refresh: fires [`ListSignals::refresh`] and, in
    /// [`RefreshMode::Immediate`], stops the indicator right after.
    pub fn handle_refresh(&mut self) -> Result<()> {
        self.require_active("refresh")?;
        tracing::debug!(target: targets::CONTROLLER, mode = ?self.refresh_mode, "refresh requested");
        self.signals.refresh.emit(());
        if self.refresh_mode == RefreshMode::Immediate {
            self.end_refreshing()?;
        }
        Ok(())
    }

    /// Stops the pull-to-refresh indicator.
    pub fn end_refreshing(&mut self) -> Result<()> {
        self.require_active("end refreshing")?;
        if let Some(surface) = self.surface.as_mut() {
            surface.end_refreshing();
        }
        Ok(())
    }

    pub fn is_refreshing(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.is_refreshing())
    }

    /// Scrolls to the origin. Does nothing when the list has no rows.
    pub fn scroll_to_top(&mut self, animated: bool) -> Result<()> {
        self.require_active("scroll to top")?;
        if self.arrangement.collection().item_count() == 0 {
            return Ok(());
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.scroll_to_top(animated);
        }
        Ok(())
    }

    fn rebuild_layout(&mut self) {
        self.layout = LayoutConfiguration::new(
            self.style,
            &self.configuration,
            self.content.has_header(),
            self.content.has_footer(),
        );
    }

    /// Replaces the layout for a new style and configuration.
    ///
    /// Swipe-action providers are left untouched.
    pub fn update_layout(&mut self, style: ListStyle, configuration: ListConfiguration) -> Result<()> {
        self.require_not_torn_down("update the layout")?;
        self.style = style;
        self.configuration = configuration;
        self.rebuild_layout();
        if let Some(surface) = self.surface.as_mut() {
            surface.apply_layout(&self.layout);
        }
        tracing::debug!(target: targets::CONTROLLER, ?style, "layout updated");
        if self.state == ControllerState::Live {
            self.layout_cells()?;
        }
        Ok(())
    }
}

impl<S: ListSection, I: ListItem, V, L: ListSurface> fmt::Debug for ListController<S, I, V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("state", &self.state)
            .field("sections", &self.arrangement.section_count())
            .field("realized_cells", &self.cells.len())
            .field("style", &self.style)
            .field("behavior", &self.behavior)
            .finish()
    }
}
