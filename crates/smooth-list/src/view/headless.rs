//! A recycling list surface without a screen.
//!
//! [`HeadlessList`] behaves like a platform list widget as far as the list
//! component can observe: batch updates are replayed with batch semantics
//! and checked against the data source, a viewport decides which rows are
//! visible, and cells are requested when they become visible or go stale.
//! It records every call it receives, which makes it the test double for
//! the platform widget and a usable surface for non-graphical hosts.

use std::collections::{HashMap, HashSet};

use smooth_list_core::logging::targets;

use super::surface::{CellRequest, DataSource, ListSurface, RowKey, SectionKey};
use crate::config::RowAnimation;
use crate::error::{Error, IndexKind, Result};
use crate::model::IndexPath;
use crate::style::{HeaderMode, LayoutConfiguration};

/// A call received by a [`HeadlessList`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    ReloadData { sections: usize, rows: usize },
    BeginUpdates,
    DeleteSections(Vec<usize>, RowAnimation),
    InsertSections(Vec<usize>, RowAnimation),
    MoveSection { from: usize, to: usize },
    DeleteRows(Vec<IndexPath>, RowAnimation),
    InsertRows(Vec<IndexPath>, RowAnimation),
    ReloadRows(Vec<IndexPath>, RowAnimation),
    MoveRow {
        from: IndexPath,
        to: IndexPath,
        animation: RowAnimation,
    },
    /// End of a batch; `committed` is `false` if it was rejected.
    EndUpdates { committed: bool },
    ScrollToTop { animated: bool },
    ApplyLayout,
    EndRefreshing,
}

impl SurfaceCall {
    /// Returns `true` for calls that change the displayed structure.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DeleteSections(..)
                | Self::InsertSections(..)
                | Self::MoveSection { .. }
                | Self::DeleteRows(..)
                | Self::InsertRows(..)
                | Self::ReloadRows(..)
                | Self::MoveRow { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DisplayedSection {
    key: SectionKey,
    rows: Vec<RowKey>,
}

#[derive(Debug, Default)]
struct PendingBatch {
    deleted_sections: Vec<usize>,
    inserted_sections: Vec<usize>,
    moved_sections: Vec<(usize, usize)>,
    deleted_rows: Vec<IndexPath>,
    inserted_rows: Vec<IndexPath>,
    reloaded_rows: Vec<IndexPath>,
    moved_rows: Vec<(IndexPath, IndexPath)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionOrigin {
    Inserted,
    Existing(usize),
}

/// Result of replaying a batch: the new contents and what went stale.
struct Replayed {
    sections: Vec<DisplayedSection>,
    stale_rows: Vec<RowKey>,
    /// Surviving sections whose rows changed; their supplementary views
    /// are rebuilt.
    stale_sections: Vec<SectionKey>,
}

/// An in-memory recycling list.
///
/// # Example
///
/// ```
/// use smooth_list::view::{HeadlessList, ListSurface};
///
/// let mut surface = HeadlessList::new().with_viewport(8);
/// assert_eq!(surface.section_count(), 0);
/// assert!(surface.visible_index_paths().is_empty());
/// ```
#[derive(Debug)]
pub struct HeadlessList {
    sections: Vec<DisplayedSection>,
    batch: Option<PendingBatch>,
    calls: Vec<SurfaceCall>,
    viewport_rows: usize,
    content_offset: usize,
    displayed_rows: HashSet<RowKey>,
    displayed_headers: HashSet<SectionKey>,
    displayed_footers: HashSet<SectionKey>,
    stale_rows: HashSet<RowKey>,
    stale_sections: HashSet<SectionKey>,
    layout: Option<LayoutConfiguration>,
    refreshing: bool,
    verify_identities: bool,
}

impl Default for HeadlessList {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessList {
    /// Default number of rows that fit in the viewport.
    pub const DEFAULT_VIEWPORT_ROWS: usize = 12;

    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            batch: None,
            calls: Vec::new(),
            viewport_rows: Self::DEFAULT_VIEWPORT_ROWS,
            content_offset: 0,
            displayed_rows: HashSet::new(),
            displayed_headers: HashSet::new(),
            displayed_footers: HashSet::new(),
            stale_rows: HashSet::new(),
            stale_sections: HashSet::new(),
            layout: None,
            refreshing: false,
            verify_identities: true,
        }
    }

    /// Set how many rows fit in the viewport.
    pub fn with_viewport(mut self, rows: usize) -> Self {
        self.viewport_rows = rows;
        self
    }

    /// Whether committed batches must reproduce the data source's row
    /// identities, not only its counts. On by default.
    pub fn with_identity_verification(mut self, verify: bool) -> Self {
        self.verify_identities = verify;
        self
    }

    /// Every call received so far.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Returns and clears the call log.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// The last layout applied.
    pub fn layout(&self) -> Option<&LayoutConfiguration> {
        self.layout.as_ref()
    }

    /// Total number of rows across all sections.
    pub fn total_rows(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    /// Displayed section keys, top to bottom.
    pub fn section_keys(&self) -> Vec<SectionKey> {
        self.sections.iter().map(|s| s.key).collect()
    }

    /// Displayed row keys of `section`.
    pub fn row_keys(&self, section: usize) -> Option<&[RowKey]> {
        self.sections.get(section).map(|s| s.rows.as_slice())
    }

    /// Index of the first visible row, counting rows of all sections.
    pub fn content_offset(&self) -> usize {
        self.content_offset
    }

    /// Scroll so that the row at flat index `offset` is the first visible.
    pub fn scroll_to(&mut self, offset: usize) {
        self.content_offset = offset;
        self.clamp_offset();
    }

    /// Scroll to the last page of rows.
    pub fn scroll_to_bottom(&mut self) {
        self.content_offset = self.max_offset();
    }

    /// Simulate the user pulling the list down.
    pub fn pull_to_refresh(&mut self) {
        self.refreshing = true;
    }

    /// Returns `true` while a batch is open.
    pub fn is_updating(&self) -> bool {
        self.batch.is_some()
    }

    fn max_offset(&self) -> usize {
        self.total_rows().saturating_sub(self.viewport_rows)
    }

    fn clamp_offset(&mut self) {
        self.content_offset = self.content_offset.min(self.max_offset());
    }

    fn batch(&mut self) -> &mut PendingBatch {
        self.batch.get_or_insert_with(PendingBatch::default)
    }

    fn header_modes(&self) -> (bool, bool) {
        self.layout.as_ref().map_or((false, false), |layout| {
            (
                layout.header_mode == HeaderMode::Supplementary,
                layout.footer_mode == HeaderMode::Supplementary,
            )
        })
    }

    /// Indices of sections intersecting the viewport, with their visible
    /// row ranges.
    fn visible_sections(&self) -> Vec<(usize, std::ops::Range<usize>)> {
        let low = self.content_offset;
        let high = low + self.viewport_rows;
        let mut visible = Vec::new();
        let mut start = 0;

        for (index, section) in self.sections.iter().enumerate() {
            let end = start + section.rows.len();
            if section.rows.is_empty() {
                if low <= start && start < high {
                    visible.push((index, 0..0));
                }
            } else if start < high && end > low {
                let first = low.saturating_sub(start);
                let last = high.min(end) - start;
                visible.push((index, first..last));
            }
            if start >= high {
                break;
            }
            start = end;
        }
        visible
    }

    fn replay(&self, batch: &PendingBatch, source: &dyn DataSource) -> Result<Replayed> {
        let old_count = self.sections.len();
        let origin = self.replay_sections(batch, source)?;
        let new_count = origin.len();

        // Row operations against sections before the batch.
        let mut deleted: Vec<Vec<bool>> = self
            .sections
            .iter()
            .map(|s| vec![false; s.rows.len()])
            .collect();
        let mut moved_out = deleted.clone();
        let section_deleted = |section: usize| batch.deleted_sections.contains(&section);

        let check_old_row = |path: IndexPath| -> Result<()> {
            let Some(section) = self.sections.get(path.section()) else {
                return Err(Error::IndexOutOfRange {
                    kind: IndexKind::Section,
                    index: path.section(),
                    len: old_count,
                });
            };
            if section_deleted(path.section()) {
                return Err(Error::inconsistent(format!(
                    "row {path} belongs to a section deleted in the same update"
                )));
            }
            if path.item() >= section.rows.len() {
                return Err(Error::IndexOutOfRange {
                    kind: IndexKind::Row {
                        section: path.section(),
                    },
                    index: path.item(),
                    len: section.rows.len(),
                });
            }
            Ok(())
        };

        for &path in &batch.deleted_rows {
            check_old_row(path)?;
            let flag = &mut deleted[path.section()][path.item()];
            if *flag {
                return Err(Error::inconsistent(format!("row {path} deleted twice")));
            }
            *flag = true;
        }
        for &(from, _) in &batch.moved_rows {
            check_old_row(from)?;
            if deleted[from.section()][from.item()] || moved_out[from.section()][from.item()] {
                return Err(Error::inconsistent(format!(
                    "row {from} is moved and also deleted or moved again"
                )));
            }
            moved_out[from.section()][from.item()] = true;
        }
        let mut stale_rows = Vec::new();
        for &path in &batch.reloaded_rows {
            check_old_row(path)?;
            if deleted[path.section()][path.item()] {
                return Err(Error::inconsistent(format!(
                    "row {path} is reloaded and deleted"
                )));
            }
            stale_rows.push(self.sections[path.section()].rows[path.item()]);
        }

        // Row operations against sections after the batch, grouped by section.
        let mut incoming: HashMap<usize, Vec<(usize, Option<RowKey>)>> = HashMap::new();
        for &path in &batch.inserted_rows {
            if path.section() >= new_count {
                return Err(Error::IndexOutOfRange {
                    kind: IndexKind::Section,
                    index: path.section(),
                    len: new_count,
                });
            }
            incoming.entry(path.section()).or_default().push((path.item(), None));
        }
        for &(from, to) in &batch.moved_rows {
            if to.section() >= new_count {
                return Err(Error::IndexOutOfRange {
                    kind: IndexKind::Section,
                    index: to.section(),
                    len: new_count,
                });
            }
            let key = self.sections[from.section()].rows[from.item()];
            incoming.entry(to.section()).or_default().push((to.item(), Some(key)));
        }

        let mut sections = Vec::with_capacity(new_count);
        let mut stale_sections = Vec::new();
        for (index, origin) in origin.into_iter().enumerate() {
            let expected = source.row_count(index);
            let arriving = incoming.remove(&index).unwrap_or_default();

            let section = match origin {
                SectionOrigin::Inserted => {
                    if !arriving.is_empty() {
                        return Err(Error::inconsistent(format!(
                            "rows inserted into section {index}, which is itself inserted in the same update"
                        )));
                    }
                    let key = source_section_key(source, index)?;
                    let rows = (0..expected)
                        .map(|item| source_row_key(source, IndexPath::new(index, item)))
                        .collect::<Result<Vec<_>>>()?;
                    DisplayedSection { key, rows }
                }
                SectionOrigin::Existing(old) => {
                    let before = &self.sections[old];
                    let removed = deleted[old].iter().filter(|d| **d).count()
                        + moved_out[old].iter().filter(|m| **m).count();
                    let after = before.rows.len() - removed + arriving.len();
                    if removed > 0
                        || !arriving.is_empty()
                        || batch.reloaded_rows.iter().any(|path| path.section() == old)
                    {
                        stale_sections.push(before.key);
                    }
                    if after != expected {
                        return Err(Error::inconsistent(format!(
                            "invalid number of rows in section {index}: the section contained {} rows before the update and {after} after it, but the data source has {expected}",
                            before.rows.len()
                        )));
                    }

                    let mut slots: Vec<Option<RowKey>> = vec![None; after];
                    for (item, moved) in arriving {
                        let path = IndexPath::new(index, item);
                        if item >= after {
                            return Err(Error::IndexOutOfRange {
                                kind: IndexKind::Row { section: index },
                                index: item,
                                len: after,
                            });
                        }
                        if slots[item].is_some() {
                            return Err(Error::inconsistent(format!(
                                "row {path} is the target of more than one insertion or move"
                            )));
                        }
                        let key = match moved {
                            Some(key) => key,
                            None => {
                                let key = source_row_key(source, path)?;
                                stale_rows.push(key);
                                key
                            }
                        };
                        slots[item] = Some(key);
                    }

                    let mut survivors = before
                        .rows
                        .iter()
                        .enumerate()
                        .filter(|(item, _)| !deleted[old][*item] && !moved_out[old][*item])
                        .map(|(_, key)| *key);
                    let rows = slots
                        .into_iter()
                        .map(|slot| slot.or_else(|| survivors.next()))
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| {
                            Error::inconsistent(format!("section {index} has unfilled rows"))
                        })?;
                    DisplayedSection {
                        key: before.key,
                        rows,
                    }
                }
            };
            sections.push(section);
        }

        if self.verify_identities {
            verify_against_source(&sections, source)?;
        }

        Ok(Replayed {
            sections,
            stale_rows,
            stale_sections,
        })
    }

    /// Resolves where each section after the batch comes from.
    fn replay_sections(
        &self,
        batch: &PendingBatch,
        source: &dyn DataSource,
    ) -> Result<Vec<SectionOrigin>> {
        let old_count = self.sections.len();
        let mut leaving = vec![false; old_count];

        let out_of_range = |index: usize, len: usize| Error::IndexOutOfRange {
            kind: IndexKind::Section,
            index,
            len,
        };

        for &section in &batch.deleted_sections {
            if section >= old_count {
                return Err(out_of_range(section, old_count));
            }
            if leaving[section] {
                return Err(Error::inconsistent(format!("section {section} deleted twice")));
            }
            leaving[section] = true;
        }
        for &(from, _) in &batch.moved_sections {
            if from >= old_count {
                return Err(out_of_range(from, old_count));
            }
            if leaving[from] {
                return Err(Error::inconsistent(format!(
                    "section {from} is moved and also deleted or moved again"
                )));
            }
            leaving[from] = true;
        }

        let new_count = old_count - batch.deleted_sections.len() + batch.inserted_sections.len();
        if new_count != source.section_count() {
            return Err(Error::inconsistent(format!(
                "invalid number of sections: the list contained {old_count} sections before the update and {new_count} after it, but the data source has {}",
                source.section_count()
            )));
        }

        let mut slots: Vec<Option<SectionOrigin>> = vec![None; new_count];
        let targets = batch
            .inserted_sections
            .iter()
            .map(|&to| (to, SectionOrigin::Inserted))
            .chain(
                batch
                    .moved_sections
                    .iter()
                    .map(|&(from, to)| (to, SectionOrigin::Existing(from))),
            );
        for (to, origin) in targets {
            let slot = slots.get_mut(to).ok_or_else(|| out_of_range(to, new_count))?;
            if slot.is_some() {
                return Err(Error::inconsistent(format!(
                    "section {to} is the target of more than one insertion or move"
                )));
            }
            *slot = Some(origin);
        }

        let mut survivors = (0..old_count)
            .filter(|section| !leaving[*section])
            .map(SectionOrigin::Existing);
        slots
            .into_iter()
            .map(|slot| slot.or_else(|| survivors.next()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::inconsistent("sections left unfilled after the update"))
    }
}

fn source_section_key(source: &dyn DataSource, section: usize) -> Result<SectionKey> {
    source
        .section_key(section)
        .ok_or_else(|| Error::inconsistent(format!("data source has no section {section}")))
}

fn source_row_key(source: &dyn DataSource, path: IndexPath) -> Result<RowKey> {
    source
        .row_key(path)
        .ok_or_else(|| Error::inconsistent(format!("data source has no row at {path}")))
}

fn verify_against_source(sections: &[DisplayedSection], source: &dyn DataSource) -> Result<()> {
    for (index, section) in sections.iter().enumerate() {
        if source.section_key(index) != Some(section.key) {
            return Err(Error::inconsistent(format!(
                "section {index} does not match the data source after the update"
            )));
        }
        for (item, key) in section.rows.iter().enumerate() {
            let path = IndexPath::new(index, item);
            if source.row_key(path) != Some(*key) {
                return Err(Error::inconsistent(format!(
                    "row {path} does not match the data source after the update"
                )));
            }
        }
    }
    Ok(())
}

impl ListSurface for HeadlessList {
    fn reload_data(&mut self, source: &dyn DataSource) {
        self.batch = None;
        self.sections = (0..source.section_count())
            .map(|section| DisplayedSection {
                key: source.section_key(section).unwrap_or_default(),
                rows: (0..source.row_count(section))
                    .map(|item| source.row_key(IndexPath::new(section, item)).unwrap_or_default())
                    .collect(),
            })
            .collect();
        self.displayed_rows.clear();
        self.displayed_headers.clear();
        self.displayed_footers.clear();
        self.stale_rows.clear();
        self.stale_sections.clear();
        self.clamp_offset();
        self.calls.push(SurfaceCall::ReloadData {
            sections: self.sections.len(),
            rows: self.total_rows(),
        });
    }

    fn begin_updates(&mut self) {
        self.batch = Some(PendingBatch::default());
        self.calls.push(SurfaceCall::BeginUpdates);
    }

    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.batch().deleted_sections.extend_from_slice(sections);
        self.calls
            .push(SurfaceCall::DeleteSections(sections.to_vec(), animation));
    }

    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.batch().inserted_sections.extend_from_slice(sections);
        self.calls
            .push(SurfaceCall::InsertSections(sections.to_vec(), animation));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.batch().moved_sections.push((from, to));
        self.calls.push(SurfaceCall::MoveSection { from, to });
    }

    fn delete_rows(&mut self, paths: &[IndexPath], animation: RowAnimation) {
        self.batch().deleted_rows.extend_from_slice(paths);
        self.calls.push(SurfaceCall::DeleteRows(paths.to_vec(), animation));
    }

    fn insert_rows(&mut self, paths: &[IndexPath], animation: RowAnimation) {
        self.batch().inserted_rows.extend_from_slice(paths);
        self.calls.push(SurfaceCall::InsertRows(paths.to_vec(), animation));
    }

    fn reload_rows(&mut self, paths: &[IndexPath], animation: RowAnimation) {
        self.batch().reloaded_rows.extend_from_slice(paths);
        self.calls.push(SurfaceCall::ReloadRows(paths.to_vec(), animation));
    }

    fn move_row(&mut self, from: IndexPath, to: IndexPath, animation: RowAnimation) {
        self.batch().moved_rows.push((from, to));
        self.calls.push(SurfaceCall::MoveRow {
            from,
            to,
            animation,
        });
    }

    fn end_updates(&mut self, source: &dyn DataSource) -> Result<()> {
        let batch = self.batch.take().unwrap_or_default();
        match self.replay(&batch, source) {
            Ok(replayed) => {
                self.sections = replayed.sections;
                self.stale_rows.extend(replayed.stale_rows);
                self.stale_sections.extend(replayed.stale_sections);
                self.clamp_offset();
                self.calls.push(SurfaceCall::EndUpdates { committed: true });
                tracing::trace!(
                    target: targets::APPLY,
                    sections = self.sections.len(),
                    rows = self.total_rows(),
                    "headless batch committed"
                );
                Ok(())
            }
            Err(err) => {
                self.calls.push(SurfaceCall::EndUpdates { committed: false });
                Err(err)
            }
        }
    }

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn row_count(&self, section: usize) -> Option<usize> {
        self.sections.get(section).map(|s| s.rows.len())
    }

    fn visible_index_paths(&self) -> Vec<IndexPath> {
        self.visible_sections()
            .into_iter()
            .flat_map(|(section, rows)| rows.map(move |item| IndexPath::new(section, item)))
            .collect()
    }

    fn take_cell_requests(&mut self) -> Vec<CellRequest> {
        let (headers, footers) = self.header_modes();
        let mut requests = Vec::new();
        let mut rows_now = HashSet::new();
        let mut headers_now = HashSet::new();
        let mut footers_now = HashSet::new();

        for (index, range) in self.visible_sections() {
            let section = &self.sections[index];
            let stale = self.stale_sections.contains(&section.key);
            if headers {
                if stale || !self.displayed_headers.contains(&section.key) {
                    requests.push(CellRequest::SectionHeader(index));
                }
                headers_now.insert(section.key);
            }
            for item in range {
                let key = section.rows[item];
                if !self.displayed_rows.contains(&key) || self.stale_rows.contains(&key) {
                    requests.push(CellRequest::Row(IndexPath::new(index, item)));
                }
                rows_now.insert(key);
            }
            if footers {
                if stale || !self.displayed_footers.contains(&section.key) {
                    requests.push(CellRequest::SectionFooter(index));
                }
                footers_now.insert(section.key);
            }
        }

        self.displayed_rows = rows_now;
        self.displayed_headers = headers_now;
        self.displayed_footers = footers_now;
        self.stale_rows.clear();
        self.stale_sections.clear();
        requests
    }

    fn scroll_to_top(&mut self, animated: bool) {
        self.content_offset = 0;
        self.calls.push(SurfaceCall::ScrollToTop { animated });
    }

    fn apply_layout(&mut self, layout: &LayoutConfiguration) {
        if self.layout.as_ref() != Some(layout) {
            // Supplementary views are rebuilt for a new layout.
            self.displayed_headers.clear();
            self.displayed_footers.clear();
        }
        self.layout = Some(layout.clone());
        self.calls.push(SurfaceCall::ApplyLayout);
    }

    fn end_refreshing(&mut self) {
        self.refreshing = false;
        self.calls.push(SurfaceCall::EndRefreshing);
    }

    fn is_refreshing(&self) -> bool {
        self.refreshing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    /// A data source backed by explicit keys.
    struct Keys {
        sections: Vec<(SectionKey, Vec<RowKey>)>,
    }

    impl DataSource for Keys {
        fn section_count(&self) -> usize {
            self.sections.len()
        }
        fn row_count(&self, section: usize) -> usize {
            self.sections.get(section).map_or(0, |s| s.1.len())
        }
        fn section_key(&self, section: usize) -> Option<SectionKey> {
            self.sections.get(section).map(|s| s.0)
        }
        fn row_key(&self, path: IndexPath) -> Option<RowKey> {
            self.sections
                .get(path.section())
                .and_then(|s| s.1.get(path.item()))
                .copied()
        }
    }

    struct Fixture {
        section_keys: SlotMap<SectionKey, ()>,
        row_keys: SlotMap<RowKey, ()>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                section_keys: SlotMap::with_key(),
                row_keys: SlotMap::with_key(),
            }
        }
        fn section(&mut self) -> SectionKey {
            self.section_keys.insert(())
        }
        fn rows(&mut self, n: usize) -> Vec<RowKey> {
            (0..n).map(|_| self.row_keys.insert(())).collect()
        }
    }

    #[test]
    fn test_reload_and_visible_rows() {
        let mut fx = Fixture::new();
        let (s0, s1) = (fx.section(), fx.section());
        let source = Keys {
            sections: vec![(s0, fx.rows(3)), (s1, fx.rows(4))],
        };
        let mut surface = HeadlessList::new().with_viewport(5);
        surface.reload_data(&source);

        assert_eq!(surface.section_count(), 2);
        assert_eq!(surface.total_rows(), 7);
        assert_eq!(
            surface.visible_index_paths(),
            vec![
                IndexPath::new(0, 0),
                IndexPath::new(0, 1),
                IndexPath::new(0, 2),
                IndexPath::new(1, 0),
                IndexPath::new(1, 1),
            ]
        );

        surface.scroll_to(100);
        assert_eq!(surface.content_offset(), 2);
        assert_eq!(surface.visible_index_paths().last(), Some(&IndexPath::new(1, 3)));
    }

    #[test]
    fn test_cell_requests_only_for_new_or_stale_rows() {
        let mut fx = Fixture::new();
        let s0 = fx.section();
        let rows = fx.rows(4);
        let mut surface = HeadlessList::new().with_viewport(2);
        surface.reload_data(&Keys {
            sections: vec![(s0, rows.clone())],
        });

        assert_eq!(surface.take_cell_requests().len(), 2);
        assert!(surface.take_cell_requests().is_empty());

        surface.scroll_to(1);
        assert_eq!(
            surface.take_cell_requests(),
            vec![CellRequest::Row(IndexPath::new(0, 2))]
        );

        surface.begin_updates();
        surface.reload_rows(&[IndexPath::new(0, 1)], RowAnimation::Fade);
        surface
            .end_updates(&Keys {
                sections: vec![(s0, rows)],
            })
            .unwrap();
        assert_eq!(
            surface.take_cell_requests(),
            vec![CellRequest::Row(IndexPath::new(0, 1))]
        );
    }

    #[test]
    fn test_batch_with_simultaneous_semantics() {
        let mut fx = Fixture::new();
        let s0 = fx.section();
        let r = fx.rows(4); // a b c d
        let e = fx.rows(1)[0];
        let mut surface = HeadlessList::new();
        surface.reload_data(&Keys {
            sections: vec![(s0, r.clone())],
        });

        // a b c d -> d b e c: delete a, insert e at 2, move d to 0.
        let after = Keys {
            sections: vec![(s0, vec![r[3], r[1], e, r[2]])],
        };
        surface.begin_updates();
        surface.delete_rows(&[IndexPath::new(0, 0)], RowAnimation::Automatic);
        surface.insert_rows(&[IndexPath::new(0, 2)], RowAnimation::Automatic);
        surface.move_row(IndexPath::new(0, 3), IndexPath::new(0, 0), RowAnimation::Automatic);
        surface.end_updates(&after).unwrap();

        assert_eq!(surface.row_keys(0), Some(&[r[3], r[1], e, r[2]][..]));
    }

    #[test]
    fn test_section_moves_and_inserts() {
        let mut fx = Fixture::new();
        let (a, b, c) = (fx.section(), fx.section(), fx.section());
        let (ra, rb, rc) = (fx.rows(1), fx.rows(2), fx.rows(1));
        let mut surface = HeadlessList::new();
        surface.reload_data(&Keys {
            sections: vec![(a, ra.clone()), (b, rb.clone())],
        });

        let after = Keys {
            sections: vec![(b, rb), (c, rc), (a, ra)],
        };
        surface.begin_updates();
        surface.insert_sections(&[1], RowAnimation::Fade);
        surface.move_section(0, 2);
        surface.end_updates(&after).unwrap();
        assert_eq!(surface.section_keys(), vec![b, c, a]);
    }

    #[test]
    fn test_wrong_row_count_is_rejected_and_state_kept() {
        let mut fx = Fixture::new();
        let s0 = fx.section();
        let rows = fx.rows(3);
        let mut surface = HeadlessList::new();
        surface.reload_data(&Keys {
            sections: vec![(s0, rows.clone())],
        });

        surface.begin_updates();
        surface.delete_rows(&[IndexPath::new(0, 0)], RowAnimation::Fade);
        let err = surface
            .end_updates(&Keys {
                sections: vec![(s0, rows.clone())],
            })
            .unwrap_err();

        assert!(matches!(err, Error::Inconsistent { .. }));
        assert!(err.to_string().contains("invalid number of rows in section 0"));
        assert_eq!(surface.row_keys(0), Some(rows.as_slice()));
        assert_eq!(
            surface.calls().last(),
            Some(&SurfaceCall::EndUpdates { committed: false })
        );
    }

    #[test]
    fn test_out_of_range_row() {
        let mut fx = Fixture::new();
        let s0 = fx.section();
        let rows = fx.rows(2);
        let mut surface = HeadlessList::new();
        surface.reload_data(&Keys {
            sections: vec![(s0, rows.clone())],
        });

        surface.begin_updates();
        surface.reload_rows(&[IndexPath::new(0, 5)], RowAnimation::None);
        let err = surface
            .end_updates(&Keys {
                sections: vec![(s0, rows)],
            })
            .unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                kind: IndexKind::Row { section: 0 },
                index: 5,
                len: 2
            }
        ));
    }

    #[test]
    fn test_identity_mismatch_detected() {
        let mut fx = Fixture::new();
        let s0 = fx.section();
        let rows = fx.rows(2);
        let mut surface = HeadlessList::new();
        surface.reload_data(&Keys {
            sections: vec![(s0, rows.clone())],
        });

        // Counts match but the rows were swapped without a move.
        let swapped = Keys {
            sections: vec![(s0, vec![rows[1], rows[0]])],
        };
        surface.begin_updates();
        assert!(surface.end_updates(&swapped).is_err());

        let mut lenient = HeadlessList::new().with_identity_verification(false);
        lenient.reload_data(&Keys {
            sections: vec![(s0, rows)],
        });
        lenient.begin_updates();
        assert!(lenient.end_updates(&swapped).is_ok());
    }

    #[test]
    fn test_headers_follow_layout() {
        let mut fx = Fixture::new();
        let (s0, s1) = (fx.section(), fx.section());
        let mut surface = HeadlessList::new().with_viewport(10);
        let mut layout = LayoutConfiguration::default();
        layout.header_mode = HeaderMode::Supplementary;
        surface.apply_layout(&layout);
        surface.reload_data(&Keys {
            sections: vec![(s0, fx.rows(1)), (s1, vec![])],
        });

        assert_eq!(
            surface.take_cell_requests(),
            vec![
                CellRequest::SectionHeader(0),
                CellRequest::Row(IndexPath::new(0, 0)),
                CellRequest::SectionHeader(1),
            ]
        );
    }

    #[test]
    fn test_headers_of_changed_sections_go_stale() {
        let mut fx = Fixture::new();
        let (s0, s1) = (fx.section(), fx.section());
        let (r0, mut r1) = (fx.rows(2), fx.rows(1));
        let mut surface = HeadlessList::new().with_viewport(10);
        let mut layout = LayoutConfiguration::default();
        layout.header_mode = HeaderMode::Supplementary;
        layout.footer_mode = HeaderMode::Supplementary;
        surface.apply_layout(&layout);
        surface.reload_data(&Keys {
            sections: vec![(s0, r0.clone()), (s1, r1.clone())],
        });
        assert_eq!(surface.take_cell_requests().len(), 7);

        r1.extend(fx.rows(1));
        surface.begin_updates();
        surface.insert_rows(&[IndexPath::new(1, 1)], RowAnimation::Fade);
        surface
            .end_updates(&Keys {
                sections: vec![(s0, r0), (s1, r1)],
            })
            .unwrap();

        assert_eq!(
            surface.take_cell_requests(),
            vec![
                CellRequest::SectionHeader(1),
                CellRequest::Row(IndexPath::new(1, 1)),
                CellRequest::SectionFooter(1),
            ]
        );
        assert!(surface.take_cell_requests().is_empty());
    }
}
