//! The recycling list widget, seen from the list component.
//!
//! A [`ListSurface`] is the platform list: it owns scrolling, layout and the
//! on-screen cells. The component drives it through batch updates and feeds
//! it through a [`DataSource`] that already reflects the post-update shape
//! whenever a structural operation is committed.

use slotmap::new_key_type;

use crate::config::RowAnimation;
use crate::error::Result;
use crate::model::IndexPath;
use crate::style::LayoutConfiguration;

new_key_type! {
    /// Interned identity of a section in the live arrangement.
    ///
    /// A section keeps its key for as long as its identity stays in the list.
    pub struct SectionKey;

    /// Interned identity of a row in the live arrangement.
    ///
    /// Rows are keyed in one flat keyspace across all sections.
    pub struct RowKey;
}

/// Read access to the arrangement the surface renders.
pub trait DataSource {
    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of rows in `section`; zero if it does not exist.
    fn row_count(&self, section: usize) -> usize;

    /// Interned identity of the section at `section`.
    fn section_key(&self, section: usize) -> Option<SectionKey>;

    /// Interned identity of the row at `path`.
    fn row_key(&self, path: IndexPath) -> Option<RowKey>;
}

/// A cell the surface needs (re)configured before it can display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellRequest {
    /// The row cell at the path.
    Row(IndexPath),
    /// The header of the section.
    SectionHeader(usize),
    /// The footer of the section.
    SectionFooter(usize),
}

/// A recycling list widget.
///
/// Structural operations are only valid between [`begin_updates`] and
/// [`end_updates`]. Within one batch, deletions and move sources are
/// indices before the batch, insertions and move targets are indices after
/// it, exactly as in the [`Changeset`](crate::diff::Changeset) coordinate
/// convention. The batch is committed by `end_updates`, which must leave
/// the surface untouched and return an error if the result disagrees with
/// `source`.
///
/// [`begin_updates`]: ListSurface::begin_updates
/// [`end_updates`]: ListSurface::end_updates
pub trait ListSurface {
    /// Discard everything on screen and rebuild from `source` without
    /// animation.
    fn reload_data(&mut self, source: &dyn DataSource);

    /// Open a batch update.
    fn begin_updates(&mut self);

    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation);

    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation);

    fn move_section(&mut self, from: usize, to: usize);

    fn delete_rows(&mut self, paths: &[IndexPath], animation: RowAnimation);

    fn insert_rows(&mut self, paths: &[IndexPath], animation: RowAnimation);

    /// Reconfigure rows whose content changed in place.
    fn reload_rows(&mut self, paths: &[IndexPath], animation: RowAnimation);

    fn move_row(&mut self, from: IndexPath, to: IndexPath, animation: RowAnimation);

    /// Commit the batch against the post-update `source`.
    ///
    /// # Errors
    ///
    /// [`Error::Inconsistent`](crate::Error::Inconsistent) or
    /// [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if the
    /// operations do not turn the current contents into `source`.
    fn end_updates(&mut self, source: &dyn DataSource) -> Result<()>;

    /// Number of sections currently displayed.
    fn section_count(&self) -> usize;

    /// Number of rows currently displayed in `section`.
    fn row_count(&self, section: usize) -> Option<usize>;

    /// Paths of the rows inside the viewport, top to bottom.
    fn visible_index_paths(&self) -> Vec<IndexPath>;

    /// Cells that became visible or went stale since the last call.
    fn take_cell_requests(&mut self) -> Vec<CellRequest>;

    /// Move the scroll offset to the origin.
    fn scroll_to_top(&mut self, animated: bool);

    /// Replace the layout settings.
    fn apply_layout(&mut self, layout: &LayoutConfiguration);

    /// Stop the pull-to-refresh indicator.
    fn end_refreshing(&mut self);

    /// Whether the pull-to-refresh indicator is showing.
    fn is_refreshing(&self) -> bool;
}
