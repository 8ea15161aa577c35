//! Replaying changesets onto a live surface.

use smooth_list_core::PerfSpan;
use smooth_list_core::logging::targets;

use super::arrangement::Arrangement;
use super::surface::{DataSource, ListSurface};
use crate::config::AnimationConfiguration;
use crate::diff::{ChangeCounts, Changeset};
use crate::error::{Error, IndexKind, Result};
use crate::model::{Collection, IndexPath, ListItem, ListSection};

/// What to do when a changeset does not fit the live surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyPolicy {
    /// Panic with the inconsistency.
    Panic,
    /// Log, then rebuild the surface from the new snapshot without
    /// animation.
    Reload,
    /// Log, keep the last rendered state and return the error.
    Skip,
}

impl Default for ConsistencyPolicy {
    /// `Panic` in debug builds, `Reload` in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Reload
        }
    }
}

/// How a snapshot reached the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// First population: the surface was reloaded without animation.
    Reloaded,
    /// The changeset was replayed as one animated batch.
    Animated(ChangeCounts),
    /// The changeset was empty; nothing was sent to the surface.
    Unchanged,
    /// The changeset did not fit and the surface was reloaded instead.
    Recovered,
}

impl ApplyOutcome {
    /// Returns `true` if the surface contents changed.
    pub fn changed_surface(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Replays `changeset` onto `surface` and makes `new` the arrangement.
///
/// The arrangement handed to the surface as its data source already has
/// `new`'s shape when the batch is committed. Operations are issued in one
/// batch in this order: delete sections, insert sections, move sections,
/// delete rows, insert rows, reload rows, move rows. When the current
/// arrangement is empty the surface is reloaded instead.
///
/// `changeset` must have been computed from the current arrangement's
/// collection to `new`.
///
/// # Errors
///
/// With [`ConsistencyPolicy::Skip`], returns the
/// [`IndexOutOfRange`](Error::IndexOutOfRange) or
/// [`Inconsistent`](Error::Inconsistent) error that stopped the batch; the
/// arrangement is left as it was.
///
/// # Panics
///
/// With [`ConsistencyPolicy::Panic`], if the changeset does not fit the
/// surface.
pub fn apply<S, I, L>(
    surface: &mut L,
    arrangement: &mut Arrangement<S, I>,
    new: Collection<S, I>,
    changeset: &Changeset,
    animation: &AnimationConfiguration,
    policy: ConsistencyPolicy,
) -> Result<ApplyOutcome>
where
    S: ListSection,
    I: ListItem,
    L: ListSurface + ?Sized,
{
    let _span = PerfSpan::new("apply");

    let next = arrangement.rearranged(new);

    if arrangement.is_empty() {
        surface.reload_data(&next);
        tracing::debug!(
            target: targets::APPLY,
            sections = next.section_count(),
            "first population, reloaded without animation"
        );
        *arrangement = next;
        return Ok(ApplyOutcome::Reloaded);
    }

    if changeset.is_empty() {
        *arrangement = next;
        return Ok(ApplyOutcome::Unchanged);
    }

    let result = check_bounds(changeset, surface, &next).and_then(|()| {
        replay(surface, changeset, animation);
        surface.end_updates(&next)
    });

    match result {
        Ok(()) => {
            let counts = changeset.counts();
            tracing::debug!(target: targets::APPLY, changes = %counts, "batch update committed");
            *arrangement = next;
            Ok(ApplyOutcome::Animated(counts))
        }
        Err(err) => recover(surface, arrangement, next, err, policy),
    }
}

fn replay<L>(surface: &mut L, changeset: &Changeset, animation: &AnimationConfiguration)
where
    L: ListSurface + ?Sized,
{
    surface.begin_updates();
    if !changeset.deleted_sections.is_empty() {
        surface.delete_sections(&changeset.deleted_sections, animation.delete_section);
    }
    if !changeset.inserted_sections.is_empty() {
        surface.insert_sections(&changeset.inserted_sections, animation.insert_section);
    }
    for section_move in &changeset.moved_sections {
        surface.move_section(section_move.from, section_move.to);
    }
    if !changeset.deleted_items.is_empty() {
        surface.delete_rows(&changeset.deleted_items, animation.delete_rows);
    }
    if !changeset.inserted_items.is_empty() {
        surface.insert_rows(&changeset.inserted_items, animation.insert_rows);
    }
    if !changeset.updated_items.is_empty() {
        surface.reload_rows(&changeset.updated_items, animation.update_rows);
    }
    for item_move in &changeset.moved_items {
        surface.move_row(item_move.from, item_move.to, animation.move_rows);
    }
}

fn recover<S, I, L>(
    surface: &mut L,
    arrangement: &mut Arrangement<S, I>,
    next: Arrangement<S, I>,
    err: Error,
    policy: ConsistencyPolicy,
) -> Result<ApplyOutcome>
where
    S: ListSection,
    I: ListItem,
    L: ListSurface + ?Sized,
{
    tracing::error!(
        target: targets::APPLY,
        error = %err,
        ?policy,
        "changeset does not fit the live surface"
    );
    match policy {
        ConsistencyPolicy::Panic => panic!("inconsistent list update: {err}"),
        ConsistencyPolicy::Reload => {
            tracing::warn!(target: targets::APPLY, "falling back to a full reload");
            surface.reload_data(&next);
            *arrangement = next;
            Ok(ApplyOutcome::Recovered)
        }
        ConsistencyPolicy::Skip => Err(err),
    }
}

/// Checks source-side indices against the surface and target-side indices
/// against the new arrangement.
fn check_bounds<L>(changeset: &Changeset, surface: &L, next: &dyn DataSource) -> Result<()>
where
    L: ListSurface + ?Sized,
{
    let current_sections = surface.section_count();
    let next_sections = next.section_count();

    let section_in = |index: usize, len: usize| -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                kind: IndexKind::Section,
                index,
                len,
            })
        }
    };
    let current_row = |path: IndexPath| -> Result<()> {
        section_in(path.section(), current_sections)?;
        let len = surface.row_count(path.section()).unwrap_or(0);
        row_in(path, len)
    };
    let next_row = |path: IndexPath| -> Result<()> {
        section_in(path.section(), next_sections)?;
        row_in(path, next.row_count(path.section()))
    };

    for &section in &changeset.deleted_sections {
        section_in(section, current_sections)?;
    }
    for &section in &changeset.inserted_sections {
        section_in(section, next_sections)?;
    }
    for section_move in &changeset.moved_sections {
        section_in(section_move.from, current_sections)?;
        section_in(section_move.to, next_sections)?;
    }
    for &path in changeset.deleted_items.iter().chain(&changeset.updated_items) {
        current_row(path)?;
    }
    for &path in &changeset.inserted_items {
        next_row(path)?;
    }
    for item_move in &changeset.moved_items {
        current_row(item_move.from)?;
        next_row(item_move.to)?;
    }
    Ok(())
}

fn row_in(path: IndexPath, len: usize) -> Result<()> {
    if path.item() < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange {
            kind: IndexKind::Row {
                section: path.section(),
            },
            index: path.item(),
            len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RowAnimation;
    use crate::diff::compute;
    use crate::view::headless::{HeadlessList, SurfaceCall};

    #[derive(Clone, PartialEq, Debug)]
    struct Sec(u8);

    impl ListSection for Sec {
        type Id = u8;
        fn id(&self) -> u8 {
            self.0
        }
    }

    #[derive(Clone, PartialEq, Debug)]
    struct Row(u32, u32);

    impl ListItem for Row {
        type Id = u32;
        fn id(&self) -> u32 {
            self.0
        }
    }

    fn rows(ids: &[u32]) -> Vec<Row> {
        ids.iter().map(|&id| Row(id, 0)).collect()
    }

    fn step(
        surface: &mut HeadlessList,
        arrangement: &mut Arrangement<Sec, Row>,
        new: Collection<Sec, Row>,
        policy: ConsistencyPolicy,
    ) -> Result<ApplyOutcome> {
        let changeset = compute(arrangement.collection(), &new)?;
        apply(
            surface,
            arrangement,
            new,
            &changeset,
            &AnimationConfiguration::default(),
            policy,
        )
    }

    #[test]
    fn test_first_population_reloads() {
        let mut surface = HeadlessList::new();
        let mut arrangement = Arrangement::new();
        let outcome = step(
            &mut surface,
            &mut arrangement,
            Collection::from_pairs([(Sec(1), rows(&[1, 2]))]),
            ConsistencyPolicy::Panic,
        )
        .unwrap();

        assert_eq!(outcome, ApplyOutcome::Reloaded);
        assert_eq!(
            surface.calls(),
            &[SurfaceCall::ReloadData {
                sections: 1,
                rows: 2
            }]
        );
    }

    #[test]
    fn test_operation_order_in_batch() {
        let mut surface = HeadlessList::new();
        let mut arrangement = Arrangement::new();
        step(
            &mut surface,
            &mut arrangement,
            Collection::from_pairs([
                (Sec(1), vec![Row(1, 0), Row(2, 0), Row(3, 0), Row(8, 0)]),
                (Sec(2), rows(&[4])),
                (Sec(3), rows(&[5])),
            ]),
            ConsistencyPolicy::Panic,
        )
        .unwrap();
        surface.take_calls();

        let outcome = step(
            &mut surface,
            &mut arrangement,
            Collection::from_pairs([
                (Sec(3), rows(&[5])),
                (Sec(1), vec![Row(3, 1), Row(6, 0), Row(8, 0), Row(2, 0)]),
                (Sec(4), rows(&[7])),
            ]),
            ConsistencyPolicy::Panic,
        )
        .unwrap();

        let ApplyOutcome::Animated(counts) = outcome else {
            panic!("expected an animated update, got {outcome:?}");
        };
        assert_eq!(counts.deleted_sections, 1);
        assert_eq!(counts.inserted_sections, 1);

        let kinds: Vec<&'static str> = surface
            .calls()
            .iter()
            .map(|call| match call {
                SurfaceCall::BeginUpdates => "begin",
                SurfaceCall::DeleteSections(..) => "delete-sections",
                SurfaceCall::InsertSections(..) => "insert-sections",
                SurfaceCall::MoveSection { .. } => "move-section",
                SurfaceCall::DeleteRows(..) => "delete-rows",
                SurfaceCall::InsertRows(..) => "insert-rows",
                SurfaceCall::ReloadRows(..) => "reload-rows",
                SurfaceCall::MoveRow { .. } => "move-row",
                SurfaceCall::EndUpdates { committed: true } => "end",
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "begin",
                "delete-sections",
                "insert-sections",
                "move-section",
                "delete-rows",
                "insert-rows",
                "reload-rows",
                "move-row",
                "end"
            ]
        );
    }

    #[test]
    fn test_animation_per_category() {
        let mut surface = HeadlessList::new();
        let mut arrangement = Arrangement::new();
        step(
            &mut surface,
            &mut arrangement,
            Collection::from_pairs([(Sec(1), rows(&[1, 2]))]),
            ConsistencyPolicy::Panic,
        )
        .unwrap();
        surface.take_calls();

        let new = Collection::from_pairs([(Sec(1), rows(&[2, 3]))]);
        let changeset = compute(arrangement.collection(), &new).unwrap();
        let animation = AnimationConfiguration {
            delete_rows: RowAnimation::SlideLeft,
            insert_rows: RowAnimation::SlideBottom,
            ..AnimationConfiguration::uniform(RowAnimation::None)
        };
        apply(
            &mut surface,
            &mut arrangement,
            new,
            &changeset,
            &animation,
            ConsistencyPolicy::Panic,
        )
        .unwrap();

        assert!(surface.calls().contains(&SurfaceCall::DeleteRows(
            vec![IndexPath::new(0, 0)],
            RowAnimation::SlideLeft
        )));
        assert!(surface.calls().contains(&SurfaceCall::InsertRows(
            vec![IndexPath::new(0, 1)],
            RowAnimation::SlideBottom
        )));
    }

    #[test]
    fn test_unchanged_issues_nothing() {
        let mut surface = HeadlessList::new();
        let mut arrangement = Arrangement::new();
        let data = Collection::from_pairs([(Sec(1), rows(&[1]))]);
        step(&mut surface, &mut arrangement, data.clone(), ConsistencyPolicy::Panic).unwrap();
        surface.take_calls();

        let outcome = step(&mut surface, &mut arrangement, data, ConsistencyPolicy::Panic).unwrap();
        assert_eq!(outcome, ApplyOutcome::Unchanged);
        assert!(surface.calls().is_empty());
    }

    fn desynchronized() -> (HeadlessList, Arrangement<Sec, Row>, Collection<Sec, Row>, Changeset) {
        let mut surface = HeadlessList::new();
        let mut arrangement = Arrangement::new();
        step(
            &mut surface,
            &mut arrangement,
            Collection::from_pairs([(Sec(1), rows(&[1, 2, 3]))]),
            ConsistencyPolicy::Panic,
        )
        .unwrap();
        // A changeset computed against a snapshot the surface never showed.
        let stale_old = Collection::from_pairs([(Sec(1), rows(&[1, 2, 3, 4, 5]))]);
        let new = Collection::from_pairs([(Sec(1), rows(&[1, 2, 3, 4]))]);
        let changeset = compute(&stale_old, &new).unwrap();
        (surface, arrangement, new, changeset)
    }

    #[test]
    fn test_skip_keeps_last_good_state() {
        let (mut surface, mut arrangement, new, changeset) = desynchronized();
        let before = arrangement.collection().clone();

        let err = apply(
            &mut surface,
            &mut arrangement,
            new,
            &changeset,
            &AnimationConfiguration::default(),
            ConsistencyPolicy::Skip,
        )
        .unwrap_err();

        assert!(err.is_desync());
        assert_eq!(arrangement.collection(), &before);
        assert_eq!(surface.total_rows(), 3);
    }

    #[test]
    fn test_reload_recovers() {
        let (mut surface, mut arrangement, new, changeset) = desynchronized();
        let outcome = apply(
            &mut surface,
            &mut arrangement,
            new,
            &changeset,
            &AnimationConfiguration::default(),
            ConsistencyPolicy::Reload,
        )
        .unwrap();

        assert_eq!(outcome, ApplyOutcome::Recovered);
        assert_eq!(surface.total_rows(), 4);
        assert_eq!(arrangement.collection().item_count(), 4);
    }

    #[test]
    #[should_panic(expected = "inconsistent list update")]
    fn test_panic_policy() {
        let (mut surface, mut arrangement, new, changeset) = desynchronized();
        let _ = apply(
            &mut surface,
            &mut arrangement,
            new,
            &changeset,
            &AnimationConfiguration::default(),
            ConsistencyPolicy::Panic,
        );
    }
}
