//! Identity-based reconciliation of two sectioned snapshots.

use std::collections::HashMap;

use smooth_list_core::PerfSpan;
use smooth_list_core::logging::targets;

use super::changeset::{Changeset, ItemMove, SectionMove};
use crate::error::Result;
use crate::model::{Collection, IndexPath, ListItem, ListSection};

/// Computes the changeset that turns `old` into `new`.
///
/// Sections and items are matched by identity. Survivors that keep their
/// relative order stay put; the rest of the survivors are reported as moves,
/// so the number of moves is minimal. An item that changed value in place is
/// reported as an update; an item that both moved and changed value is
/// reported as a deletion plus an insertion so its content is rebuilt. Items
/// that changed section are always a deletion plus an insertion.
///
/// No item operations are emitted for rows of inserted or deleted sections:
/// the section operation covers them.
///
/// # Errors
///
/// Returns [`Error::DuplicateIdentity`](crate::Error::DuplicateIdentity) if
/// either snapshot repeats a section identity, or repeats an item identity
/// anywhere in the collection.
///
/// # Example
///
/// ```
/// use smooth_list::diff::compute;
/// use smooth_list::model::{Collection, IndexPath, ListItem};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Row(char);
///
/// impl ListItem for Row {
///     type Id = char;
///     fn id(&self) -> char {
///         self.0
///     }
/// }
///
/// let old = Collection::single_section(vec![Row('a'), Row('b'), Row('c')]);
/// let new = Collection::single_section(vec![Row('a'), Row('c')]);
///
/// let changeset = compute(&old, &new).unwrap();
/// assert_eq!(changeset.deleted_items, vec![IndexPath::new(0, 1)]);
/// assert_eq!(changeset.counts().total(), 1);
/// ```
pub fn compute<S, I>(old: &Collection<S, I>, new: &Collection<S, I>) -> Result<Changeset>
where
    S: ListSection,
    I: ListItem,
{
    let _span = PerfSpan::new("diff");

    let old_sections = old.section_positions()?;
    let new_sections = new.section_positions()?;
    old.item_positions()?;
    new.item_positions()?;

    let mut changeset = Changeset::new();

    for (index, section) in old.sections().iter().enumerate() {
        if !new_sections.contains_key(&section.id()) {
            changeset.deleted_sections.push(index);
        }
    }
    for (index, section) in new.sections().iter().enumerate() {
        if !old_sections.contains_key(&section.id()) {
            changeset.inserted_sections.push(index);
        }
    }

    // Surviving sections in old order, paired with their new index.
    let survivors: Vec<(usize, usize)> = old
        .sections()
        .iter()
        .enumerate()
        .filter_map(|(from, section)| new_sections.get(&section.id()).map(|&to| (from, to)))
        .collect();

    let destinations: Vec<usize> = survivors.iter().map(|&(_, to)| to).collect();
    let stationary = stationary_mask(&destinations);
    for (&(from, to), &keep) in survivors.iter().zip(&stationary) {
        if !keep {
            changeset.moved_sections.push(SectionMove { from, to });
        }
    }

    for &(from, to) in &survivors {
        diff_section_items(
            from,
            &old.sections()[from].items,
            to,
            &new.sections()[to].items,
            &mut changeset,
        );
    }

    changeset.normalize();

    tracing::debug!(
        target: targets::DIFF,
        old_sections = old.section_count(),
        new_sections = new.section_count(),
        old_items = old.item_count(),
        new_items = new.item_count(),
        changes = %changeset,
        "computed changeset"
    );

    Ok(changeset)
}

/// Reconciles the rows of one section present in both snapshots.
fn diff_section_items<I: ListItem>(
    old_section: usize,
    old_items: &[I],
    new_section: usize,
    new_items: &[I],
    changeset: &mut Changeset,
) {
    let new_index: HashMap<I::Id, usize> = new_items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id(), index))
        .collect();
    let old_index: HashMap<I::Id, usize> = old_items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id(), index))
        .collect();

    // Common rows in old order: (old index, new index).
    let mut common = Vec::new();
    for (from, item) in old_items.iter().enumerate() {
        match new_index.get(&item.id()) {
            Some(&to) => common.push((from, to)),
            None => changeset
                .deleted_items
                .push(IndexPath::new(old_section, from)),
        }
    }
    for (to, item) in new_items.iter().enumerate() {
        if !old_index.contains_key(&item.id()) {
            changeset.inserted_items.push(IndexPath::new(new_section, to));
        }
    }

    let destinations: Vec<usize> = common.iter().map(|&(_, to)| to).collect();
    let stationary = stationary_mask(&destinations);

    for (&(from, to), &keep) in common.iter().zip(&stationary) {
        let source = IndexPath::new(old_section, from);
        let target = IndexPath::new(new_section, to);
        let unchanged = old_items[from] == new_items[to];

        match (keep, unchanged) {
            (true, true) => {}
            (true, false) => changeset.updated_items.push(source),
            (false, true) => changeset.moved_items.push(ItemMove {
                from: source,
                to: target,
            }),
            (false, false) => {
                changeset.deleted_items.push(source);
                changeset.inserted_items.push(target);
            }
        }
    }
}

/// Marks the members of one longest strictly increasing subsequence.
///
/// `positions` lists the new positions of surviving elements in their old
/// order. Marked elements keep their relative order and need no move.
/// Patience sorting with back-pointers, `O(n log n)`.
pub(crate) fn stationary_mask(positions: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; positions.len()];

    for (index, &value) in positions.iter().enumerate() {
        let slot = tails.partition_point(|&tail| positions[tail] < value);
        if slot > 0 {
            previous[index] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(index);
        } else {
            tails[slot] = index;
        }
    }

    let mut mask = vec![false; positions.len()];
    let mut cursor = tails.last().copied();
    while let Some(index) = cursor {
        mask[index] = true;
        cursor = previous[index];
    }
    mask
}
