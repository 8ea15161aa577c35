//! End-to-end scenarios driving a `SmoothList` over a headless surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use smooth_list::config::{Color, ListConfiguration, RowAnimation, SeparatorConfiguration};
use smooth_list::diff::compute;
use smooth_list::model::{Collection, EmptySection, IndexPath, ItemFlags, ListItem};
use smooth_list::style::{Appearance, ListStyle};
use smooth_list::view::{
    ApplyOutcome, ConsistencyPolicy, HeadlessList, RowDeletion, SurfaceCall, SwipeAction,
    SwipeEdge,
};
use smooth_list::{Error, PendingReport, SmoothList};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Clone, PartialEq, Debug)]
struct Employee {
    id: u32,
    name: String,
    /// Managers cannot be swiped away.
    manager: bool,
}

impl ListItem for Employee {
    type Id = u32;
    fn id(&self) -> u32 {
        self.id
    }
    fn flags(&self) -> ItemFlags {
        ItemFlags::new().with_editable(!self.manager)
    }
}

fn employee(id: u32) -> Employee {
    Employee {
        id,
        name: format!("emp {id}"),
        manager: id % 10 == 0,
    }
}

type Employees = Collection<EmptySection, Employee>;
type Directory = SmoothList<EmptySection, Employee, String, HeadlessList>;

fn employees(ids: impl IntoIterator<Item = u32>) -> Employees {
    Collection::single_section(ids.into_iter().map(employee).collect())
}

fn directory() -> Directory {
    SmoothList::builder(|e: &Employee| e.name.clone()).build()
}

fn counter(list: &Directory) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = count.clone();
    list.signals().load_more.connect(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    count
}

fn surface(list: &mut Directory) -> &mut HeadlessList {
    list.controller_mut().surface_mut().unwrap()
}

#[test]
fn test_paginated_load_more() {
    init_tracing();
    let mut list = directory();
    let loads = counter(&list);

    // The load-more handler fetches the next page and posts it back.
    let sender = list.sender();
    list.signals().load_more.connect(move |_| {
        sender.send(employees(1..=100)).unwrap();
    });

    list.set_data(employees(1..=50)).unwrap();
    list.appear(HeadlessList::new().with_viewport(12)).unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 0);

    surface(&mut list).scroll_to_bottom();
    list.layout_cells().unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(list.pending_count(), 1);

    // Reflowing the same rows does not ask again.
    list.layout_cells().unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    surface(&mut list).take_calls();
    let report = list.process_pending().unwrap();
    assert_eq!(report, PendingReport { applied: 1, skipped: 0 });

    let calls = surface(&mut list).take_calls();
    let structural: Vec<&SurfaceCall> = calls.iter().filter(|c| c.is_structural()).collect();
    assert_eq!(structural.len(), 1);
    let SurfaceCall::InsertRows(paths, _) = structural[0] else {
        panic!("expected row insertions, got {structural:?}");
    };
    assert_eq!(paths.len(), 50);
    assert_eq!(paths[0], IndexPath::new(0, 50));
    assert!(calls.contains(&SurfaceCall::EndUpdates { committed: true }));

    let changeset = compute(&employees(1..=50), &employees(1..=100)).unwrap();
    assert_eq!(changeset.inserted_items.len(), 50);
    assert_eq!(changeset.counts().total(), 50);

    // Item 50 is re-rendered while scrolling a little further; the old end
    // of the list does not fire again.
    surface(&mut list).scroll_to(40);
    list.layout_cells().unwrap();
    assert!(list.controller().realized_cell(IndexPath::new(0, 49)).is_some());
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(list.data().item_count(), 100);
}

#[test]
fn test_swipe_delete_round_trip() {
    init_tracing();
    let mut list = directory();
    list.set_data(employees(1..=12)).unwrap();
    list.appear(HeadlessList::new()).unwrap();

    let deleted = Arc::new(Mutex::new(Vec::new()));
    let sink = deleted.clone();
    list.signals()
        .row_deleted
        .connect(move |deletion: &RowDeletion<EmptySection, Employee>| {
            sink.lock().push(deletion.clone());
        });

    // Employee 10 is a manager.
    let manager = IndexPath::new(0, 9);
    let actions = list
        .controller()
        .swipe_actions(SwipeEdge::Trailing, manager)
        .unwrap();
    assert!(actions.is_empty());

    let path = IndexPath::new(0, 2);
    let actions = list.controller().swipe_actions(SwipeEdge::Trailing, path).unwrap();
    assert_eq!(actions.actions.len(), 1);
    assert!(actions.actions[0].is_destructive());
    assert!(deleted.lock().is_empty());

    assert!(list
        .controller_mut()
        .confirm_swipe_action(SwipeEdge::Trailing, path, 0)
        .unwrap());
    let deletion = deleted.lock()[0].clone();
    assert_eq!(deletion.index_path(), path);
    assert_eq!(deletion.section, EmptySection);
    assert_eq!(deletion.item, employee(3));

    // Removing the row is up to the caller.
    assert_eq!(list.data().item_count(), 12);
    let remaining = list.data().filtered(|e| e.id != deletion.item.id);
    let outcome = list.set_data(remaining).unwrap();
    assert!(matches!(outcome, ApplyOutcome::Animated(counts) if counts.deleted_items == 1 && counts.total() == 1));
    assert_eq!(list.data().item_count(), 11);
}

#[test]
fn test_restyle_keeps_behavior_and_separators() {
    let separator = SeparatorConfiguration {
        color: Some(Color::from_rgb8(198, 198, 200)),
        ..SeparatorConfiguration::default()
    };
    let mut list: Directory = SmoothList::builder(|e: &Employee| e.name.clone())
        .configuration(ListConfiguration::default().with_separator(separator))
        .build();
    list.appear(HeadlessList::new()).unwrap();
    list.set_data(employees(1..=5)).unwrap();

    let archived = Arc::new(Mutex::new(Vec::new()));
    let sink = archived.clone();
    list.set_swipe_actions(SwipeEdge::Leading, true, move |_: IndexPath, e: &Employee| {
        let sink = sink.clone();
        let id = e.id;
        vec![SwipeAction::custom("Archive", move |_| sink.lock().push(id))]
    })
    .unwrap();

    for style in [ListStyle::Grouped, ListStyle::Inset, ListStyle::Sidebar] {
        list.set_style(style).unwrap();
        let layout = list.controller().layout();
        assert_eq!(layout.appearance, style.appearance());
        assert_eq!(layout.separator_color, Some(Color::from_rgb8(198, 198, 200)));

        let path = IndexPath::new(0, 1);
        let leading = list.controller().swipe_actions(SwipeEdge::Leading, path).unwrap();
        assert_eq!(leading.actions.len(), 1);
        let trailing = list.controller().swipe_actions(SwipeEdge::Trailing, path).unwrap();
        assert_eq!(trailing.actions.len(), 1);
    }
    assert_eq!(ListStyle::Inset.appearance(), Appearance::InsetGrouped);

    list.controller_mut()
        .confirm_swipe_action(SwipeEdge::Leading, IndexPath::new(0, 4), 0)
        .unwrap();
    assert_eq!(*archived.lock(), vec![5]);
}

#[test]
fn test_configured_animations_reach_surface() {
    let config = ListConfiguration::from_toml_str(
        r#"
        [animation]
        delete_rows = "slide-left"
        insert_rows = "fade"
        "#,
    )
    .unwrap();
    let mut list: Directory = SmoothList::builder(|e: &Employee| e.name.clone())
        .configuration(config)
        .build();
    list.set_data(employees(1..=4)).unwrap();
    list.appear(HeadlessList::new()).unwrap();

    list.set_data(employees([1, 3, 4, 5])).unwrap();
    let calls = surface(&mut list).take_calls();
    assert!(calls.contains(&SurfaceCall::DeleteRows(vec![IndexPath::new(0, 1)], RowAnimation::SlideLeft)));
    assert!(calls.contains(&SurfaceCall::InsertRows(vec![IndexPath::new(0, 3)], RowAnimation::Fade)));
}

#[test]
fn test_search_round_trip() {
    let everyone = employees(1..=30);
    let mut list: Directory = SmoothList::builder(|e: &Employee| e.name.clone())
        .searchable()
        .data(everyone.clone())
        .build();
    list.appear(HeadlessList::new()).unwrap();

    // Filtering is the caller's job: it hands the filtered data back.
    let sender = list.sender();
    list.signals().search_text_changed.connect(move |text: &String| {
        let filtered = everyone.filtered(|e| e.name.contains(text.as_str()));
        sender.send(filtered).unwrap();
    });

    assert!(list.set_search_text("emp 2"));
    assert!(!list.set_search_text("emp 2"));
    assert_eq!(list.process_pending().unwrap().applied, 1);
    // "emp 2" and "emp 20" through "emp 29".
    assert_eq!(list.data().item_count(), 11);

    assert!(list.set_search_text(""));
    list.process_pending().unwrap();
    assert_eq!(list.data().item_count(), 30);
}

#[test]
fn test_updates_from_other_threads_apply_in_order() {
    let mut list = directory();
    list.appear(HeadlessList::new()).unwrap();

    let sender = list.sender();
    std::thread::spawn(move || {
        sender.send(employees(1..=10)).unwrap();
        sender.send(employees(1..=20)).unwrap();
        sender.send(employees([1, 2, 2])).unwrap();
        sender.send(employees(5..=25)).unwrap();
    })
    .join()
    .unwrap();

    assert_eq!(list.pending_count(), 4);
    let report = list.process_pending().unwrap();
    assert_eq!(report, PendingReport { applied: 3, skipped: 1 });
    assert_eq!(list.data(), &employees(5..=25));
}

#[test]
fn test_set_data_processes_queue_first() {
    let mut list = directory();
    list.appear(HeadlessList::new()).unwrap();
    list.sender().send(employees(1..=3)).unwrap();

    list.set_data(employees(1..=4)).unwrap();
    assert_eq!(list.pending_count(), 0);
    assert_eq!(list.data(), &employees(1..=4));
}

#[test]
fn test_disappear_disconnects_senders() {
    let mut list = directory();
    list.appear(HeadlessList::new()).unwrap();
    let sender = list.sender();
    sender.send(employees(1..=5)).unwrap();

    assert!(list.disappear().is_some());
    assert_eq!(list.pending_count(), 0);
    assert!(matches!(
        sender.send(employees(1..=6)),
        Err(smooth_list_core::Error::Disconnected)
    ));
    assert!(list.sender().send(employees(1..=7)).is_err());
    assert_eq!(list.pending_count(), 0);
}

#[test]
fn test_duplicate_snapshot_keeps_rendered_state() {
    init_tracing();
    let mut list = directory();
    list.appear(HeadlessList::new()).unwrap();
    list.set_data(employees(1..=5)).unwrap();
    let calls_before = list.controller().surface().unwrap().calls().len();

    let err = list.set_data(employees([1, 2, 3, 3])).unwrap_err();
    assert!(matches!(err, Error::DuplicateIdentity { ref identity, .. } if identity == "3"));
    assert_eq!(list.data(), &employees(1..=5));
    assert_eq!(list.controller().surface().unwrap().calls().len(), calls_before);

    // The next good snapshot is diffed against the last rendered one.
    let outcome = list.set_data(employees(1..=6)).unwrap();
    assert!(matches!(outcome, ApplyOutcome::Animated(counts) if counts.inserted_items == 1));
}

#[test]
fn test_desync_recovers_with_reload() {
    let mut list: Directory = SmoothList::builder(|e: &Employee| e.name.clone())
        .consistency_policy(ConsistencyPolicy::Reload)
        .build();
    list.appear(HeadlessList::new()).unwrap();
    list.set_data(employees(1..=3)).unwrap();

    // A changeset computed against some other snapshot.
    let stale = compute(&employees(1..=9), &employees(1..=4)).unwrap();
    let outcome = list
        .controller_mut()
        .apply(employees(1..=4), &stale)
        .unwrap();
    assert_eq!(outcome, ApplyOutcome::Recovered);
    assert_eq!(list.data(), &employees(1..=4));
    assert_eq!(list.controller().surface().unwrap().total_rows(), 4);
}

#[test]
fn test_desync_skipped_keeps_state() {
    let mut list: Directory = SmoothList::builder(|e: &Employee| e.name.clone())
        .consistency_policy(ConsistencyPolicy::Skip)
        .build();
    list.appear(HeadlessList::new()).unwrap();
    list.set_data(employees(1..=3)).unwrap();

    let stale = compute(&employees(1..=9), &employees(1..=4)).unwrap();
    let err = list
        .controller_mut()
        .apply(employees(1..=4), &stale)
        .unwrap_err();
    assert!(err.is_desync());
    assert_eq!(list.data(), &employees(1..=3));
    assert_eq!(list.controller().surface().unwrap().total_rows(), 3);
}

#[test]
#[should_panic(expected = "inconsistent list update")]
fn test_desync_panics_when_asked() {
    let mut list: Directory = SmoothList::builder(|e: &Employee| e.name.clone())
        .consistency_policy(ConsistencyPolicy::Panic)
        .build();
    list.appear(HeadlessList::new()).unwrap();
    list.set_data(employees(1..=3)).unwrap();

    let stale = compute(&employees(1..=9), &employees(1..=4)).unwrap();
    let _ = list.controller_mut().apply(employees(1..=4), &stale);
}

#[test]
fn test_refresh_and_scroll_to_top() {
    let mut list = directory();
    let refreshes = Arc::new(AtomicUsize::new(0));
    let sink = refreshes.clone();
    list.signals().refresh.connect(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    list.appear(HeadlessList::new().with_viewport(5)).unwrap();
    list.set_data(employees(1..=20)).unwrap();

    surface(&mut list).pull_to_refresh();
    list.handle_refresh().unwrap();
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    assert!(!list.controller().is_refreshing());

    surface(&mut list).scroll_to(10);
    assert!(list.scroll_to_top(true).unwrap());
    assert_eq!(list.controller().surface().unwrap().content_offset(), 0);
    assert!(!list.scroll_to_top(true).unwrap());
}
