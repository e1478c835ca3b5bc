//! Integration tests driving a table through its public API.
//!
//! Persistence tests use an isolated session store per test, or a SQLite file
//! in a temporary directory.

use std::sync::Arc;
use std::time::Duration;

use gridstate_lib::columns::DropPosition;
use gridstate_lib::columns::ResizeMode;
use gridstate_lib::filter::MatchMode;
use gridstate_lib::model::Column;
use gridstate_lib::model::Record;
use gridstate_lib::model::RowRef;
use gridstate_lib::selection::Identity;
use gridstate_lib::selection::Modifiers;
use gridstate_lib::selection::SelectionMode;
use gridstate_lib::sort::SortDescriptor;
use gridstate_lib::sort::SortSpec;
use gridstate_lib::state::MemoryStorage;
use gridstate_lib::state::SqliteStorage;
use gridstate_lib::state::StorageSet;
use gridstate_lib::{TableConfig, TableController, TableEvent};

fn record(id: i64, name: &str) -> RowRef {
    Arc::new(Record::new().set("id", id).set("name", name))
}

fn ids(rows: &[RowRef]) -> Vec<i64> {
    rows.iter().map(|r| r.get_int("id").unwrap().unwrap()).collect()
}

fn columns() -> Vec<Column> {
    vec![Column::new("id", "Id"), Column::new("name", "Name")]
}

fn immediate() -> TableConfig {
    TableConfig::default().with_filter_delay(Duration::ZERO)
}

fn isolated_session() -> StorageSet {
    StorageSet::new().with_session(Arc::new(MemoryStorage::new()))
}

fn lazy_loads(events: &[TableEvent]) -> usize {
    events.iter().filter(|e| matches!(e, TableEvent::LazyLoad(_))).count()
}

// =============================================================================
// Sorting and filtering
// =============================================================================

#[test]
fn test_sort_by_name_ascending() {
    let mut table = TableController::new(immediate(), columns());
    table.set_records(vec![record(1, "b"), record(2, "a")]).unwrap();

    table.sort_by("name", false).unwrap();

    assert_eq!(ids(table.visible_records()), vec![2, 1]);
    assert!(matches!(
        table.take_events().as_slice(),
        [TableEvent::SortChanged(SortSpec::Single(_))]
    ));
}

#[test]
fn test_filter_starts_with() {
    let mut table = TableController::new(immediate(), columns());
    table.set_records(vec![record(1, "b"), record(2, "a")]).unwrap();

    table.filter("name", "a", MatchMode::StartsWith).unwrap();

    assert_eq!(ids(table.visible_records()), vec![2]);
    let visible = table.take_events().into_iter().find_map(|e| match e {
        TableEvent::FilterChanged { visible, .. } => Some(visible),
        _ => None,
    });
    assert_eq!(ids(&visible.unwrap()), vec![2]);
}

#[test]
fn test_global_filter_scans_columns() {
    let mut table = TableController::new(immediate(), columns());
    table
        .set_records(vec![record(1, "apple"), record(2, "banana"), record(3, "cherry")])
        .unwrap();

    table.filter_global("an", MatchMode::Contains).unwrap();
    assert_eq!(ids(table.processed()), vec![2]);

    // Clearing the only filter restores every row.
    table.filter_global("", MatchMode::Contains).unwrap();
    assert!(table.filtered().is_none());
    assert!(!table.has_filter());
}

#[test]
fn test_bus_tracks_visible_rows() {
    let mut table = TableController::new(immediate().with_paginator(2), columns());
    let value = table.bus().watch_value();
    let total = table.bus().watch_total();
    let mut sort = table.bus().subscribe_sort();

    table
        .set_records(vec![record(1, "c"), record(2, "a"), record(3, "b")])
        .unwrap();
    assert_eq!(value.borrow().len(), 2);
    assert_eq!(*total.borrow(), 3);

    table.sort_by("name", false).unwrap();
    assert_eq!(ids(&value.borrow()), vec![2, 3]);
    assert_eq!(sort.try_recv().unwrap(), SortSpec::Single(SortDescriptor::asc("name")));
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_shift_click_selects_range() {
    let config = immediate().with_selection(SelectionMode::Multiple, Identity::key("id"));
    let mut table = TableController::new(config, columns());
    table
        .set_records(vec![record(1, "a"), record(2, "b"), record(3, "c")])
        .unwrap();

    table.click_row(0, Modifiers::NONE).unwrap();
    table.click_row(2, Modifiers::shift()).unwrap();

    assert_eq!(ids(table.selection()), vec![1, 2, 3]);
    let mut keys: Vec<_> = table.selection_keys().iter().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["1", "2", "3"]);
}

#[test]
fn test_selection_survives_data_refresh_by_key() {
    let config = immediate().with_selection(SelectionMode::Multiple, Identity::key("id"));
    let mut table = TableController::new(config, columns());
    table.set_records(vec![record(1, "a"), record(2, "b")]).unwrap();
    table.click_row(1, Modifiers::NONE).unwrap();

    let fresh = vec![record(1, "a"), record(2, "b2")];
    table.set_records(fresh.clone()).unwrap();

    assert!(table.is_selected(&fresh[1]));
    assert!(Arc::ptr_eq(&table.selection()[0], &fresh[1]));
}

#[test]
fn test_context_menu_joint_selection() {
    let config = immediate().with_selection(SelectionMode::Single, Identity::Reference);
    let mut table = TableController::new(config, columns());
    let rows = vec![record(1, "a"), record(2, "b")];
    table.set_records(rows.clone()).unwrap();
    let mut menu = table.bus().subscribe_context_menu();

    table.context_menu(1).unwrap();

    assert!(table.is_selected(&rows[1]));
    assert!(Arc::ptr_eq(&menu.try_recv().unwrap(), &rows[1]));
    assert!(
        table
            .take_events()
            .iter()
            .any(|e| matches!(e, TableEvent::ContextMenuSelect { index: Some(1), .. }))
    );
}

// =============================================================================
// Lazy loading
// =============================================================================

#[test]
fn test_clear_emits_single_lazy_request() {
    let mut table = TableController::new(immediate().with_lazy().with_paginator(10), columns());
    table.init().unwrap();
    table.sort_by("name", false).unwrap();
    table.filter("name", "a", MatchMode::Contains).unwrap();
    table.take_events();

    table.clear().unwrap();

    let events = table.take_events();
    assert_eq!(lazy_loads(&events), 1);
    assert_eq!(table.sort(), &SortSpec::None);
    assert!(!table.has_filter());
    assert_eq!(table.page_window().offset(), 0);
}

#[test]
fn test_lazy_restore_emits_one_request() {
    let storages = isolated_session();
    let config = immediate()
        .with_lazy()
        .with_paginator(10)
        .with_state("lazy", "session");

    let mut first = TableController::new(config.clone(), columns()).with_storages(storages.clone());
    first.init().unwrap();
    first.set_total_records(100);
    first.sort_by("name", false).unwrap();
    first.change_page(30, 10).unwrap();

    let mut second = TableController::new(config, columns()).with_storages(storages);
    second.init().unwrap();

    let events = second.take_events();
    let requests: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            TableEvent::LazyLoad(request) => Some(request),
            _ => None,
        })
        .collect();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].offset, 30);
    assert_eq!(requests[0].sort, SortSpec::Single(SortDescriptor::asc("name")));
    assert!(matches!(events.last(), Some(TableEvent::StateRestored(_))));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_restore_reproduces_sort_filter_and_page() {
    let storages = isolated_session();
    let config = immediate().with_paginator(2).with_state("t1", "session");
    let rows = || {
        vec![
            record(1, "a1"),
            record(2, "a2"),
            record(3, "b"),
            record(4, "a3"),
            record(5, "a4"),
            record(6, "a5"),
        ]
    };

    let mut first = TableController::new(config.clone(), columns()).with_storages(storages.clone());
    first.set_records(rows()).unwrap();
    first.filter("name", "a", MatchMode::StartsWith).unwrap();
    first.sort_by("name", false).unwrap();
    first.sort_by("name", false).unwrap();
    first.go_to_page(1).unwrap();
    let saved = first.save_state().unwrap().unwrap();
    assert_eq!(saved.first, Some(2));

    let mut second = TableController::new(config, columns()).with_storages(storages);
    second.set_records(rows()).unwrap();
    assert!(second.restore_state().unwrap());

    assert_eq!(second.page_window().offset(), first.page_window().offset());
    assert_eq!(second.sort(), first.sort());
    assert_eq!(second.filters(), first.filters());
    assert_eq!(ids(second.visible_records()), ids(first.visible_records()));
    assert_eq!(ids(second.visible_records()), vec![4, 2]);
}

#[test]
fn test_restore_does_not_save_during_replay() {
    let storages = isolated_session();
    let config = immediate().with_paginator(5).with_state("quiet", "session");

    let mut first = TableController::new(config.clone(), columns()).with_storages(storages.clone());
    first.set_records(vec![record(1, "a")]).unwrap();
    first.sort_by("name", false).unwrap();

    let mut second = TableController::new(config, columns()).with_storages(storages);
    second.set_records(vec![record(1, "a")]).unwrap();
    second.take_events();
    second.restore_state().unwrap();

    let events = second.take_events();
    assert!(!events.iter().any(|e| matches!(e, TableEvent::StateSaved(_))));
    assert!(!events.iter().any(|e| matches!(e, TableEvent::PageChanged { .. })));
}

#[test]
fn test_sqlite_local_state_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");
    let config = immediate()
        .with_selection(SelectionMode::Multiple, Identity::key("id"))
        .with_resizable_columns(ResizeMode::Fit)
        .with_reorderable_columns()
        .with_state("orders", "local");

    {
        let storages = StorageSet::new().with_local(Arc::new(SqliteStorage::open(&path).unwrap()));
        let mut table = TableController::new(config.clone(), columns()).with_storages(storages);
        table.set_records(vec![record(1, "a"), record(2, "b")]).unwrap();
        table.toggle_all(true).unwrap();
        assert!(table.resize_column(0, 20).unwrap());
        assert!(table.reorder_column(1, 0, DropPosition::Before).unwrap());
    }

    let storages = StorageSet::new().with_local(Arc::new(SqliteStorage::open(&path).unwrap()));
    let mut table = TableController::new(config, columns()).with_storages(storages);
    let fresh = vec![record(1, "a"), record(2, "b")];
    table.set_records(fresh.clone()).unwrap();
    table.init().unwrap();

    assert!(table.is_all_selected());
    assert!(Arc::ptr_eq(&table.selection()[0], &fresh[0]));
    let layout: Vec<_> = table.columns().iter().map(|c| (c.key().to_string(), c.width)).collect();
    assert_eq!(layout, vec![("name".to_string(), 80), ("id".to_string(), 120)]);

    table.clear_state().unwrap();
    assert!(!table.restore_state().unwrap());
}

#[test]
fn test_local_state_without_backend_fails() {
    let config = immediate().with_state("orders", "local");
    let mut table = TableController::new(config, columns()).with_storages(isolated_session());
    assert!(table.init().is_err());
}

// =============================================================================
// Debounced filtering
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_settle_filter_applies_last_edit() {
    let config = TableConfig::default().with_filter_delay(Duration::from_millis(300));
    let mut table = TableController::new(config, columns());
    table
        .set_records(vec![record(1, "ant"), record(2, "bee"), record(3, "bat")])
        .unwrap();

    table.filter("name", "a", MatchMode::StartsWith).unwrap();
    table.filter("name", "b", MatchMode::StartsWith).unwrap();
    assert!(table.filtered().is_none());

    let start = tokio::time::Instant::now();
    assert!(table.settle_filter().await.unwrap());
    assert!(start.elapsed() >= Duration::from_millis(300));

    assert_eq!(ids(table.processed()), vec![2, 3]);
    assert!(!table.settle_filter().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_set_filters_cancels_pending_edit() {
    let config = TableConfig::default().with_filter_delay(Duration::from_millis(300));
    let mut table = TableController::new(config, columns());
    table.set_records(vec![record(1, "ant"), record(2, "bee")]).unwrap();

    let ticket = table.filter("name", "a", MatchMode::StartsWith).unwrap().unwrap();
    table
        .set_filters(gridstate_lib::filter::FilterSet::new())
        .unwrap();

    assert!(!ticket.fired().await);
    assert!(!table.apply_pending_filter(&ticket).unwrap());
    assert!(table.filtered().is_none());
}
