//! Typed topics for row-level readers.
//!
//! The controller is the single writer. Readers subscribe to the topics they
//! render from: one-shot notifications go over `broadcast` channels, current
//! values over `watch` channels so a late subscriber still sees the latest
//! state.

use tokio::sync::broadcast;
use tokio::sync::watch;

use crate::model::Column;
use crate::model::RowRef;
use crate::sort::SortSpec;

const CAPACITY: usize = 16;

/// Publish side of a table's topics.
#[derive(Debug)]
pub struct TableBus {
    sort: broadcast::Sender<SortSpec>,
    selection: broadcast::Sender<usize>,
    context_menu: broadcast::Sender<RowRef>,
    value: watch::Sender<Vec<RowRef>>,
    total: watch::Sender<usize>,
    columns: watch::Sender<Vec<Column>>,
}

impl TableBus {
    pub fn new() -> Self {
        Self {
            sort: broadcast::channel(CAPACITY).0,
            selection: broadcast::channel(CAPACITY).0,
            context_menu: broadcast::channel(CAPACITY).0,
            value: watch::channel(Vec::new()).0,
            total: watch::channel(0).0,
            columns: watch::channel(Vec::new()).0,
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Sort changes.
    pub fn subscribe_sort(&self) -> broadcast::Receiver<SortSpec> {
        self.sort.subscribe()
    }

    /// Selection size after every selection change.
    pub fn subscribe_selection(&self) -> broadcast::Receiver<usize> {
        self.selection.subscribe()
    }

    /// Right-clicked rows.
    pub fn subscribe_context_menu(&self) -> broadcast::Receiver<RowRef> {
        self.context_menu.subscribe()
    }

    /// Visible rows.
    pub fn watch_value(&self) -> watch::Receiver<Vec<RowRef>> {
        self.value.subscribe()
    }

    /// Total row count.
    pub fn watch_total(&self) -> watch::Receiver<usize> {
        self.total.subscribe()
    }

    /// Columns in display order.
    pub fn watch_columns(&self) -> watch::Receiver<Vec<Column>> {
        self.columns.subscribe()
    }

    // =========================================================================
    // Publishing
    //
    // Errors are ignored: no subscriber is not a failure.
    // =========================================================================

    pub(crate) fn publish_sort(&self, sort: &SortSpec) {
        let _ = self.sort.send(sort.clone());
    }

    pub(crate) fn publish_selection(&self, count: usize) {
        let _ = self.selection.send(count);
    }

    pub(crate) fn publish_context_menu(&self, row: &RowRef) {
        let _ = self.context_menu.send(row.clone());
    }

    pub(crate) fn publish_value(&self, rows: Vec<RowRef>) {
        self.value.send_replace(rows);
    }

    pub(crate) fn publish_total(&self, total: usize) {
        self.total.send_if_modified(|current| {
            let changed = *current != total;
            *current = total;
            changed
        });
    }

    pub(crate) fn publish_columns(&self, columns: Vec<Column>) {
        self.columns.send_replace(columns);
    }
}

impl Default for TableBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::Record;
    use crate::sort::SortDescriptor;

    #[test]
    fn test_watch_keeps_latest_value() {
        let bus = TableBus::new();
        bus.publish_total(3);
        bus.publish_total(5);
        let total = bus.watch_total();
        assert_eq!(*total.borrow(), 5);

        bus.publish_value(vec![Arc::new(Record::new())]);
        assert_eq!(bus.watch_value().borrow().len(), 1);
    }

    #[test]
    fn test_broadcast_reaches_every_subscriber() {
        let bus = TableBus::new();
        let mut first = bus.subscribe_sort();
        let mut second = bus.subscribe_sort();
        let spec = SortSpec::Single(SortDescriptor::asc("name"));
        bus.publish_sort(&spec);
        assert_eq!(first.try_recv().unwrap(), spec);
        assert_eq!(second.try_recv().unwrap(), spec);

        // Publishing without subscribers is fine.
        TableBus::new().publish_selection(1);
    }
}
