//! Outbound table events

use crate::filter::FilterSet;
use crate::model::RowRef;
use crate::page::LazyLoadRequest;
use crate::selection::RowSelectEvent;
use crate::sort::SortSpec;
use crate::state::StateSnapshot;

/// Something a table consumer may react to.
///
/// The controller queues events as operations run; drain them with
/// [`TableController::take_events`](crate::TableController::take_events).
#[derive(Debug, Clone)]
pub enum TableEvent {
    /// The sort changed.
    SortChanged(SortSpec),
    /// Filters were evaluated.
    FilterChanged {
        filters: FilterSet,
        /// Rows passing the filters, or all rows when none filter.
        visible: Vec<RowRef>,
    },
    /// The page window moved or resized.
    PageChanged { offset: usize, length: usize },
    /// A row entered the selection.
    RowSelect(RowSelectEvent),
    /// A row left the selection.
    RowUnselect(RowSelectEvent),
    /// The selection changed; carries the new selection.
    SelectionChanged(Vec<RowRef>),
    /// The header checkbox was toggled.
    HeaderCheckboxToggled { checked: bool },
    /// The collaborator should load a page.
    LazyLoad(LazyLoadRequest),
    /// State was written to storage.
    StateSaved(StateSnapshot),
    /// State was read back and applied.
    StateRestored(StateSnapshot),
    RowExpanded(RowRef),
    RowCollapsed(RowRef),
    /// A column was resized by `delta`.
    ColumnResized { index: usize, delta: i32 },
    /// A column was moved.
    ColumnReordered { from: usize, to: usize },
    /// The viewport should scroll back to the top.
    ScrollToTop,
    /// A row was right-clicked.
    ContextMenuSelect { record: RowRef, index: Option<usize> },
}

impl TableEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::SortChanged(_) => "sort",
            TableEvent::FilterChanged { .. } => "filter",
            TableEvent::PageChanged { .. } => "page",
            TableEvent::RowSelect(_) => "rowSelect",
            TableEvent::RowUnselect(_) => "rowUnselect",
            TableEvent::SelectionChanged(_) => "selectionChange",
            TableEvent::HeaderCheckboxToggled { .. } => "headerCheckboxToggle",
            TableEvent::LazyLoad(_) => "lazyLoad",
            TableEvent::StateSaved(_) => "stateSave",
            TableEvent::StateRestored(_) => "stateRestore",
            TableEvent::RowExpanded(_) => "rowExpand",
            TableEvent::RowCollapsed(_) => "rowCollapse",
            TableEvent::ColumnResized { .. } => "colResize",
            TableEvent::ColumnReordered { .. } => "colReorder",
            TableEvent::ScrollToTop => "scrollToTop",
            TableEvent::ContextMenuSelect { .. } => "contextMenuSelect",
        }
    }
}
