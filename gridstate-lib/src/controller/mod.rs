//! Table controller: wires data changes and interactions to the engines.

mod export;
mod host;

pub use export::*;
pub use host::*;

use std::collections::HashSet;
use std::sync::Arc;

use crate::bus::TableBus;
use crate::columns::ColumnLayout;
use crate::columns::DropPosition;
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::error::TableError;
use crate::event::TableEvent;
use crate::expansion::RowExpansion;
use crate::filter::DebounceTicket;
use crate::filter::FilterDebounce;
use crate::filter::FilterSet;
use crate::filter::MatchMode;
use crate::filter::evaluate;
use crate::model::Column;
use crate::model::FieldPath;
use crate::model::Record;
use crate::model::RowRef;
use crate::model::Value;
use crate::page::LazyLoadRequest;
use crate::page::PageWindow;
use crate::page::VirtualScrollLoader;
use crate::selection::Modifiers;
use crate::selection::SelectionDelta;
use crate::selection::SelectionModel;
use crate::sort::SortMode;
use crate::sort::SortRequest;
use crate::sort::SortSpec;
use crate::sort::sort_records;
use crate::sort::toggle_multiple;
use crate::sort::toggle_single;
use crate::state::StatePersistence;
use crate::state::StateSnapshot;
use crate::state::StorageSet;

/// State engine of one interactive table.
///
/// Owns the record collection and the sort, filter, selection, page, column
/// and expansion state derived from it. Every operation runs to completion
/// synchronously; the only deferred work is debounced filtering, which hands
/// out a [`DebounceTicket`] for the caller to await.
///
/// Consumers observe the table through queued [`TableEvent`]s
/// ([`take_events`](Self::take_events)) and the topics on [`bus`](Self::bus).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use gridstate_lib::{TableConfig, TableController};
/// use gridstate_lib::filter::MatchMode;
/// use gridstate_lib::model::{Column, Record};
///
/// let config = TableConfig::default()
///     .with_paginator(10)
///     .with_filter_delay(Duration::ZERO);
/// let mut table = TableController::new(config, vec![Column::new("name", "Name")]);
///
/// table.set_records(vec![
///     Arc::new(Record::new().set("id", 1i64).set("name", "b")),
///     Arc::new(Record::new().set("id", 2i64).set("name", "a")),
/// ])?;
/// table.sort_by("name", false)?;
/// table.filter("name", "a", MatchMode::StartsWith)?;
///
/// assert_eq!(table.visible_records().len(), 1);
/// # Ok::<(), gridstate_lib::error::TableError>(())
/// ```
#[derive(Debug)]
pub struct TableController {
    config: TableConfig,
    storages: StorageSet,
    layout: ColumnLayout,
    records: Vec<RowRef>,
    filtered: Option<Vec<RowRef>>,
    sort: SortSpec,
    filters: FilterSet,
    selection: SelectionModel,
    expansion: RowExpansion,
    window: PageWindow,
    virtual_loader: Option<VirtualScrollLoader>,
    debounce: FilterDebounce,
    restoring: bool,
    restoring_sort: bool,
    restoring_filter: bool,
    events: Vec<TableEvent>,
    bus: TableBus,
}

impl TableController {
    /// Creates a controller with session storage for persisted state.
    pub fn new(config: TableConfig, columns: Vec<Column>) -> Self {
        let layout = ColumnLayout::new(columns)
            .with_resize_mode(config.column_resize_mode)
            .with_scrollable(config.scrollable, config.column_group);
        let selection = SelectionModel::new(config.selection_mode, config.identity.clone())
            .with_meta_key_selection(config.meta_key_selection)
            .with_context_menu_mode(config.context_menu_mode)
            .with_row_selectable(config.row_selectable.clone());
        let expansion =
            RowExpansion::new(config.expand_mode, config.identity.data_key().cloned());
        let virtual_loader =
            (config.lazy && config.virtual_scroll).then(|| VirtualScrollLoader::new(config.rows));

        let bus = TableBus::new();
        bus.publish_columns(layout.columns().to_vec());

        Self {
            window: PageWindow::new(config.rows),
            debounce: FilterDebounce::new(config.filter_delay),
            storages: StorageSet::default(),
            layout,
            records: Vec::new(),
            filtered: None,
            sort: SortSpec::None,
            filters: FilterSet::new(),
            selection,
            expansion,
            virtual_loader,
            restoring: false,
            restoring_sort: false,
            restoring_filter: false,
            events: Vec::new(),
            bus,
            config,
        }
    }

    /// Sets the storage backends used for persisted state.
    pub fn with_storages(mut self, storages: StorageSet) -> Self {
        self.storages = storages;
        self
    }

    /// Restores persisted state and, for lazy tables, requests the first
    /// page.
    ///
    /// A lazy table whose state was restored gets its request from the
    /// restore; otherwise one is emitted when `lazy_load_on_init` is set.
    pub fn init(&mut self) -> Result<(), TableError> {
        let restored = self.restore_state()?;
        if self.config.lazy && self.config.lazy_load_on_init && !restored {
            self.request_lazy_load();
        }
        self.publish_view();
        Ok(())
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replaces the record collection.
    ///
    /// Local tables re-apply the active sort and filters and pull the offset
    /// back into range. Lazy tables take `rows` as the current page.
    pub fn set_records(&mut self, rows: Vec<RowRef>) -> Result<(), TableError> {
        self.records = rows;
        if !self.config.lazy {
            self.apply_sort_to_records();
            self.refilter()?;
            if self.window.clamp() {
                self.push_page_changed();
            }
        }
        self.selection.rebind(&self.records);
        log::debug!("[table] {} records set", self.records.len());
        self.publish_view();
        Ok(())
    }

    /// Sets the row count reported by the lazy-load collaborator.
    pub fn set_total_records(&mut self, total: usize) {
        self.window.set_total(total);
        self.bus.publish_total(total);
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Header click on `field`.
    ///
    /// `modifier_held` extends the sort list in multiple mode.
    pub fn sort_by(
        &mut self,
        field: impl Into<FieldPath>,
        modifier_held: bool,
    ) -> Result<(), TableError> {
        let field = field.into();
        let default_order = self.config.default_sort_order;
        self.sort = match self.config.sort_mode {
            SortMode::Single => {
                let current = self.sort.descriptors().first();
                SortSpec::Single(toggle_single(current, &field, default_order))
            }
            SortMode::Multiple => SortSpec::Multiple(toggle_multiple(
                self.sort.descriptors(),
                &field,
                default_order,
                modifier_held,
            )),
        };
        self.apply_sort()
    }

    /// Replaces the sort.
    pub fn set_sort(&mut self, sort: SortSpec) -> Result<(), TableError> {
        self.sort = sort;
        self.apply_sort()
    }

    fn apply_sort(&mut self) -> Result<(), TableError> {
        log::debug!("[sort] applying {:?}", self.sort);
        if self.config.reset_page_on_sort && !self.restoring_sort && self.window.reset() {
            self.push_page_changed();
        }

        if self.config.lazy {
            self.request_lazy_load();
        } else {
            self.apply_sort_to_records();
            if self.filters.has_filter() {
                self.refilter()?;
            }
        }

        self.events.push(TableEvent::SortChanged(self.sort.clone()));
        self.bus.publish_sort(&self.sort);
        self.persist()?;
        self.publish_view();
        Ok(())
    }

    fn apply_sort_to_records(&mut self) {
        if !self.sort.is_active() {
            return;
        }
        match &self.config.custom_sort {
            Some(sort) => {
                let request = SortRequest {
                    records: &self.records,
                    spec: &self.sort,
                };
                if let Some(sorted) = sort(&request) {
                    self.records = sorted;
                }
            }
            None => self.records = sort_records(&self.records, &self.sort),
        }
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Sets or clears (blank `value`) the filter on `field`.
    ///
    /// With a zero filter delay the filters are evaluated before returning
    /// and no ticket is handed out. Otherwise evaluation is scheduled and the
    /// returned ticket resolves once the quiet period passed; hand it to
    /// [`apply_pending_filter`](Self::apply_pending_filter).
    pub fn filter(
        &mut self,
        field: impl Into<FieldPath>,
        value: impl Into<Value>,
        match_mode: impl Into<MatchMode>,
    ) -> Result<Option<DebounceTicket>, TableError> {
        let mut filters = self.filters.clone();
        filters.set_field_filter(field, value, match_mode);
        self.stage_filters(filters)?;
        self.schedule_filter()
    }

    /// Sets or clears (blank `value`) the global filter.
    pub fn filter_global(
        &mut self,
        value: impl Into<Value>,
        match_mode: impl Into<MatchMode>,
    ) -> Result<Option<DebounceTicket>, TableError> {
        let mut filters = self.filters.clone();
        filters.set_global_filter(value, match_mode);
        self.stage_filters(filters)?;
        self.schedule_filter()
    }

    /// Replaces every filter and evaluates right away.
    pub fn set_filters(&mut self, filters: FilterSet) -> Result<(), TableError> {
        self.stage_filters(filters)?;
        self.debounce.cancel();
        self.apply_filter()
    }

    /// Evaluates the filters if `ticket` is still the newest one.
    ///
    /// Returns `false` for superseded tickets.
    pub fn apply_pending_filter(&mut self, ticket: &DebounceTicket) -> Result<bool, TableError> {
        if !self.debounce.take(ticket) {
            return Ok(false);
        }
        self.apply_filter()?;
        Ok(true)
    }

    /// Evaluates a scheduled filter now. Returns `false` if none was
    /// pending.
    pub fn flush_filter(&mut self) -> Result<bool, TableError> {
        if !self.debounce.take_pending() {
            return Ok(false);
        }
        self.apply_filter()?;
        Ok(true)
    }

    /// Waits for the pending filter's quiet period, then evaluates it.
    pub async fn settle_filter(&mut self) -> Result<bool, TableError> {
        let Some(ticket) = self.debounce.pending().cloned() else {
            return Ok(false);
        };
        if !ticket.fired().await {
            return Ok(false);
        }
        self.apply_pending_filter(&ticket)
    }

    fn schedule_filter(&mut self) -> Result<Option<DebounceTicket>, TableError> {
        if self.debounce.is_immediate() {
            self.apply_filter()?;
            return Ok(None);
        }
        Ok(Some(self.debounce.schedule()))
    }

    fn apply_filter(&mut self) -> Result<(), TableError> {
        if !self.restoring_filter && self.window.reset() {
            self.push_page_changed();
        }

        if self.config.lazy {
            self.request_lazy_load();
        } else {
            self.refilter()?;
        }

        self.events.push(TableEvent::FilterChanged {
            filters: self.filters.clone(),
            visible: self.processed().to_vec(),
        });
        self.persist()?;
        self.publish_view();
        Ok(())
    }

    /// Fields the global filter scans when it names none.
    fn global_fields(&self) -> Vec<FieldPath> {
        if self.config.global_filter_fields.is_empty() {
            self.layout.columns().iter().map(|c| c.field.clone()).collect()
        } else {
            self.config.global_filter_fields.clone()
        }
    }

    /// Replaces the filters once they are known to be evaluable. On error the
    /// current filters stay in place.
    fn stage_filters(&mut self, filters: FilterSet) -> Result<(), ConfigError> {
        let unscoped = filters.global().is_some_and(|global| global.fields.is_empty());
        if unscoped && self.global_fields().is_empty() {
            return Err(ConfigError::FilterMisconfigured);
        }
        self.filters = filters;
        Ok(())
    }

    fn refilter(&mut self) -> Result<(), TableError> {
        self.filtered = if self.filters.has_filter() {
            let defaults = self.global_fields();
            evaluate(&self.records, &self.filters, &defaults, &self.config.filter_registry)?
        } else {
            None
        };
        if !self.config.lazy {
            self.window.set_total(self.processed().len());
        }
        Ok(())
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Moves the page window.
    pub fn change_page(&mut self, offset: usize, length: usize) -> Result<(), TableError> {
        self.window.set_length(length);
        self.window.set_offset(offset);
        self.page_moved()
    }

    /// Moves to page `page`. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) -> Result<bool, TableError> {
        if !self.window.go_to_page(page) {
            return Ok(false);
        }
        self.page_moved()?;
        Ok(true)
    }

    fn page_moved(&mut self) -> Result<(), TableError> {
        log::debug!(
            "[page] offset {} length {}",
            self.window.offset(),
            self.window.length()
        );
        if self.config.lazy {
            self.request_lazy_load();
        }
        self.push_page_changed();
        self.selection.clear_range();
        if self.config.scrollable {
            self.events.push(TableEvent::ScrollToTop);
        }
        self.persist()?;
        self.publish_view();
        Ok(())
    }

    /// Virtual-scroll viewport reached row `index`.
    ///
    /// Requests the pages around it that were not loaded yet. Returns `true`
    /// if a request was emitted.
    pub fn on_virtual_scroll(&mut self, index: usize) -> bool {
        let total = self.window.total();
        let Some(loader) = self.virtual_loader.as_mut() else {
            return false;
        };
        let Some(range) = loader.scroll_to(index, (total > 0).then_some(total)) else {
            return false;
        };
        self.emit_lazy_load(range.start, range.len());
        true
    }

    fn request_lazy_load(&mut self) {
        if self.restoring {
            return;
        }
        let total = self.window.total();
        let (offset, length) = match self.virtual_loader.as_mut() {
            Some(loader) => {
                loader.reset();
                match loader.scroll_to(self.window.offset(), (total > 0).then_some(total)) {
                    Some(range) => (range.start, range.len()),
                    None => return,
                }
            }
            None => (self.window.offset(), self.window.length()),
        };
        self.emit_lazy_load(offset, length);
    }

    fn emit_lazy_load(&mut self, offset: usize, length: usize) {
        let request = LazyLoadRequest {
            offset,
            length,
            sort: self.sort.clone(),
            filters: self.filters.clone(),
        };
        log::debug!("[lazy] requesting rows {:?}", request.range());
        self.events.push(TableEvent::LazyLoad(request));
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Row click at `index` of the processed rows (the current page when
    /// lazy).
    pub fn click_row(&mut self, index: usize, modifiers: Modifiers) -> Result<(), TableError> {
        let data: &[RowRef] = self.filtered.as_deref().unwrap_or(&self.records);
        let Some(row) = data.get(index).cloned() else {
            return Ok(());
        };
        let delta = self.selection.click(&row, index, modifiers, data);
        self.apply_selection_delta(delta)
    }

    /// Row checkbox toggle.
    pub fn toggle_row_checkbox(
        &mut self,
        row: &RowRef,
        index: Option<usize>,
    ) -> Result<(), TableError> {
        let delta = self.selection.toggle_checkbox(row, index);
        self.apply_selection_delta(delta)
    }

    /// Row radio button toggle.
    pub fn toggle_row_radio(
        &mut self,
        row: &RowRef,
        index: Option<usize>,
    ) -> Result<(), TableError> {
        let delta = self.selection.toggle_radio(row, index);
        self.apply_selection_delta(delta)
    }

    /// Header checkbox toggle.
    ///
    /// Covers the filtered rows when a filter is active, else every row. With
    /// `selection_page_only` only the current page is touched.
    pub fn toggle_all(&mut self, checked: bool) -> Result<(), TableError> {
        let rows = self.header_scope().to_vec();
        let changed = self
            .selection
            .toggle_all(checked, &rows, self.config.selection_page_only);
        self.events.push(TableEvent::HeaderCheckboxToggled { checked });
        if changed {
            self.selection_changed()?;
        }
        Ok(())
    }

    /// Replaces the selection.
    pub fn set_selection(&mut self, rows: Vec<RowRef>) -> Result<(), TableError> {
        self.selection.set_selection(rows);
        self.selection_changed()
    }

    /// Selects the rows whose data key is in `keys`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingIdentityKey`](crate::error::ConfigError::MissingIdentityKey)
    /// when the table has no data key.
    pub fn select_keys<I, K>(&mut self, keys: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.selection.select_keys(keys, &self.records)?;
        self.selection_changed()
    }

    /// Right-click on the row at `index` of the processed rows.
    pub fn context_menu(&mut self, index: usize) -> Result<(), TableError> {
        let data: &[RowRef] = self.filtered.as_deref().unwrap_or(&self.records);
        let Some(row) = data.get(index).cloned() else {
            return Ok(());
        };
        let delta = self.selection.context_menu(&row, Some(index));
        self.apply_selection_delta(delta)?;
        self.bus.publish_context_menu(&row);
        self.events.push(TableEvent::ContextMenuSelect {
            record: row,
            index: Some(index),
        });
        Ok(())
    }

    fn apply_selection_delta(&mut self, delta: SelectionDelta) -> Result<(), TableError> {
        if delta.is_empty() {
            return Ok(());
        }
        for event in delta.unselected {
            self.events.push(TableEvent::RowUnselect(event));
        }
        for event in delta.selected {
            self.events.push(TableEvent::RowSelect(event));
        }
        self.selection_changed()
    }

    fn selection_changed(&mut self) -> Result<(), TableError> {
        log::trace!("[selection] {} selected", self.selection.len());
        self.events
            .push(TableEvent::SelectionChanged(self.selection.selection().to_vec()));
        self.bus.publish_selection(self.selection.len());
        self.persist()
    }

    fn header_scope(&self) -> &[RowRef] {
        if self.config.selection_page_only {
            self.visible_records()
        } else {
            self.processed()
        }
    }

    // =========================================================================
    // Rows and columns
    // =========================================================================

    /// Expands or collapses `row`. Returns `true` if it is now expanded.
    pub fn toggle_row_expansion(&mut self, row: &RowRef) -> Result<bool, TableError> {
        let expanded = self.expansion.toggle(row)?;
        self.events.push(if expanded {
            TableEvent::RowExpanded(row.clone())
        } else {
            TableEvent::RowCollapsed(row.clone())
        });
        self.persist()?;
        Ok(expanded)
    }

    /// Resizes column `index` by `delta`. Returns `true` if a width changed.
    pub fn resize_column(&mut self, index: usize, delta: i32) -> Result<bool, TableError> {
        if !self.config.resizable_columns || !self.layout.resize(index, delta)? {
            return Ok(false);
        }
        self.events.push(TableEvent::ColumnResized { index, delta });
        self.bus.publish_columns(self.layout.columns().to_vec());
        self.persist()?;
        Ok(true)
    }

    /// Moves column `drag` before or after column `drop`.
    pub fn reorder_column(
        &mut self,
        drag: usize,
        drop: usize,
        position: DropPosition,
    ) -> Result<bool, TableError> {
        if !self.config.reorderable_columns || !self.layout.reorder(drag, drop, position) {
            return Ok(false);
        }
        self.events.push(TableEvent::ColumnReordered { from: drag, to: drop });
        self.bus.publish_columns(self.layout.columns().to_vec());
        self.persist()?;
        Ok(true)
    }

    /// Resets sort, filters and offset. A lazy table requests exactly one
    /// page afterwards.
    pub fn clear(&mut self) -> Result<(), TableError> {
        self.debounce.cancel();
        self.sort = SortSpec::None;
        self.filters.clear();
        self.filtered = None;
        if !self.config.lazy {
            self.window.set_total(self.records.len());
        }
        if self.window.reset() {
            self.push_page_changed();
        }

        self.events.push(TableEvent::SortChanged(SortSpec::None));
        self.bus.publish_sort(&self.sort);
        if self.config.lazy {
            self.request_lazy_load();
        }
        log::debug!("[table] cleared sort, filters and offset");
        self.persist()?;
        self.publish_view();
        Ok(())
    }

    // =========================================================================
    // State
    // =========================================================================

    fn persistence(&self) -> Result<Option<StatePersistence>, TableError> {
        match &self.config.state_key {
            Some(key) => {
                let kind = &self.config.state_storage;
                StatePersistence::from_kind(key.as_str(), kind, &self.storages).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Captures the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        let mut snapshot = StateSnapshot::default();
        if self.config.paginator {
            snapshot.first = Some(self.window.offset());
            snapshot.rows = Some(self.window.length());
        }
        snapshot.set_sort(&self.sort);
        if self.filters.has_filter() {
            snapshot.filters = Some(self.filters.clone());
        }
        if !self.selection.is_empty() {
            snapshot.selection = Some(
                self.selection
                    .selection()
                    .iter()
                    .map(|row| Record::clone(row))
                    .collect(),
            );
        }
        if !self.expansion.is_empty() {
            snapshot.expanded_row_keys = Some(self.expansion.keys());
        }
        if self.config.resizable_columns {
            snapshot.column_widths = Some(self.layout.widths());
            snapshot.table_width = self.layout.table_width();
        }
        if self.config.reorderable_columns {
            snapshot.column_order = Some(self.layout.order());
        }
        snapshot
    }

    /// Writes the current state. Returns `None` when persistence is off.
    pub fn save_state(&mut self) -> Result<Option<StateSnapshot>, TableError> {
        let Some(persistence) = self.persistence()? else {
            return Ok(None);
        };
        let snapshot = self.snapshot();
        persistence.save(&snapshot)?;
        self.events.push(TableEvent::StateSaved(snapshot.clone()));
        Ok(Some(snapshot))
    }

    fn persist(&mut self) -> Result<(), TableError> {
        if self.restoring || self.config.state_key.is_none() {
            return Ok(());
        }
        self.save_state().map(|_| ())
    }

    /// Reads the persisted state and applies it.
    ///
    /// The replay neither resets the offset nor saves. A lazy table emits
    /// exactly one request once everything is applied. Returns `false` when
    /// nothing was saved.
    pub fn restore_state(&mut self) -> Result<bool, TableError> {
        let Some(persistence) = self.persistence()? else {
            return Ok(false);
        };
        let Some(snapshot) = persistence.load()? else {
            return Ok(false);
        };

        self.restoring = true;
        let applied = self.apply_snapshot(&snapshot);
        self.restoring = false;
        self.restoring_sort = false;
        self.restoring_filter = false;
        applied?;

        if self.config.lazy {
            self.request_lazy_load();
        }
        log::debug!("[state] restored '{}'", persistence.key());
        self.events.push(TableEvent::StateRestored(snapshot));
        self.publish_view();
        Ok(true)
    }

    fn apply_snapshot(&mut self, snapshot: &StateSnapshot) -> Result<(), TableError> {
        if self.config.paginator {
            if let Some(rows) = snapshot.rows {
                self.window.set_length(rows);
            }
            if let Some(first) = snapshot.first {
                self.window.set_offset(first);
            }
        }

        if let Some(sort) = snapshot.sort() {
            self.restoring_sort = true;
            self.sort = sort;
            self.apply_sort()?;
        }

        if let Some(filters) = &snapshot.filters {
            self.restoring_filter = true;
            self.stage_filters(filters.clone())?;
            self.apply_filter()?;
        }

        if let Some(selection) = &snapshot.selection {
            let rows = selection.iter().cloned().map(Arc::new).collect();
            self.selection.set_selection(rows);
            self.selection.rebind(&self.records);
            self.selection_changed()?;
        }

        if let Some(keys) = &snapshot.expanded_row_keys {
            self.expansion.restore(keys.iter().cloned());
        }
        // Widths are stored in display order.
        if let Some(order) = &snapshot.column_order {
            self.layout.restore_order(order);
        }
        if let Some(widths) = &snapshot.column_widths {
            self.layout.restore_widths(widths, snapshot.table_width);
        }
        self.bus.publish_columns(self.layout.columns().to_vec());
        Ok(())
    }

    /// Removes the persisted state.
    pub fn clear_state(&mut self) -> Result<(), TableError> {
        match self.persistence()? {
            Some(persistence) => persistence.clear(),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Drains the queued events.
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_page_changed(&mut self) {
        self.events.push(TableEvent::PageChanged {
            offset: self.window.offset(),
            length: self.window.length(),
        });
    }

    fn publish_view(&self) {
        self.bus.publish_value(self.visible_records().to_vec());
        self.bus.publish_total(self.window.total());
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Source rows: the sorted collection, or the current page when lazy.
    pub fn records(&self) -> &[RowRef] {
        &self.records
    }

    /// Rows passing the filters. `None` when nothing is filtered out.
    pub fn filtered(&self) -> Option<&[RowRef]> {
        self.filtered.as_deref()
    }

    /// Filtered rows, or every row when nothing is filtered out.
    pub fn processed(&self) -> &[RowRef] {
        self.filtered.as_deref().unwrap_or(&self.records)
    }

    /// Rows on screen: the current page of the processed rows when a local
    /// table paginates, else every processed row.
    pub fn visible_records(&self) -> &[RowRef] {
        let processed = self.processed();
        if self.config.paginator && !self.config.lazy {
            &processed[self.window.range(processed.len())]
        } else {
            processed
        }
    }

    pub fn total_records(&self) -> usize {
        self.window.total()
    }

    pub fn page_window(&self) -> PageWindow {
        self.window
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Returns `true` if any filter is set.
    pub fn has_filter(&self) -> bool {
        self.filters.has_filter()
    }

    pub fn selection(&self) -> &[RowRef] {
        self.selection.selection()
    }

    /// Keys of the selected rows when rows are identified by key.
    pub fn selection_keys(&self) -> &HashSet<String> {
        self.selection.keys()
    }

    pub fn is_selected(&self, row: &RowRef) -> bool {
        self.selection.is_selected(row)
    }

    /// Header checkbox state.
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(self.header_scope())
    }

    pub fn is_row_expanded(&self, row: &Record) -> bool {
        self.expansion.is_expanded(row)
    }

    pub fn columns(&self) -> &[Column] {
        self.layout.columns()
    }

    /// Topics for row-level readers.
    pub fn bus(&self) -> &TableBus {
        &self.bus
    }
}
