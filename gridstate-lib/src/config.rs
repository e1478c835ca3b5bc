//! Table configuration

use std::time::Duration;

use crate::columns::ResizeMode;
use crate::expansion::ExpandMode;
use crate::filter::FilterRegistry;
use crate::model::FieldPath;
use crate::selection::ContextMenuMode;
use crate::selection::Identity;
use crate::selection::RowPredicate;
use crate::selection::SelectionMode;
use crate::sort::SortFunction;
use crate::sort::SortMode;
use crate::sort::SortOrder;

/// Configuration of a [`TableController`](crate::TableController).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gridstate_lib::TableConfig;
/// use gridstate_lib::selection::{Identity, SelectionMode};
///
/// let config = TableConfig::default()
///     .with_selection(SelectionMode::Multiple, Identity::key("id"))
///     .with_paginator(25)
///     .with_filter_delay(Duration::ZERO)
///     .with_state("orders", "local");
/// ```
#[derive(Clone)]
pub struct TableConfig {
    /// Single or multi-field sorting.
    ///
    /// Default: single
    pub sort_mode: SortMode,

    /// Order a field starts with when first sorted.
    ///
    /// Default: ascending
    pub default_sort_order: SortOrder,

    /// Whether a sort change returns to the first page.
    ///
    /// Default: true
    pub reset_page_on_sort: bool,

    /// Replaces the builtin sort.
    pub custom_sort: Option<SortFunction>,

    /// Default: none
    pub selection_mode: SelectionMode,

    /// How rows are recognised across data refreshes.
    ///
    /// Default: by reference
    pub identity: Identity,

    /// Whether plain clicks replace the selection and ctrl/cmd-clicks
    /// toggle.
    ///
    /// Default: true
    pub meta_key_selection: bool,

    /// Whether the header checkbox only touches the current page.
    ///
    /// Default: false
    pub selection_page_only: bool,

    /// Rows this predicate rejects are never selected by interaction.
    pub row_selectable: Option<RowPredicate>,

    /// Default: joint
    pub context_menu_mode: ContextMenuMode,

    /// Quiet period before filter edits are evaluated. Zero evaluates
    /// immediately.
    ///
    /// Default: 300 ms
    pub filter_delay: Duration,

    /// Fields the global filter scans when it names none. Empty falls back
    /// to the columns.
    pub global_filter_fields: Vec<FieldPath>,

    /// Match predicates, builtin and custom.
    pub filter_registry: FilterRegistry,

    /// Whether rows come page by page from a collaborator.
    ///
    /// Default: false
    pub lazy: bool,

    /// Whether a lazy table requests its first page on init.
    ///
    /// Default: true
    pub lazy_load_on_init: bool,

    /// Whether visible rows are cut into pages.
    ///
    /// Default: false
    pub paginator: bool,

    /// Page size.
    ///
    /// Default: 10
    pub rows: usize,

    /// Default: false
    pub scrollable: bool,

    /// Whether a lazy table loads pages as the viewport scrolls.
    ///
    /// Default: false
    pub virtual_scroll: bool,

    /// Storage key of the persisted state. `None` disables persistence.
    pub state_key: Option<String>,

    /// Storage kind, `"session"` or `"local"`. Checked on first use.
    ///
    /// Default: `"session"`
    pub state_storage: String,

    /// Default: multiple
    pub expand_mode: ExpandMode,

    /// Default: false
    pub resizable_columns: bool,

    /// Default: fit
    pub column_resize_mode: ResizeMode,

    /// Default: false
    pub reorderable_columns: bool,

    /// Whether a scrollable table declares a column group.
    ///
    /// Default: false
    pub column_group: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sort_mode: SortMode::Single,
            default_sort_order: SortOrder::Ascending,
            reset_page_on_sort: true,
            custom_sort: None,
            selection_mode: SelectionMode::None,
            identity: Identity::Reference,
            meta_key_selection: true,
            selection_page_only: false,
            row_selectable: None,
            context_menu_mode: ContextMenuMode::Joint,
            filter_delay: Duration::from_millis(300),
            global_filter_fields: Vec::new(),
            filter_registry: FilterRegistry::new(),
            lazy: false,
            lazy_load_on_init: true,
            paginator: false,
            rows: 10,
            scrollable: false,
            virtual_scroll: false,
            state_key: None,
            state_storage: "session".to_string(),
            expand_mode: ExpandMode::Multiple,
            resizable_columns: false,
            column_resize_mode: ResizeMode::Fit,
            reorderable_columns: false,
            column_group: false,
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sort mode.
    pub fn with_sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    /// Sets the order a newly sorted field starts with.
    pub fn with_default_sort_order(mut self, order: SortOrder) -> Self {
        self.default_sort_order = order;
        self
    }

    /// Sets whether sorting returns to the first page.
    pub fn with_reset_page_on_sort(mut self, reset: bool) -> Self {
        self.reset_page_on_sort = reset;
        self
    }

    /// Replaces the builtin sort.
    pub fn with_custom_sort(mut self, sort: SortFunction) -> Self {
        self.custom_sort = Some(sort);
        self
    }

    /// Sets the selection mode and identity rule.
    pub fn with_selection(mut self, mode: SelectionMode, identity: Identity) -> Self {
        self.selection_mode = mode;
        self.identity = identity;
        self
    }

    /// Sets the identity rule without enabling selection.
    pub fn with_data_key(mut self, field: impl Into<FieldPath>) -> Self {
        self.identity = Identity::Key(field.into());
        self
    }

    pub fn with_meta_key_selection(mut self, enabled: bool) -> Self {
        self.meta_key_selection = enabled;
        self
    }

    pub fn with_selection_page_only(mut self, page_only: bool) -> Self {
        self.selection_page_only = page_only;
        self
    }

    /// Restricts which rows may be selected.
    pub fn with_row_selectable(mut self, predicate: RowPredicate) -> Self {
        self.row_selectable = Some(predicate);
        self
    }

    pub fn with_context_menu_mode(mut self, mode: ContextMenuMode) -> Self {
        self.context_menu_mode = mode;
        self
    }

    /// Sets the filter quiet period.
    pub fn with_filter_delay(mut self, delay: Duration) -> Self {
        self.filter_delay = delay;
        self
    }

    /// Sets the fields the global filter scans by default.
    pub fn with_global_filter_fields(
        mut self,
        fields: impl IntoIterator<Item = impl Into<FieldPath>>,
    ) -> Self {
        self.global_filter_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the match predicate registry.
    pub fn with_filter_registry(mut self, registry: FilterRegistry) -> Self {
        self.filter_registry = registry;
        self
    }

    /// Enables lazy loading.
    pub fn with_lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Sets whether a lazy table requests its first page on init.
    pub fn with_lazy_load_on_init(mut self, load_on_init: bool) -> Self {
        self.lazy_load_on_init = load_on_init;
        self
    }

    /// Enables the paginator with pages of `rows` rows.
    pub fn with_paginator(mut self, rows: usize) -> Self {
        self.paginator = true;
        self.rows = rows;
        self
    }

    /// Makes the table scrollable, optionally with virtual scrolling.
    pub fn with_scrollable(mut self, virtual_scroll: bool) -> Self {
        self.scrollable = true;
        self.virtual_scroll = virtual_scroll;
        self
    }

    /// Enables state persistence under `key` in the storage named by `kind`.
    pub fn with_state(mut self, key: impl Into<String>, kind: impl Into<String>) -> Self {
        self.state_key = Some(key.into());
        self.state_storage = kind.into();
        self
    }

    pub fn with_expand_mode(mut self, mode: ExpandMode) -> Self {
        self.expand_mode = mode;
        self
    }

    /// Enables column resizing.
    pub fn with_resizable_columns(mut self, mode: ResizeMode) -> Self {
        self.resizable_columns = true;
        self.column_resize_mode = mode;
        self
    }

    /// Enables column reordering.
    pub fn with_reorderable_columns(mut self) -> Self {
        self.reorderable_columns = true;
        self
    }

    /// Declares a column group for scrollable layouts.
    pub fn with_column_group(mut self) -> Self {
        self.column_group = true;
        self
    }
}

impl std::fmt::Debug for TableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableConfig")
            .field("sort_mode", &self.sort_mode)
            .field("custom_sort", &self.custom_sort.is_some())
            .field("selection_mode", &self.selection_mode)
            .field("identity", &self.identity)
            .field("filter_delay", &self.filter_delay)
            .field("lazy", &self.lazy)
            .field("paginator", &self.paginator)
            .field("rows", &self.rows)
            .field("virtual_scroll", &self.virtual_scroll)
            .field("state_key", &self.state_key)
            .field("state_storage", &self.state_storage)
            .finish_non_exhaustive()
    }
}
