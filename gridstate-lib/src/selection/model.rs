//! Selection state machine

use std::collections::HashSet;

use super::ContextMenuMode;
use super::Identity;
use super::Modifiers;
use super::RowPredicate;
use super::SelectTrigger;
use super::SelectionDelta;
use super::SelectionMode;
use crate::error::ConfigError;
use crate::model::RowRef;

/// Tracks the selected rows of a table.
///
/// Membership follows the configured [`Identity`]. With by-key identity a
/// set of stringified keys mirrors the selection one-to-one, so lookups do
/// not scan the selection.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gridstate_lib::model::{Record, RowRef};
/// use gridstate_lib::selection::{Identity, Modifiers, SelectionMode, SelectionModel};
///
/// let rows: Vec<RowRef> = (1..=3i64)
///     .map(|id| Arc::new(Record::new().set("id", id)))
///     .collect();
///
/// let mut selection = SelectionModel::new(SelectionMode::Multiple, Identity::key("id"));
/// selection.click(&rows[0], 0, Modifiers::NONE, &rows);
/// selection.click(&rows[2], 2, Modifiers::shift(), &rows);
/// assert_eq!(selection.len(), 3);
/// ```
#[derive(Clone)]
pub struct SelectionModel {
    mode: SelectionMode,
    identity: Identity,
    meta_key_selection: bool,
    context_menu_mode: ContextMenuMode,
    row_selectable: Option<RowPredicate>,
    selection: Vec<RowRef>,
    keys: HashSet<String>,
    anchor: Option<usize>,
    context_row: Option<RowRef>,
}

impl SelectionModel {
    /// Creates an empty selection.
    pub fn new(mode: SelectionMode, identity: Identity) -> Self {
        Self {
            mode,
            identity,
            meta_key_selection: true,
            context_menu_mode: ContextMenuMode::default(),
            row_selectable: None,
            selection: Vec::new(),
            keys: HashSet::new(),
            anchor: None,
            context_row: None,
        }
    }

    /// Sets whether plain clicks replace the selection (`true`) or toggle
    /// membership (`false`).
    pub fn with_meta_key_selection(mut self, enabled: bool) -> Self {
        self.meta_key_selection = enabled;
        self
    }

    /// Sets the context menu mode.
    pub fn with_context_menu_mode(mut self, mode: ContextMenuMode) -> Self {
        self.context_menu_mode = mode;
        self
    }

    /// Restricts which rows may be selected.
    pub fn with_row_selectable(mut self, predicate: Option<RowPredicate>) -> Self {
        self.row_selectable = predicate;
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Selected rows in selection order.
    pub fn selection(&self) -> &[RowRef] {
        &self.selection
    }

    /// Stringified keys of the selected rows. Empty unless rows are
    /// identified by key.
    pub fn keys(&self) -> &HashSet<String> {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Index of the last non-shift click.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Row of the last right-click.
    pub fn context_row(&self) -> Option<&RowRef> {
        self.context_row.as_ref()
    }

    /// Returns `true` if `row` is selected under the identity rule.
    pub fn is_selected(&self, row: &RowRef) -> bool {
        match self.identity.key_of(row) {
            Some(key) => self.keys.contains(&key),
            None => self.identity.position(&self.selection, row).is_some(),
        }
    }

    /// Returns `true` if `row` passes the selectable predicate.
    pub fn is_selectable(&self, row: &RowRef) -> bool {
        self.row_selectable.as_ref().is_none_or(|selectable| selectable(row))
    }

    /// Returns `true` if every selectable row of `rows` is selected.
    ///
    /// `false` when `rows` has no selectable row.
    pub fn is_all_selected(&self, rows: &[RowRef]) -> bool {
        let mut selectable = rows.iter().filter(|row| self.is_selectable(row)).peekable();
        selectable.peek().is_some() && selectable.all(|row| self.is_selected(row))
    }

    // =========================================================================
    // Interactions
    // =========================================================================

    /// Handles a row click at `index` of `data`.
    ///
    /// `data` is the collection the index refers to: the processed rows, or
    /// the current page in lazy mode.
    pub fn click(
        &mut self,
        row: &RowRef,
        index: usize,
        modifiers: Modifiers,
        data: &[RowRef],
    ) -> SelectionDelta {
        if self.mode == SelectionMode::None {
            return SelectionDelta::default();
        }

        if modifiers.shift && self.mode == SelectionMode::Multiple {
            if let Some(anchor) = self.anchor {
                return self.select_range(anchor, index, data);
            }
        }

        self.anchor = Some(index);

        let selected = self.is_selected(row);
        let mut delta = SelectionDelta::default();

        if self.meta_key_selection {
            // A selected row in single mode is cleared by any click.
            if selected && (modifiers.meta || self.mode == SelectionMode::Single) {
                self.remove(row);
                delta.unselect(SelectTrigger::Row, row, Some(index));
            } else if self.is_selectable(row) {
                if self.mode == SelectionMode::Multiple && modifiers.meta {
                    self.push(row);
                } else {
                    self.replace_with(row);
                }
                delta.select(SelectTrigger::Row, row, Some(index));
            }
        } else if selected {
            self.remove(row);
            delta.unselect(SelectTrigger::Row, row, Some(index));
        } else if self.is_selectable(row) {
            match self.mode {
                SelectionMode::Single => self.replace_with(row),
                _ => self.push(row),
            }
            delta.select(SelectTrigger::Row, row, Some(index));
        }

        log::trace!(
            "[selection] click #{} (meta={}): {} selected",
            index,
            modifiers.meta,
            self.selection.len()
        );
        delta
    }

    /// Adds every row between the anchor and `index`, inclusive, to the
    /// selection. Rows already selected stay selected.
    fn select_range(&mut self, anchor: usize, index: usize, data: &[RowRef]) -> SelectionDelta {
        let mut delta = SelectionDelta::default();
        let (start, end) = (anchor.min(index), anchor.max(index));

        for i in start..=end {
            let Some(row) = data.get(i) else {
                break;
            };
            if !self.is_selected(row) && self.is_selectable(row) {
                self.push(row);
                delta.select(SelectTrigger::Row, row, Some(i));
            }
        }

        log::trace!("[selection] range {}..={}: +{}", start, end, delta.selected.len());
        delta
    }

    /// Toggles a row checkbox.
    pub fn toggle_checkbox(&mut self, row: &RowRef, index: Option<usize>) -> SelectionDelta {
        let mut delta = SelectionDelta::default();
        if self.mode == SelectionMode::None {
            return delta;
        }

        if self.is_selected(row) {
            self.remove(row);
            delta.unselect(SelectTrigger::Checkbox, row, index);
        } else if self.is_selectable(row) {
            match self.mode {
                SelectionMode::Single => self.replace_with(row),
                _ => self.push(row),
            }
            delta.select(SelectTrigger::Checkbox, row, index);
        }
        delta
    }

    /// Toggles a row radio button.
    pub fn toggle_radio(&mut self, row: &RowRef, index: Option<usize>) -> SelectionDelta {
        let mut delta = SelectionDelta::default();
        if self.mode == SelectionMode::None {
            return delta;
        }

        if self.is_selected(row) {
            self.remove(row);
            delta.unselect(SelectTrigger::RadioButton, row, index);
        } else if self.is_selectable(row) {
            self.replace_with(row);
            delta.select(SelectTrigger::RadioButton, row, index);
        }
        delta
    }

    /// Header checkbox.
    ///
    /// Checking selects every selectable row of `rows`. With `keep_others`
    /// rows outside `rows` stay selected (page-only selection), otherwise the
    /// selection becomes exactly the selectable part of `rows`. Unchecking
    /// removes `rows` (`keep_others`) or clears everything.
    ///
    /// Returns `true` if the selection changed.
    pub fn toggle_all(&mut self, checked: bool, rows: &[RowRef], keep_others: bool) -> bool {
        if self.mode == SelectionMode::None {
            return false;
        }
        let before = self.selection.len();

        match (checked, keep_others) {
            (true, true) => {
                for row in rows {
                    if !self.is_selected(row) && self.is_selectable(row) {
                        self.push(row);
                    }
                }
            }
            (true, false) => {
                let selectable: Vec<RowRef> =
                    rows.iter().filter(|row| self.is_selectable(row)).cloned().collect();
                let changed = selectable.len() != before
                    || selectable.iter().any(|row| !self.is_selected(row));
                self.assign(selectable);
                return changed;
            }
            (false, true) => {
                for row in rows {
                    self.remove(row);
                }
            }
            (false, false) => {
                self.assign(Vec::new());
            }
        }

        self.selection.len() != before
    }

    /// Replaces the selection wholesale.
    ///
    /// Duplicate identities collapse to their first occurrence and single
    /// mode keeps only the first row. Ignored in mode none.
    pub fn set_selection(&mut self, rows: Vec<RowRef>) {
        if self.mode == SelectionMode::None {
            return;
        }
        self.assign(rows);
        self.clear_range();
    }

    /// Selects the rows of `rows` whose key is in `keys`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingIdentityKey`] unless rows are identified by key.
    pub fn select_keys<I, K>(&mut self, keys: I, rows: &[RowRef]) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        if self.identity.data_key().is_none() {
            return Err(ConfigError::missing_key("select_keys"));
        }
        let wanted: HashSet<String> = keys.into_iter().map(Into::into).collect();
        let matched: Vec<RowRef> = rows
            .iter()
            .filter(|row| self.identity.key_of(row).is_some_and(|key| wanted.contains(&key)))
            .cloned()
            .collect();
        self.set_selection(matched);
        Ok(())
    }

    /// Handles a right-click.
    ///
    /// In joint mode an unselected selectable row joins the selection
    /// (replacing it in single mode).
    pub fn context_menu(&mut self, row: &RowRef, index: Option<usize>) -> SelectionDelta {
        self.context_row = Some(row.clone());
        let mut delta = SelectionDelta::default();

        if self.context_menu_mode == ContextMenuMode::Joint
            && self.mode != SelectionMode::None
            && !self.is_selected(row)
            && self.is_selectable(row)
        {
            match self.mode {
                SelectionMode::Single => self.replace_with(row),
                _ => self.push(row),
            }
            delta.select(SelectTrigger::Row, row, index);
        }
        delta
    }

    /// Clears the selection. Returns `true` if it was not empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selection.is_empty();
        self.assign(Vec::new());
        self.clear_range();
        changed
    }

    /// Forgets the range anchor.
    pub fn clear_range(&mut self) {
        self.anchor = None;
    }

    /// Points selected rows at their counterparts in `rows`.
    ///
    /// Rows without a counterpart stay as they are.
    pub fn rebind(&mut self, rows: &[RowRef]) {
        if self.identity == Identity::Reference {
            return;
        }
        for selected in &mut self.selection {
            if let Some(position) = self.identity.position(rows, selected) {
                *selected = rows[position].clone();
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn assign(&mut self, rows: Vec<RowRef>) {
        self.selection.clear();
        self.keys.clear();
        for row in rows {
            if self.mode == SelectionMode::Single && !self.selection.is_empty() {
                break;
            }
            if !self.is_selected(&row) {
                self.push(&row);
            }
        }
    }

    fn replace_with(&mut self, row: &RowRef) {
        self.selection.clear();
        self.keys.clear();
        self.push(row);
    }

    fn push(&mut self, row: &RowRef) {
        if let Some(key) = self.identity.key_of(row) {
            self.keys.insert(key);
        }
        self.selection.push(row.clone());
    }

    fn remove(&mut self, row: &RowRef) -> bool {
        match self.identity.position(&self.selection, row) {
            Some(position) => {
                let removed = self.selection.remove(position);
                if let Some(key) = self.identity.key_of(&removed) {
                    self.keys.remove(&key);
                }
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionModel")
            .field("mode", &self.mode)
            .field("identity", &self.identity)
            .field("meta_key_selection", &self.meta_key_selection)
            .field("selected", &self.selection.len())
            .field("anchor", &self.anchor)
            .finish()
    }
}
