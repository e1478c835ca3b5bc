//! Row selection: modes, identity rules and the selection model.

mod identity;
mod model;

pub use identity::*;
pub use model::*;

use std::sync::Arc;

use crate::model::Record;
use crate::model::RowRef;

/// Selection mode of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// At most one selected row.
    Single,
    /// Any number of selected rows.
    Multiple,
}

/// What caused a row to be selected or unselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTrigger {
    /// Row click, including shift ranges.
    Row,
    /// Row checkbox.
    Checkbox,
    /// Row radio button.
    RadioButton,
}

/// Keyboard modifiers held during a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift: range selection.
    pub shift: bool,
    /// Ctrl/Cmd: toggle membership.
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        shift: false,
        meta: false,
    };

    /// Shift held.
    pub fn shift() -> Self {
        Self {
            shift: true,
            meta: false,
        }
    }

    /// Ctrl/Cmd held.
    pub fn meta() -> Self {
        Self {
            shift: false,
            meta: true,
        }
    }
}

/// How a right-click interacts with the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextMenuMode {
    /// Right-clicking an unselected row selects it.
    #[default]
    Joint,
    /// Right-click tracks its own row and leaves the selection alone.
    Separate,
}

/// Predicate deciding whether a row may be selected.
pub type RowPredicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// One row entering or leaving the selection.
#[derive(Debug, Clone)]
pub struct RowSelectEvent {
    /// What caused the change.
    pub trigger: SelectTrigger,
    /// The row.
    pub record: RowRef,
    /// Row index in the data the interaction happened on.
    pub index: Option<usize>,
}

/// Result of a selection interaction.
#[derive(Debug, Clone, Default)]
pub struct SelectionDelta {
    /// Rows that entered the selection, in order.
    pub selected: Vec<RowSelectEvent>,
    /// Rows that left the selection, in order.
    pub unselected: Vec<RowSelectEvent>,
}

impl SelectionDelta {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.unselected.is_empty()
    }

    fn select(&mut self, trigger: SelectTrigger, record: &RowRef, index: Option<usize>) {
        self.selected.push(RowSelectEvent {
            trigger,
            record: record.clone(),
            index,
        });
    }

    fn unselect(&mut self, trigger: SelectTrigger, record: &RowRef, index: Option<usize>) {
        self.unselected.push(RowSelectEvent {
            trigger,
            record: record.clone(),
            index,
        });
    }
}
