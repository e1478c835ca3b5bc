//! Sorting: descriptors, specs and the sort engine.

mod engine;

pub use engine::*;

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::FieldPath;
use crate::model::RowRef;

/// Sort direction, serialized as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl SortOrder {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

impl From<SortOrder> for i8 {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

impl TryFrom<i8> for SortOrder {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SortOrder::Ascending),
            -1 => Ok(SortOrder::Descending),
            other => Err(format!("invalid sort order {other}, expected 1 or -1")),
        }
    }
}

/// Sort mode of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// One sort field at a time.
    #[default]
    Single,
    /// An ordered list of sort fields.
    Multiple,
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    /// Field to sort on.
    pub field: FieldPath,
    /// Direction.
    pub order: SortOrder,
}

impl SortDescriptor {
    /// Creates a sort descriptor.
    pub fn new(field: impl Into<FieldPath>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Creates an ascending sort descriptor.
    pub fn asc(field: impl Into<FieldPath>) -> Self {
        Self::new(field, SortOrder::Ascending)
    }

    /// Creates a descending sort descriptor.
    pub fn desc(field: impl Into<FieldPath>) -> Self {
        Self::new(field, SortOrder::Descending)
    }
}

/// The active sort of a table.
///
/// In multiple mode the list order defines tie-break precedence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortSpec {
    /// Not sorted.
    #[default]
    None,
    /// Single-field sort.
    Single(SortDescriptor),
    /// Multi-field sort (`multiSortMeta`).
    Multiple(Vec<SortDescriptor>),
}

impl SortSpec {
    /// Returns `true` if any sort key is active.
    pub fn is_active(&self) -> bool {
        match self {
            SortSpec::None => false,
            SortSpec::Single(_) => true,
            SortSpec::Multiple(list) => !list.is_empty(),
        }
    }

    /// Returns the active descriptors in precedence order.
    pub fn descriptors(&self) -> &[SortDescriptor] {
        match self {
            SortSpec::None => &[],
            SortSpec::Single(descriptor) => std::slice::from_ref(descriptor),
            SortSpec::Multiple(list) => list,
        }
    }

    /// Returns the descriptor for a field, if that field is sorted.
    pub fn descriptor_for(&self, field: &FieldPath) -> Option<&SortDescriptor> {
        self.descriptors().iter().find(|d| &d.field == field)
    }
}

/// What a custom sort function receives.
#[derive(Debug)]
pub struct SortRequest<'a> {
    /// Records in their current order.
    pub records: &'a [RowRef],
    /// Sort to apply.
    pub spec: &'a SortSpec,
}

/// Custom sort override.
///
/// Returns the reordered records, or `None` when the caller reorders out of
/// band and hands the result back through `set_records`.
pub type SortFunction = Arc<dyn Fn(&SortRequest<'_>) -> Option<Vec<RowRef>> + Send + Sync>;
