//! Comparators and sort toggling.

use std::cmp::Ordering;

use super::SortDescriptor;
use super::SortOrder;
use super::SortSpec;
use crate::model::FieldPath;
use crate::model::Record;
use crate::model::RowRef;
use crate::model::Value;

/// Compares two resolved field values in ascending order.
///
/// Null sorts before non-null, two nulls are equal, and incomparable values
/// are equal.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}

/// Compares two records on one sort key.
pub fn compare_field(a: &Record, b: &Record, descriptor: &SortDescriptor) -> Ordering {
    let ordering = compare_values(a.resolve(&descriptor.field), b.resolve(&descriptor.field));
    descriptor.order.apply(ordering)
}

/// Compares two records on a list of sort keys.
///
/// The first key that tells the records apart decides. Records equal on
/// every key compare equal, so a stable sort keeps their prior order.
pub fn compare_multiple(a: &Record, b: &Record, descriptors: &[SortDescriptor]) -> Ordering {
    for descriptor in descriptors {
        let ordering = compare_field(a, b, descriptor);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Returns the records ordered by one field.
pub fn sort_single(records: &[RowRef], descriptor: &SortDescriptor) -> Vec<RowRef> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_field(a, b, descriptor));
    sorted
}

/// Returns the records ordered by a list of fields.
pub fn sort_multiple(records: &[RowRef], descriptors: &[SortDescriptor]) -> Vec<RowRef> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_multiple(a, b, descriptors));
    sorted
}

/// Returns the records ordered by a sort spec. `SortSpec::None` keeps the
/// current order.
pub fn sort_records(records: &[RowRef], spec: &SortSpec) -> Vec<RowRef> {
    match spec {
        SortSpec::None => records.to_vec(),
        SortSpec::Single(descriptor) => sort_single(records, descriptor),
        SortSpec::Multiple(descriptors) => sort_multiple(records, descriptors),
    }
}

/// Next single-mode sort after a header click on `field`.
///
/// Clicking the sorted field flips its order, any other field starts at
/// `default_order`.
pub fn toggle_single(
    current: Option<&SortDescriptor>,
    field: &FieldPath,
    default_order: SortOrder,
) -> SortDescriptor {
    match current {
        Some(descriptor) if &descriptor.field == field => {
            SortDescriptor::new(field, descriptor.order.flip())
        }
        _ => SortDescriptor::new(field, default_order),
    }
}

/// Next multi-mode sort list after a header click on `field`.
pub fn toggle_multiple(
    current: &[SortDescriptor],
    field: &FieldPath,
    default_order: SortOrder,
    modifier_held: bool,
) -> Vec<SortDescriptor> {
    match current.iter().position(|d| &d.field == field) {
        Some(index) if modifier_held => {
            let mut next = current.to_vec();
            next[index].order = next[index].order.flip();
            next
        }
        Some(index) => vec![SortDescriptor::new(field, current[index].order.flip())],
        None if modifier_held => {
            let mut next = current.to_vec();
            next.push(SortDescriptor::new(field, default_order));
            next
        }
        None => vec![SortDescriptor::new(field, default_order)],
    }
}
