//! Persisted table state

use serde::Deserialize;
use serde::Serialize;

use crate::filter::FilterSet;
use crate::model::FieldPath;
use crate::model::Record;
use crate::sort::SortDescriptor;
use crate::sort::SortOrder;
use crate::sort::SortSpec;

/// Serialized table state.
///
/// A flat JSON object. A key is only written when its feature is active, so
/// restoring a snapshot never overwrites state it did not capture.
///
/// ```json
/// {
///   "first": 10,
///   "rows": 10,
///   "sortField": "name",
///   "sortOrder": 1,
///   "filters": { "name": { "value": "a", "matchMode": "startsWith" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// Page offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<usize>,

    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,

    /// Single-mode sort field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<FieldPath>,

    /// Single-mode sort order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    /// Multi-mode sort list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_sort_meta: Option<Vec<SortDescriptor>>,

    /// Active filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSet>,

    /// Selected records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Vec<Record>>,

    /// Keys of expanded rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_row_keys: Option<Vec<String>>,

    /// Column widths in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<u16>>,

    /// Table width after an expand-mode resize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_width: Option<u32>,

    /// Column keys in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_order: Option<Vec<String>>,
}

impl StateSnapshot {
    /// Records the active sort.
    pub fn set_sort(&mut self, sort: &SortSpec) {
        self.sort_field = None;
        self.sort_order = None;
        self.multi_sort_meta = None;
        match sort {
            SortSpec::None => {}
            SortSpec::Single(descriptor) => {
                self.sort_field = Some(descriptor.field.clone());
                self.sort_order = Some(descriptor.order);
            }
            SortSpec::Multiple(list) if list.is_empty() => {}
            SortSpec::Multiple(list) => self.multi_sort_meta = Some(list.clone()),
        }
    }

    /// The captured sort, if any.
    pub fn sort(&self) -> Option<SortSpec> {
        if let Some(list) = &self.multi_sort_meta {
            return Some(SortSpec::Multiple(list.clone()));
        }
        let field = self.sort_field.clone()?;
        Some(SortSpec::Single(SortDescriptor::new(
            field,
            self.sort_order.unwrap_or_default(),
        )))
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::filter::MatchMode;
    use crate::model::Value;

    #[test]
    fn test_only_active_keys_are_written() {
        let snapshot = StateSnapshot {
            first: Some(10),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), r#"{"first":10}"#);
        assert_eq!(serde_json::to_string(&StateSnapshot::default()).unwrap(), "{}");
    }

    #[test]
    fn test_sort_round_trip() {
        let mut snapshot = StateSnapshot::default();
        snapshot.set_sort(&SortSpec::Single(SortDescriptor::desc("name")));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["sortField"], "name");
        assert_eq!(json["sortOrder"], -1);

        let back: StateSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back.sort(), Some(SortSpec::Single(SortDescriptor::desc("name"))));

        snapshot.set_sort(&SortSpec::Multiple(vec![SortDescriptor::asc("a")]));
        assert!(snapshot.sort_field.is_none());
        assert_eq!(snapshot.sort(), Some(SortSpec::Multiple(vec![SortDescriptor::asc("a")])));
    }

    #[test]
    fn test_dates_are_revived() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut filters = FilterSet::new();
        filters.set_field_filter("created", when, MatchMode::DateIs);
        let snapshot = StateSnapshot {
            filters: Some(filters.clone()),
            ..Default::default()
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.filters, Some(filters));
        let Some(crate::filter::FieldFilter::Single(descriptor)) =
            back.filters.as_ref().and_then(|f| f.get("created"))
        else {
            panic!("expected a single descriptor");
        };
        assert_eq!(descriptor.value, Value::DateTime(when));
    }
}
