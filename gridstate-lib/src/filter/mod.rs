//! Filtering: filter sets, match predicates and the filter engine.
//!
//! A [`FilterSet`] maps fields to descriptors and carries an optional
//! [`GlobalFilter`]. [`evaluate`] turns a filter set into the visible subset
//! of a record collection, and [`FilterDebounce`] coalesces bursts of filter
//! edits into a single evaluation.

mod debounce;
mod engine;
mod match_mode;
mod registry;

pub use debounce::*;
pub use engine::*;
pub use match_mode::*;
pub use registry::*;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::FieldPath;
use crate::model::Value;

/// Reserved wire key of the global filter.
pub const GLOBAL_KEY: &str = "global";

/// How a constraint combines with the ones after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Stop at the first failing constraint.
    #[default]
    And,
    /// Stop at the first matching constraint.
    Or,
}

/// A filter condition on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    /// Operand passed to the match predicate.
    #[serde(default)]
    pub value: Value,
    /// Name of the match predicate.
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Combination rule inside a constraint list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<FilterOperator>,
}

impl FilterDescriptor {
    /// Creates a filter descriptor.
    pub fn new(value: impl Into<Value>, match_mode: impl Into<MatchMode>) -> Self {
        Self {
            value: value.into(),
            match_mode: match_mode.into(),
            operator: None,
        }
    }

    /// Sets the constraint operator.
    pub fn with_operator(mut self, operator: FilterOperator) -> Self {
        self.operator = Some(operator);
        self
    }
}

/// The filter attached to one field: a plain descriptor, or an ordered
/// list of constraints as built by a filter menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldFilter {
    /// One condition.
    Single(FilterDescriptor),
    /// Several conditions combined by their operators.
    Constraints(Vec<FilterDescriptor>),
}

/// The global filter: one value matched against many fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFilter {
    /// Operand passed to the match predicate.
    pub value: Value,
    /// Name of the match predicate.
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Fields to scan. Empty means "use the table's global fields or columns".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldPath>,
}

impl GlobalFilter {
    /// Creates a global filter over the table's default fields.
    pub fn new(value: impl Into<Value>, match_mode: impl Into<MatchMode>) -> Self {
        Self {
            value: value.into(),
            match_mode: match_mode.into(),
            fields: Vec::new(),
        }
    }

    /// Restricts the global filter to explicit fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<FieldPath>>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// All active filters of a table.
///
/// Serializes as a flat object keyed by field, with the global filter under
/// the reserved `"global"` key.
///
/// # Example
///
/// ```
/// use gridstate_lib::filter::{FilterSet, MatchMode};
///
/// let mut filters = FilterSet::new();
/// filters.set_field_filter("name", "a", MatchMode::StartsWith);
/// assert!(filters.has_filter());
///
/// // Blank values remove the entry.
/// filters.set_field_filter("name", "  ", MatchMode::StartsWith);
/// assert!(!filters.has_filter());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    global: Option<GlobalFilter>,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldFilter>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a filter on `field`, or removes it when `value` is blank.
    ///
    /// The reserved `"global"` field sets the global filter instead.
    pub fn set_field_filter(
        &mut self,
        field: impl Into<FieldPath>,
        value: impl Into<Value>,
        match_mode: impl Into<MatchMode>,
    ) {
        let field = field.into();
        let value = value.into();
        if field.as_str() == GLOBAL_KEY {
            self.set_global_filter(value, match_mode);
            return;
        }
        if value.is_blank() {
            self.fields.remove(field.as_str());
        } else {
            self.fields.insert(
                field.as_str().to_string(),
                FieldFilter::Single(FilterDescriptor::new(value, match_mode)),
            );
        }
    }

    /// Stores a constraint list on `field`. An empty list removes the entry.
    pub fn set_constraints(
        &mut self,
        field: impl Into<FieldPath>,
        constraints: Vec<FilterDescriptor>,
    ) {
        let field = field.into();
        if constraints.is_empty() {
            self.fields.remove(field.as_str());
        } else {
            self.fields
                .insert(field.as_str().to_string(), FieldFilter::Constraints(constraints));
        }
    }

    /// Sets the global filter over the table's default fields, or removes it
    /// when `value` is blank.
    pub fn set_global_filter(&mut self, value: impl Into<Value>, match_mode: impl Into<MatchMode>) {
        let value = value.into();
        self.global = if value.is_blank() {
            None
        } else {
            Some(GlobalFilter::new(value, match_mode))
        };
    }

    /// Replaces the global filter.
    pub fn set_global(&mut self, global: Option<GlobalFilter>) {
        self.global = global.filter(|g| !g.value.is_blank());
    }

    /// Removes the filter on `field`.
    pub fn remove(&mut self, field: &str) -> Option<FieldFilter> {
        self.fields.remove(field)
    }

    /// Removes every filter.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.global = None;
    }

    /// Returns the filter on `field`.
    pub fn get(&self, field: &str) -> Option<&FieldFilter> {
        self.fields.get(field)
    }

    /// Returns the global filter.
    pub fn global(&self) -> Option<&GlobalFilter> {
        self.global.as_ref()
    }

    /// Iterates over the per-field filters.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldFilter)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` if any per-field filter is set.
    pub fn has_local(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Returns `true` if any filter, local or global, is set.
    pub fn has_filter(&self) -> bool {
        self.has_local() || self.global.is_some()
    }

    /// Returns the number of active filters.
    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.global.is_some())
    }

    /// Returns `true` if no filter is set.
    pub fn is_empty(&self) -> bool {
        !self.has_filter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_remove_entries() {
        let mut filters = FilterSet::new();
        filters.set_field_filter("name", "a", MatchMode::StartsWith);
        filters.set_field_filter("tags", vec!["x"], MatchMode::In);
        assert_eq!(filters.len(), 2);

        filters.set_field_filter("tags", Value::List(vec![]), MatchMode::In);
        filters.set_field_filter("name", Value::Null, MatchMode::StartsWith);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_global_key_routes_to_global_slot() {
        let mut filters = FilterSet::new();
        filters.set_field_filter("global", "ada", MatchMode::Contains);
        assert!(filters.get("global").is_none());
        assert_eq!(filters.global().map(|g| &g.value), Some(&Value::from("ada")));
        assert!(filters.has_filter());
        assert!(!filters.has_local());
    }

    #[test]
    fn test_wire_format() {
        let mut filters = FilterSet::new();
        filters.set_field_filter("name", "a", MatchMode::StartsWith);
        filters.set_global_filter("x", MatchMode::Contains);
        filters.set_constraints(
            "age",
            vec![
                FilterDescriptor::new(18i64, MatchMode::Gte).with_operator(FilterOperator::And),
                FilterDescriptor::new(65i64, MatchMode::Lt).with_operator(FilterOperator::And),
            ],
        );

        let json: serde_json::Value = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["name"]["matchMode"], "startsWith");
        assert_eq!(json["global"]["value"], "x");
        assert_eq!(json["age"][1]["operator"], "and");

        let back: FilterSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, filters);
    }
}
