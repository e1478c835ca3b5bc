//! Filter evaluation.

use super::FieldFilter;
use super::FilterOperator;
use super::FilterRegistry;
use super::FilterSet;
use crate::error::ConfigError;
use crate::model::FieldPath;
use crate::model::Record;
use crate::model::RowRef;

/// Computes the visible subset of `records`.
///
/// Per-field filters are AND-ed together. The global filter matches when any
/// of its fields matches; it scans its own field list when it has one and
/// `default_global_fields` otherwise. With both kinds present a record must
/// pass both.
///
/// Returns `Ok(None)` when no filter is active, and also when every record
/// passes: a result as long as the source is reported as "unfiltered".
///
/// # Errors
///
/// [`ConfigError::FilterMisconfigured`] when a global filter is set and
/// there are no fields to scan.
pub fn evaluate(
    records: &[RowRef],
    filters: &FilterSet,
    default_global_fields: &[FieldPath],
    registry: &FilterRegistry,
) -> Result<Option<Vec<RowRef>>, ConfigError> {
    if !filters.has_filter() {
        return Ok(None);
    }

    let global = match filters.global() {
        Some(global) => {
            let fields = if global.fields.is_empty() {
                default_global_fields
            } else {
                global.fields.as_slice()
            };
            if fields.is_empty() {
                return Err(ConfigError::FilterMisconfigured);
            }
            Some((global, fields))
        }
        None => None,
    };

    let local: Vec<(FieldPath, &FieldFilter)> = filters
        .fields()
        .map(|(field, filter)| (FieldPath::new(field), filter))
        .collect();

    let filtered: Vec<RowRef> = records
        .iter()
        .filter(|record| {
            let local_match = local
                .iter()
                .all(|(field, filter)| field_matches(record, field, filter, registry));

            match global {
                Some((global, fields)) => {
                    let global_match = fields.iter().any(|field| {
                        registry.matches(&global.match_mode, record.resolve(field), &global.value)
                    });
                    if local.is_empty() {
                        global_match
                    } else {
                        local_match && global_match
                    }
                }
                None => local_match,
            }
        })
        .cloned()
        .collect();

    log::debug!(
        "[filter] {} of {} records match {} filter(s)",
        filtered.len(),
        records.len(),
        filters.len()
    );

    if filtered.len() == records.len() {
        Ok(None)
    } else {
        Ok(Some(filtered))
    }
}

/// Evaluates one field entry against a record.
///
/// A constraint list is walked in order: an `or` constraint that matches or
/// an `and` constraint that fails ends the walk, and the last evaluated
/// constraint decides.
pub fn field_matches(
    record: &Record,
    field: &FieldPath,
    filter: &FieldFilter,
    registry: &FilterRegistry,
) -> bool {
    let value = record.resolve(field);
    match filter {
        FieldFilter::Single(descriptor) => {
            registry.matches(&descriptor.match_mode, value, &descriptor.value)
        }
        FieldFilter::Constraints(constraints) => {
            let mut matched = true;
            for constraint in constraints {
                matched = registry.matches(&constraint.match_mode, value, &constraint.value);
                match constraint.operator.unwrap_or_default() {
                    FilterOperator::Or if matched => break,
                    FilterOperator::And if !matched => break,
                    _ => {}
                }
            }
            matched
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::filter::FilterDescriptor;
    use crate::filter::GlobalFilter;
    use crate::filter::MatchMode;

    fn rows() -> Vec<RowRef> {
        vec![
            Arc::new(Record::new().set("id", 1i64).set("name", "b").set("city", "Ghent")),
            Arc::new(Record::new().set("id", 2i64).set("name", "a").set("city", "Antwerp")),
            Arc::new(Record::new().set("id", 3i64).set("name", "ab").set("city", "Bruges")),
        ]
    }

    fn ids(rows: &[RowRef]) -> Vec<i64> {
        rows.iter().map(|r| r.get_int("id").unwrap().unwrap()).collect()
    }

    fn run(filters: &FilterSet) -> Option<Vec<i64>> {
        let fields = vec![FieldPath::new("name"), FieldPath::new("city")];
        evaluate(&rows(), filters, &fields, &FilterRegistry::new())
            .unwrap()
            .map(|r| ids(&r))
    }

    #[test]
    fn test_local_filter() {
        let mut filters = FilterSet::new();
        filters.set_field_filter("name", "a", MatchMode::StartsWith);
        assert_eq!(run(&filters), Some(vec![2, 3]));
    }

    #[test]
    fn test_global_only() {
        let mut filters = FilterSet::new();
        filters.set_global_filter("br", MatchMode::Contains);
        assert_eq!(run(&filters), Some(vec![3]));
    }

    #[test]
    fn test_local_and_global() {
        let mut filters = FilterSet::new();
        filters.set_field_filter("name", "a", MatchMode::StartsWith);
        filters.set_global_filter("ant", MatchMode::Contains);
        assert_eq!(run(&filters), Some(vec![2]));
    }

    #[test]
    fn test_global_explicit_fields() {
        let mut filters = FilterSet::new();
        filters.set_global(Some(GlobalFilter::new("2", MatchMode::Equals).with_fields(["id"])));
        assert_eq!(run(&filters), Some(vec![2]));
    }

    #[test]
    fn test_everything_matching_normalizes_to_unfiltered() {
        let mut filters = FilterSet::new();
        filters.set_field_filter("id", 0i64, MatchMode::Gt);
        assert_eq!(run(&filters), None);
        assert_eq!(run(&FilterSet::new()), None);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut filters = FilterSet::new();
        filters.set_field_filter("name", "a", MatchMode::Contains);
        let registry = FilterRegistry::new();
        let first = evaluate(&rows(), &filters, &[], &registry).unwrap().unwrap();
        // Running again over the normalized result keeps every row, which
        // normalizes to "unfiltered" over that same collection.
        let second = evaluate(&first, &filters, &[], &registry).unwrap();
        let again = second.unwrap_or_else(|| first.clone());
        assert_eq!(ids(&again), ids(&first));
    }

    #[test]
    fn test_constraint_operators() {
        let mut filters = FilterSet::new();
        filters.set_constraints(
            "id",
            vec![
                FilterDescriptor::new(1i64, MatchMode::Equals).with_operator(FilterOperator::Or),
                FilterDescriptor::new(3i64, MatchMode::Equals).with_operator(FilterOperator::Or),
            ],
        );
        assert_eq!(run(&filters), Some(vec![1, 3]));

        filters.set_constraints(
            "id",
            vec![
                FilterDescriptor::new(1i64, MatchMode::Gt),
                FilterDescriptor::new(3i64, MatchMode::Lt),
            ],
        );
        assert_eq!(run(&filters), Some(vec![2]));
    }

    #[test]
    fn test_global_without_fields_is_misconfigured() {
        let mut filters = FilterSet::new();
        filters.set_global_filter("a", MatchMode::Contains);
        let result = evaluate(&rows(), &filters, &[], &FilterRegistry::new());
        assert_eq!(result.unwrap_err(), ConfigError::FilterMisconfigured);
    }
}
