//! Named match predicates.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// Name of a filter predicate.
///
/// Builtin names map to the predicates in this module; any other name is a
/// [`MatchMode::Custom`] predicate looked up in the
/// [`FilterRegistry`](super::FilterRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum MatchMode {
    #[default]
    StartsWith,
    Contains,
    NotContains,
    EndsWith,
    Equals,
    NotEquals,
    In,
    Lt,
    Lte,
    Gt,
    Gte,
    Between,
    Is,
    IsNot,
    Before,
    After,
    DateIs,
    DateIsNot,
    DateBefore,
    DateAfter,
    /// A predicate registered under this name.
    Custom(String),
}

impl MatchMode {
    /// Returns the wire name.
    pub fn as_str(&self) -> &str {
        match self {
            MatchMode::StartsWith => "startsWith",
            MatchMode::Contains => "contains",
            MatchMode::NotContains => "notContains",
            MatchMode::EndsWith => "endsWith",
            MatchMode::Equals => "equals",
            MatchMode::NotEquals => "notEquals",
            MatchMode::In => "in",
            MatchMode::Lt => "lt",
            MatchMode::Lte => "lte",
            MatchMode::Gt => "gt",
            MatchMode::Gte => "gte",
            MatchMode::Between => "between",
            MatchMode::Is => "is",
            MatchMode::IsNot => "isNot",
            MatchMode::Before => "before",
            MatchMode::After => "after",
            MatchMode::DateIs => "dateIs",
            MatchMode::DateIsNot => "dateIsNot",
            MatchMode::DateBefore => "dateBefore",
            MatchMode::DateAfter => "dateAfter",
            MatchMode::Custom(name) => name,
        }
    }

    /// Runs the builtin predicate. Returns `None` for custom modes.
    pub fn builtin(&self, value: &Value, filter: &Value) -> Option<bool> {
        let matched = match self {
            MatchMode::StartsWith => text_match(value, filter, |v, f| v.starts_with(f)),
            MatchMode::Contains => text_match(value, filter, |v, f| v.contains(f)),
            MatchMode::EndsWith => text_match(value, filter, |v, f| v.ends_with(f)),
            MatchMode::NotContains => {
                if filter.is_blank() || value.is_null() {
                    true
                } else {
                    !value.folded().contains(&filter.folded())
                }
            }
            MatchMode::Equals | MatchMode::Is => equals(value, filter),
            MatchMode::NotEquals | MatchMode::IsNot => {
                if filter.is_blank() {
                    false
                } else if value.is_null() {
                    true
                } else {
                    !equals(value, filter)
                }
            }
            MatchMode::In => match filter {
                Value::Null => true,
                Value::List(items) => items.is_empty() || items.iter().any(|f| value.loose_eq(f)),
                single => value.loose_eq(single),
            },
            MatchMode::Between => match filter.as_list() {
                Some([low, high]) if !low.is_null() && !high.is_null() => {
                    !value.is_null()
                        && matches!(low.compare(value), Some(Ordering::Less | Ordering::Equal))
                        && matches!(value.compare(high), Some(Ordering::Less | Ordering::Equal))
                }
                _ => true,
            },
            MatchMode::Lt | MatchMode::Before => relational(value, filter, |o| o == Ordering::Less),
            MatchMode::Lte => relational(value, filter, |o| o != Ordering::Greater),
            MatchMode::Gt | MatchMode::After => {
                relational(value, filter, |o| o == Ordering::Greater)
            }
            MatchMode::Gte => relational(value, filter, |o| o != Ordering::Less),
            MatchMode::DateIs => same_day(value, filter).unwrap_or(filter.is_null()),
            MatchMode::DateIsNot => {
                same_day(value, filter).map(|same| !same).unwrap_or(filter.is_null())
            }
            MatchMode::DateBefore => relational(value, filter, |o| o == Ordering::Less),
            MatchMode::DateAfter => relational(value, filter, |o| o == Ordering::Greater),
            MatchMode::Custom(_) => return None,
        };
        Some(matched)
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MatchMode {
    fn from(name: &str) -> Self {
        match name {
            "startsWith" => MatchMode::StartsWith,
            "contains" => MatchMode::Contains,
            "notContains" => MatchMode::NotContains,
            "endsWith" => MatchMode::EndsWith,
            "equals" => MatchMode::Equals,
            "notEquals" => MatchMode::NotEquals,
            "in" => MatchMode::In,
            "lt" => MatchMode::Lt,
            "lte" => MatchMode::Lte,
            "gt" => MatchMode::Gt,
            "gte" => MatchMode::Gte,
            "between" => MatchMode::Between,
            "is" => MatchMode::Is,
            "isNot" => MatchMode::IsNot,
            "before" => MatchMode::Before,
            "after" => MatchMode::After,
            "dateIs" => MatchMode::DateIs,
            "dateIsNot" => MatchMode::DateIsNot,
            "dateBefore" => MatchMode::DateBefore,
            "dateAfter" => MatchMode::DateAfter,
            other => MatchMode::Custom(other.to_string()),
        }
    }
}

impl From<String> for MatchMode {
    fn from(name: String) -> Self {
        MatchMode::from(name.as_str())
    }
}

impl From<MatchMode> for String {
    fn from(mode: MatchMode) -> Self {
        mode.as_str().to_string()
    }
}

// A blank filter passes everything, a null value passes nothing.
fn text_match(value: &Value, filter: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
    if filter.is_blank() {
        return true;
    }
    if value.is_null() {
        return false;
    }
    test(&value.folded(), &filter.folded())
}

fn equals(value: &Value, filter: &Value) -> bool {
    if filter.is_blank() {
        return true;
    }
    if value.is_null() {
        return false;
    }
    if let (Some(a), Some(b)) = (value.as_datetime(), filter.as_datetime()) {
        return a == b;
    }
    value.loose_eq(filter) || value.folded() == filter.folded()
}

fn relational(value: &Value, filter: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    if filter.is_null() {
        return true;
    }
    if value.is_null() {
        return false;
    }
    value.compare(filter).is_some_and(accept)
}

fn same_day(value: &Value, filter: &Value) -> Option<bool> {
    let filter = filter.as_datetime()?;
    let value = value.as_datetime()?;
    Some(value.date_naive() == filter.date_naive())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn check(mode: MatchMode, value: impl Into<Value>, filter: impl Into<Value>) -> bool {
        mode.builtin(&value.into(), &filter.into()).unwrap()
    }

    #[test]
    fn test_string_predicates_fold_case() {
        assert!(check(MatchMode::StartsWith, "Alpha", "al"));
        assert!(check(MatchMode::Contains, "Alpha", "PH"));
        assert!(check(MatchMode::EndsWith, "Alpha", "HA"));
        assert!(!check(MatchMode::StartsWith, "Alpha", "ph"));
        assert!(check(MatchMode::NotContains, "Alpha", "zz"));
    }

    #[test]
    fn test_blank_filter_and_null_value() {
        assert!(check(MatchMode::Contains, Value::Null, ""));
        assert!(!check(MatchMode::Contains, Value::Null, "a"));
        assert!(check(MatchMode::NotContains, Value::Null, "a"));
        assert!(!check(MatchMode::NotEquals, "a", ""));
        assert!(check(MatchMode::NotEquals, Value::Null, "a"));
    }

    #[test]
    fn test_numbers_stringify_for_text_predicates() {
        assert!(check(MatchMode::StartsWith, 1234i64, "12"));
        assert!(check(MatchMode::Equals, 5i64, "5"));
    }

    #[test]
    fn test_in_and_between() {
        assert!(check(MatchMode::In, 2i64, vec![1i64, 2, 3]));
        assert!(!check(MatchMode::In, 4i64, vec![1i64, 2, 3]));
        assert!(check(MatchMode::In, 4i64, Value::List(vec![])));
        assert!(check(MatchMode::Between, 5i64, vec![1i64, 5]));
        assert!(!check(MatchMode::Between, 6i64, vec![1i64, 5]));
        assert!(check(MatchMode::Between, 6i64, vec![Value::Null, Value::from(5i64)]));
    }

    #[test]
    fn test_relational() {
        assert!(check(MatchMode::Lt, 1i64, 2.5));
        assert!(check(MatchMode::Lte, 2i64, 2i64));
        assert!(!check(MatchMode::Gt, Value::Null, 1i64));
        assert!(check(MatchMode::Gte, 3i64, Value::Null));
    }

    #[test]
    fn test_dates() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        let next = Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap();
        assert!(check(MatchMode::DateIs, morning, evening));
        assert!(check(MatchMode::DateIsNot, morning, next));
        assert!(check(MatchMode::DateBefore, morning, evening));
        assert!(check(MatchMode::DateAfter, next, evening));
        assert!(!check(MatchMode::Equals, morning, evening));
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(MatchMode::from("dateIsNot"), MatchMode::DateIsNot);
        assert_eq!(MatchMode::from("fuzzy"), MatchMode::Custom("fuzzy".into()));
        assert_eq!(serde_json::to_string(&MatchMode::NotContains).unwrap(), "\"notContains\"");
        assert!(MatchMode::Custom("fuzzy".into()).builtin(&Value::Null, &Value::Null).is_none());
    }
}
