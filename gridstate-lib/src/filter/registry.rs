//! Pluggable match predicates.

use std::collections::HashMap;
use std::sync::Arc;

use super::MatchMode;
use crate::model::Value;

/// A match predicate: `(field value, filter operand) -> matches`.
pub type MatchPredicate = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Resolves a [`MatchMode`] to the predicate that implements it.
///
/// Registered predicates take precedence over builtins, so registering a
/// builtin name overrides it.
///
/// # Example
///
/// ```
/// use gridstate_lib::filter::{FilterRegistry, MatchMode};
/// use gridstate_lib::model::Value;
///
/// let mut registry = FilterRegistry::new();
/// registry.register("even", |value, _| value.as_f64().is_some_and(|n| n % 2.0 == 0.0));
///
/// let even = MatchMode::from("even");
/// assert!(registry.matches(&even, &Value::from(4i64), &Value::Null));
/// ```
#[derive(Clone, Default)]
pub struct FilterRegistry {
    predicates: HashMap<String, MatchPredicate>,
}

impl FilterRegistry {
    /// Creates a registry with only the builtin predicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a predicate under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    /// Returns `true` if a predicate is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Runs the predicate named by `mode`.
    ///
    /// An unknown custom name logs a warning and matches, so a typo never
    /// hides every row.
    pub fn matches(&self, mode: &MatchMode, value: &Value, filter: &Value) -> bool {
        if let Some(predicate) = self.predicates.get(mode.as_str()) {
            return predicate(value, filter);
        }
        match mode.builtin(value, filter) {
            Some(matched) => matched,
            None => {
                log::warn!("[filter] no predicate registered for match mode '{}'", mode);
                true
            }
        }
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("custom", &self.predicates.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_builtin() {
        let mut registry = FilterRegistry::new();
        let contains = MatchMode::Contains;
        assert!(registry.matches(&contains, &Value::from("abc"), &Value::from("b")));

        registry.register("contains", |_, _| false);
        assert!(!registry.matches(&contains, &Value::from("abc"), &Value::from("b")));
    }

    #[test]
    fn test_unknown_custom_mode_matches() {
        let registry = FilterRegistry::new();
        let mode = MatchMode::from("unknown");
        assert!(registry.matches(&mode, &Value::from("x"), &Value::from("y")));
    }
}
