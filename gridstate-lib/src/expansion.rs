//! Expanded row tracking

use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::model::FieldPath;
use crate::model::Record;

/// How many rows may be expanded at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandMode {
    /// Expanding a row collapses the others.
    Single,
    /// Rows expand independently.
    #[default]
    Multiple,
}

/// Keys of the expanded rows.
#[derive(Debug, Clone, Default)]
pub struct RowExpansion {
    mode: ExpandMode,
    data_key: Option<FieldPath>,
    expanded: BTreeSet<String>,
}

impl RowExpansion {
    pub fn new(mode: ExpandMode, data_key: Option<FieldPath>) -> Self {
        Self {
            mode,
            data_key,
            expanded: BTreeSet::new(),
        }
    }

    fn key_of(&self, row: &Record) -> Option<String> {
        self.data_key.as_ref().map(|field| row.resolve(field).to_string())
    }

    /// Expands or collapses `row`. Returns `true` if the row is now expanded.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingIdentityKey`] without a data key.
    pub fn toggle(&mut self, row: &Record) -> Result<bool, ConfigError> {
        let key = self
            .key_of(row)
            .ok_or(ConfigError::missing_key("row expansion"))?;

        if self.expanded.remove(&key) {
            log::trace!("[expansion] collapsed {}", key);
            return Ok(false);
        }
        if self.mode == ExpandMode::Single {
            self.expanded.clear();
        }
        log::trace!("[expansion] expanded {}", key);
        self.expanded.insert(key);
        Ok(true)
    }

    /// Returns `true` if `row` is expanded.
    pub fn is_expanded(&self, row: &Record) -> bool {
        self.key_of(row).is_some_and(|key| self.expanded.contains(&key))
    }

    /// Expanded keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.expanded.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Replaces the expanded keys.
    pub fn restore(&mut self, keys: impl IntoIterator<Item = String>) {
        self.expanded = keys.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64) -> Record {
        Record::new().set("id", id)
    }

    #[test]
    fn test_toggle_requires_data_key() {
        let mut expansion = RowExpansion::new(ExpandMode::Multiple, None);
        assert_eq!(
            expansion.toggle(&row(1)),
            Err(ConfigError::missing_key("row expansion"))
        );
        assert!(!expansion.is_expanded(&row(1)));
    }

    #[test]
    fn test_multiple_mode() {
        let mut expansion = RowExpansion::new(ExpandMode::Multiple, Some("id".into()));
        assert!(expansion.toggle(&row(1)).unwrap());
        assert!(expansion.toggle(&row(2)).unwrap());
        assert_eq!(expansion.keys(), vec!["1", "2"]);
        assert!(!expansion.toggle(&row(1)).unwrap());
        assert_eq!(expansion.keys(), vec!["2"]);
    }

    #[test]
    fn test_single_mode_collapses_others() {
        let mut expansion = RowExpansion::new(ExpandMode::Single, Some("id".into()));
        expansion.toggle(&row(1)).unwrap();
        expansion.toggle(&row(2)).unwrap();
        assert!(!expansion.is_expanded(&row(1)));
        assert!(expansion.is_expanded(&row(2)));
    }
}
