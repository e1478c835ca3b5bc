//! Row identity rules

use std::sync::Arc;

use crate::model::FieldPath;
use crate::model::Record;
use crate::model::RowRef;

/// How two rows are recognised as "the same row".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    /// Same shared record instance.
    #[default]
    Reference,
    /// Same stringified value at the data key.
    Key(FieldPath),
    /// Structurally equal records.
    DeepEquals,
}

impl Identity {
    /// Creates a by-key identity.
    pub fn key(field: impl Into<FieldPath>) -> Self {
        Identity::Key(field.into())
    }

    /// Returns the data key field, if rows are identified by key.
    pub fn data_key(&self) -> Option<&FieldPath> {
        match self {
            Identity::Key(field) => Some(field),
            _ => None,
        }
    }

    /// Stringified key of a record. `None` unless rows are identified by key.
    pub fn key_of(&self, record: &Record) -> Option<String> {
        self.data_key().map(|field| record.resolve(field).to_string())
    }

    /// Returns `true` if `a` and `b` are the same row under this rule.
    pub fn same(&self, a: &RowRef, b: &RowRef) -> bool {
        match self {
            Identity::Reference => Arc::ptr_eq(a, b),
            Identity::Key(field) => a.resolve(field).to_string() == b.resolve(field).to_string(),
            Identity::DeepEquals => Arc::ptr_eq(a, b) || a == b,
        }
    }

    /// Returns the position of `row` in `rows`.
    pub fn position(&self, rows: &[RowRef], row: &RowRef) -> Option<usize> {
        rows.iter().position(|candidate| self.same(candidate, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rules() {
        let a: RowRef = Arc::new(Record::new().set("id", 1i64).set("name", "x"));
        let b: RowRef = Arc::new(Record::new().set("id", 1i64).set("name", "x"));
        let c: RowRef = Arc::new(Record::new().set("id", 1i64).set("name", "y"));

        assert!(Identity::Reference.same(&a, &a));
        assert!(!Identity::Reference.same(&a, &b));
        assert!(Identity::DeepEquals.same(&a, &b));
        assert!(!Identity::DeepEquals.same(&a, &c));
        assert!(Identity::key("id").same(&a, &c));
        assert_eq!(Identity::key("id").key_of(&c).as_deref(), Some("1"));
        assert_eq!(Identity::Reference.key_of(&c), None);
    }
}
