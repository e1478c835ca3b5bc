//! Dynamic record

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::FieldPath;
use super::Value;
use super::value::NULL;
use crate::error::FieldError;

/// A dynamic table record.
///
/// Records hold field values as a `HashMap<String, Value>` and serialize as a
/// plain JSON object. Nested records are reached with dotted
/// [`FieldPath`]s through [`Record::resolve`].
///
/// # Example
///
/// ```
/// use gridstate_lib::model::Record;
///
/// let record = Record::new()
///     .set("name", "Contoso")
///     .set("revenue", 1_000_000i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Contoso"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the top-level field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given top-level field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Resolves a dotted path.
    ///
    /// Walks nested records by name and lists by index. Any missing segment
    /// resolves to [`Value::Null`].
    pub fn resolve(&self, path: &FieldPath) -> &Value {
        if path.is_simple() {
            return self.fields.get(path.as_str()).unwrap_or(&NULL);
        }

        let mut segments = path.segments();
        let Some(first) = segments.next() else {
            return &NULL;
        };
        let mut current = self.fields.get(first).unwrap_or(&NULL);
        for segment in segments {
            current = match current {
                Value::Record(nested) => nested.fields.get(segment).unwrap_or(&NULL),
                Value::List(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| items.get(i))
                    .unwrap_or(&NULL),
                _ => return &NULL,
            };
        }
        current
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a float field value. Integers widen.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)),
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets a nested record field value.
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r.as_ref())),
            Some(other) => Err(FieldError::type_mismatch(field, "record", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Record {
        Record::new()
            .set("id", 7i64)
            .set("name", "Ada")
            .set("address", Record::new().set("city", "Ghent"))
            .set("tags", vec!["vip", "eu"])
    }

    #[test]
    fn test_resolve_nested_path() {
        let record = customer();
        assert_eq!(record.resolve(&"address.city".into()), &Value::from("Ghent"));
        assert_eq!(record.resolve(&"tags.1".into()), &Value::from("eu"));
    }

    #[test]
    fn test_resolve_missing_is_null() {
        let record = customer();
        assert!(record.resolve(&"address.zip".into()).is_null());
        assert!(record.resolve(&"name.first".into()).is_null());
        assert!(record.resolve(&"nope".into()).is_null());
    }

    #[test]
    fn test_typed_getters() {
        let record = customer();
        assert_eq!(record.get_int("id").unwrap(), Some(7));
        assert_eq!(record.get_float("id").unwrap(), Some(7.0));
        assert!(matches!(record.get_int("name"), Err(FieldError::TypeMismatch { .. })));
        assert!(matches!(record.get_bool("missing"), Err(FieldError::Missing { .. })));
        assert!(record.get_record("address").unwrap().is_some());
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = customer();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"name\":\"Ada\""));
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
