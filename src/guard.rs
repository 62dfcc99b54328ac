//! Record-level guard for list fields holding falsy non-list values
//!
//! Per-field list validation is skipped for absent values, so a list field
//! that arrives as `0`, `false`, `""`, `{}` or `null` could otherwise slip
//! through. [`ListFieldGuard`] checks a whole record and flags every such
//! field at once.

use serde_json::{Map, Value};

use crate::{FieldErrors, Validation};

/// A list field watched by the guard, with the message used when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedField {
    name: String,
    message: String,
}

impl GuardedField {
    /// Watch `name`, reporting `message` on failure.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Watch `name` with the message `The <label> are not in a valid list.`
    pub fn labeled(name: impl Into<String>, label: &str) -> Self {
        Self::new(name, format!("The {} are not in a valid list.", label))
    }

    /// The field key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Guard over a fixed set of list fields.
///
/// # Example
///
/// ```
/// use albumswap::guard::{GuardedField, ListFieldGuard};
/// use serde_json::json;
///
/// let guard = ListFieldGuard::new([
///     GuardedField::labeled("album_adjectives", "album adjectives"),
///     GuardedField::labeled("match_adjectives", "match adjectives"),
/// ]);
///
/// let record = json!({"album_adjectives": 0, "match_adjectives": false});
/// let errors = guard.check(record.as_object().unwrap()).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
///
/// let record = json!({"album_adjectives": [], "match_adjectives": ["Loud"]});
/// assert!(guard.check(record.as_object().unwrap()).is_success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFieldGuard {
    fields: Vec<GuardedField>,
}

impl ListFieldGuard {
    /// Guard the given fields.
    pub fn new(fields: impl IntoIterator<Item = GuardedField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// The guarded fields, in check order.
    pub fn fields(&self) -> &[GuardedField] {
        &self.fields
    }

    /// Check every guarded field of `record`; a missing key counts as null.
    pub fn check(&self, record: &Map<String, Value>) -> Validation<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            let value = record.get(&field.name).unwrap_or(&Value::Null);
            if holds_falsy_non_list(value) {
                tracing::debug!(field = %field.name, "falsy value in list field");
                errors.insert(field.name.as_str(), field.message.as_str());
            }
        }

        if errors.is_empty() {
            Validation::success(())
        } else {
            Validation::failure(errors)
        }
    }
}

/// Truthiness as JSON-decoding callers see it: null, false, zero, the empty
/// string, the empty list and the empty object are falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Falsy but not exactly the empty list.
pub fn holds_falsy_non_list(value: &Value) -> bool {
    is_falsy(value) && !matches!(value, Value::Array(items) if items.is_empty())
}
