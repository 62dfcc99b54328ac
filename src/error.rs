//! Error types surfaced to the caller of entry validation and submission
//!
//! [`FieldErrors`] is the structured per-field error map a request layer turns
//! into a response body; it serializes as `{"field": ["message", ...]}`.
//! [`EntryError`] covers the outcomes of the one-entry-per-owner service.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::store::OwnerId;
use crate::Semigroup;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation messages grouped by field name.
///
/// Fields iterate in name order; messages for one field keep the order they
/// were recorded in.
///
/// # Example
///
/// ```
/// use albumswap::{FieldErrors, Semigroup};
///
/// let errors = FieldErrors::single("triplet", "This field is required.")
///     .combine(FieldErrors::single("album_spotify_id", "Your Spotify ID was invalid."));
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.get("triplet"), Some(&["This field is required.".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// An empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// An error map holding one message for one field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record another message for `field`.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Whether any message was recorded for `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of fields with at least one message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no field has a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names with messages, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume the map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Failure of an entry service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// The submitted entry failed validation.
    Invalid(FieldErrors),
    /// The owner already has an entry.
    AlreadyExists(OwnerId),
    /// The owner has no entry.
    NotFound(OwnerId),
    /// The storage backend could not complete the operation.
    Storage(String),
}

impl EntryError {
    /// Per-field errors, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            EntryError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::Invalid(errors) => write!(f, "invalid matching entry: {}", errors),
            EntryError::AlreadyExists(owner) => {
                write!(f, "matching entry with this user already exists ({})", owner)
            }
            EntryError::NotFound(owner) => write!(f, "no matching entry for user {}", owner),
            EntryError::Storage(reason) => write!(f, "entry storage failed: {}", reason),
        }
    }
}

impl std::error::Error for EntryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EntryError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for EntryError {
    fn from(errors: FieldErrors) -> Self {
        EntryError::Invalid(errors)
    }
}
