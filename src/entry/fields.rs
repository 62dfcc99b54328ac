//! Scalar field rules of the matching entry
//!
//! Each rule reads one key of the decoded record and yields either the typed
//! value or a [`FieldErrors`] holding messages for that key only.

use serde_json::{Map, Value};

use super::choices::Choice;
use crate::predicate::{
    all_chars, len_eq, len_max, not_blank, trim_space, validate_with, Predicate, PredicateExt,
};
use crate::refined::{self, Refined};
use crate::{FieldErrors, Validation};

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const NOT_NULL: &str = "This field may not be null.";
pub(crate) const NOT_BLANK: &str = "This field may not be blank.";
pub(crate) const NOT_STRING: &str = "Not a valid string.";
pub(crate) const NOT_BOOLEAN: &str = "Must be a valid boolean.";

/// Message for a malformed Spotify ID.
pub const INVALID_SPOTIFY_ID: &str = "Your Spotify ID was invalid.";

/// Spotify IDs are exactly 22 ASCII letters or digits.
#[derive(Debug, Clone, Copy)]
pub struct SpotifyIdFormat;

impl refined::Predicate<String> for SpotifyIdFormat {
    type Error = &'static str;

    fn check(value: &String) -> Result<(), Self::Error> {
        let format = PredicateExt::<str>::and(
            len_eq(22),
            all_chars(|c: char| c.is_ascii_alphanumeric()),
        );
        if format.check(value.as_str()) {
            Ok(())
        } else {
            Err(INVALID_SPOTIFY_ID)
        }
    }

    fn description() -> &'static str {
        "22 character Spotify ID"
    }
}

/// A Spotify album or artist ID.
pub type SpotifyId = Refined<String, SpotifyIdFormat>;

fn fail<T>(field: &str, message: impl Into<String>) -> Validation<T, FieldErrors> {
    Validation::failure(FieldErrors::single(field, message))
}

/// Rule for a free-text field. Input is trimmed before any check.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextField {
    name: &'static str,
    required: bool,
    allow_blank: bool,
    max_len: Option<usize>,
    default: &'static str,
}

impl TextField {
    /// Must be present and non-blank.
    pub(crate) const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            allow_blank: false,
            max_len: None,
            default: "",
        }
    }

    /// May be absent or blank; absent reads as the default.
    pub(crate) const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            allow_blank: true,
            max_len: None,
            default: "",
        }
    }

    pub(crate) const fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Absent reads as `default`; a present value may not be blank.
    pub(crate) const fn defaulting_to(mut self, default: &'static str) -> Self {
        self.default = default;
        self.allow_blank = false;
        self
    }

    pub(crate) fn parse(&self, record: &Map<String, Value>) -> Validation<String, FieldErrors> {
        let text = match record.get(self.name) {
            None if self.required => return fail(self.name, REQUIRED),
            None => return Validation::success(self.default.to_string()),
            Some(Value::Null) => return fail(self.name, NOT_NULL),
            Some(Value::String(s)) => trim_space(s).to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => return fail(self.name, NOT_STRING),
        };

        let text = if self.allow_blank {
            Validation::success(text)
        } else {
            Validation::success(text).ensure(
                |s: &String| not_blank().check(s.as_str()),
                FieldErrors::single(self.name, NOT_BLANK),
            )
        };

        match self.max_len {
            Some(max) => text.and_then(|text| {
                validate_with(
                    text,
                    |s: &String| len_max(max).check(s.as_str()),
                    |_| {
                        FieldErrors::single(
                            self.name,
                            format!("Ensure this field has no more than {} characters.", max),
                        )
                    },
                )
            }),
            None => text,
        }
    }
}

/// A required Spotify ID field.
pub(crate) fn spotify_id(
    record: &Map<String, Value>,
    name: &'static str,
) -> Validation<SpotifyId, FieldErrors> {
    TextField::required(name)
        .parse(record)
        .and_then(|text| SpotifyId::validate_field(text, name))
}

/// A choice field; absent reads as `default` when one is given.
pub(crate) fn choice<C: Choice>(
    record: &Map<String, Value>,
    name: &'static str,
    default: Option<C>,
) -> Validation<C, FieldErrors> {
    let key = match record.get(name) {
        None => {
            return match default {
                Some(choice) => Validation::success(choice),
                None => fail(name, REQUIRED),
            }
        }
        Some(Value::Null) => return fail(name, NOT_NULL),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    match C::from_key(&key) {
        Some(choice) => Validation::success(choice),
        None => fail(name, format!("\"{}\" is not a valid choice.", key)),
    }
}

const TRUE_WORDS: &[&str] = &[
    "t", "T", "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON", "1",
];
const FALSE_WORDS: &[&str] = &[
    "f", "F", "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF", "0",
];

/// Read a boolean from JSON booleans, the numbers 1 and 0, or the usual
/// yes/no words.
fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) if TRUE_WORDS.contains(&s.as_str()) => Some(true),
        Value::String(s) if FALSE_WORDS.contains(&s.as_str()) => Some(false),
        _ => None,
    }
}

/// A required boolean field.
pub(crate) fn boolean(record: &Map<String, Value>, name: &'static str) -> Validation<bool, FieldErrors> {
    match record.get(name) {
        None => fail(name, REQUIRED),
        Some(Value::Null) => fail(name, NOT_NULL),
        Some(value) => match as_boolean(value) {
            Some(b) => Validation::success(b),
            None => fail(name, NOT_BOOLEAN),
        },
    }
}
