//! Testing utilities for entry validation
//!
//! Includes a builder for matching-entry payloads, assertion macros for
//! [`Validation`](crate::Validation) and list rejections, and property-based
//! testing support behind the `proptest` feature.
//!
//! # Examples
//!
//! ## EntryFixture Builder
//!
//! ```rust
//! use albumswap::entry::EntrySchema;
//! use albumswap::testing::EntryFixture;
//! use albumswap::{assert_field_errors, assert_success};
//! use serde_json::json;
//!
//! let schema = EntrySchema::new();
//! assert_success!(schema.validate(&EntryFixture::valid().build()));
//!
//! let payload = EntryFixture::valid().with("triplet", json!("maybe")).build();
//! assert_field_errors!(schema.validate(&payload), "triplet" => ["Must be a valid boolean."]);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use albumswap::{Validation, assert_success, assert_failure};
//!
//! let success = Validation::<_, Vec<String>>::success(42);
//! assert_success!(success);
//!
//! let failure = Validation::<i32, _>::failure(vec!["error".to_string()]);
//! assert_failure!(failure);
//! ```

use serde_json::{json, Map, Value};

/// Builder for matching-entry payloads.
///
/// Starts from a payload that passes validation; each call to `with` or
/// `without` changes one key.
///
/// # Example
///
/// ```rust
/// use albumswap::testing::EntryFixture;
/// use serde_json::json;
///
/// let payload = EntryFixture::valid()
///     .with("match_macrogenre", json!(["Pop"]))
///     .without("album_description")
///     .build();
///
/// assert_eq!(payload["match_macrogenre"], json!(["Pop"]));
/// assert!(payload.get("album_description").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFixture {
    record: Map<String, Value>,
}

impl EntryFixture {
    /// A payload holding every required field with an accepted value.
    pub fn valid() -> Self {
        let record = json!({
            "album_spotify_id": "4aawyAB9vmqN3uQ7FjRGTy",
            "album_macrogenre": "Indie, Indie Pop, Emo and Pop Punk",
            "album_description": "Jangly guitars and sad lyrics.",
            "artist_1_spotify_id": "0OdUWJ0sBjDrqHygGUXeCF",
            "artist_2_spotify_id": "3WrFJ7ztbogyGnTHbHJFl2",
            "talkativity_preference": "Rec Only",
            "minds_talking": "Medium OK",
            "minds_not_talking": "Totally OK",
            "adventurous": 2,
            "person_above_adventure": -1,
            "triplet": false,
            "match_macrogenre": ["Electronic and Dance", "Pop"],
            "match_instrumental": true,
            "match_description": "Something to dance to."
        });
        match record {
            Value::Object(record) => Self { record },
            _ => Self::empty(),
        }
    }

    /// A payload with no keys.
    pub fn empty() -> Self {
        Self { record: Map::new() }
    }

    /// Set `key` to `value`.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.record.insert(key.to_string(), value);
        self
    }

    /// Remove `key`.
    pub fn without(mut self, key: &str) -> Self {
        self.record.remove(key);
        self
    }

    /// The finished payload.
    pub fn build(self) -> Value {
        Value::Object(self.record)
    }
}

/// Assert that a validation succeeds.
///
/// This macro will panic if the validation is a `Failure`.
///
/// # Example
///
/// ```rust
/// use albumswap::{Validation, assert_success};
///
/// let val = Validation::<_, Vec<String>>::success(42);
/// assert_success!(val);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
///
/// This macro will panic if the validation is a `Success`.
///
/// # Example
///
/// ```rust
/// use albumswap::{Validation, assert_failure};
///
/// let val = Validation::<i32, _>::failure(vec!["error".to_string()]);
/// assert_failure!(val);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a validation fails with specific errors.
///
/// This macro will panic if the validation is a `Success` or if the errors
/// don't match the expected errors.
///
/// # Example
///
/// ```rust
/// use albumswap::{Validation, assert_validation_errors};
///
/// let val = Validation::<i32, _>::failure(vec!["error1", "error2"]);
/// assert_validation_errors!(val, vec!["error1", "error2"]);
/// ```
#[macro_export]
macro_rules! assert_validation_errors {
    ($validation:expr, $expected:expr) => {
        match $validation {
            $crate::Validation::Failure(errors) => {
                assert_eq!(errors, $expected);
            }
            $crate::Validation::Success(v) => {
                panic!(
                    "Expected Failure with errors {:?}, got Success: {:?}",
                    $expected, v
                );
            }
        }
    };
}

/// Assert that a validation fails with exactly the given messages for each
/// listed field. Fields not listed are not checked.
///
/// # Example
///
/// ```rust
/// use albumswap::{FieldErrors, Validation, assert_field_errors};
///
/// let val = Validation::<(), _>::failure(
///     FieldErrors::single("album_country", "Ensure this field has no more than 70 characters."),
/// );
/// assert_field_errors!(val, "album_country" => ["Ensure this field has no more than 70 characters."]);
/// ```
#[macro_export]
macro_rules! assert_field_errors {
    ($validation:expr, $($field:expr => [$($message:expr),* $(,)?]),+ $(,)?) => {
        match $validation {
            $crate::Validation::Failure(errors) => {
                $(
                    let expected: &[&str] = &[$($message),*];
                    match $crate::FieldErrors::get(&errors, $field) {
                        Some(actual) => assert_eq!(
                            actual,
                            expected,
                            "messages for field {:?}",
                            $field
                        ),
                        None => panic!("Expected errors for field {:?}, got: {}", $field, errors),
                    }
                )+
            }
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a list validator rejected a value with the given kind.
///
/// # Example
///
/// ```rust
/// use albumswap::{StringListValidator, RejectionKind, assert_rejected};
/// use serde_json::json;
///
/// let validator = StringListValidator::new("Invalid list.").with_min_items(2);
/// assert_rejected!(validator.validate(&json!(["Pop"])), RejectionKind::BelowMinimum);
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($result:expr, $kind:expr) => {
        match $result {
            Err(rejection) => {
                assert_eq!(
                    $crate::ListRejection::kind(&rejection),
                    $kind,
                    "rejection was: {}",
                    rejection
                );
            }
            Ok(v) => {
                panic!("Expected rejection {:?}, got acceptance: {:?}", $kind, v);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use crate::Validation;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<T, E> Arbitrary for Validation<T, E>
where
    T: Arbitrary + 'static,
    E: Arbitrary + 'static,
    T::Strategy: 'static,
    E::Strategy: 'static,
{
    type Parameters = (T::Parameters, E::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (t_params, e_params) = args;
        prop_oneof![
            any_with::<T>(t_params).prop_map(Validation::success),
            any_with::<E>(e_params).prop_map(Validation::failure),
        ]
        .boxed()
    }
}

/// Strategy producing well-formed Spotify IDs.
#[cfg(feature = "proptest")]
pub fn spotify_id() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{22}"
}

/// Strategy producing lists of distinct adjectives from the fixed vocabulary.
#[cfg(feature = "proptest")]
pub fn adjective_list() -> impl Strategy<Value = Vec<String>> {
    let all = crate::entry::ADJECTIVE_CHOICES;
    proptest::sample::subsequence(all, 0..=all.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}
