//! Validator for list-of-strings fields
//!
//! Several matching-entry fields hold a list of strings picked by the user:
//! adjectives, musical elements, preferred macrogenres. They all share one
//! validator, [`StringListValidator`], configured per field with a rejection
//! message, an optional [`Vocabulary`] and an optional minimum length.
//!
//! Validation runs in two stages:
//!
//! 1. **Structure.** The value must be a sequence of strings, every string
//!    must contain a non-whitespace character, no string may appear twice and
//!    the sequence must meet the minimum length. Any violation is reported with
//!    the configured message.
//! 2. **Vocabulary.** When a vocabulary is configured, the first element that
//!    is not in it is reported by name.
//!
//! An accepted value is returned exactly as given; trimming and
//! de-duplication only happen inside the checks.
//!
//! # Example
//!
//! ```
//! use albumswap::string_list::{StringListValidator, Vocabulary, RejectionKind};
//! use serde_json::json;
//!
//! let validator = StringListValidator::new("Your match macrogenre was invalid.")
//!     .with_field_name("match macrogenre")
//!     .with_choices(Vocabulary::from_labeled_pairs([
//!         ("Pop", "Pop"),
//!         ("Classical", "Classical"),
//!         ("Other", "Other"),
//!     ]))
//!     .with_min_items(2);
//!
//! let value = json!(["Pop", "Other"]);
//! assert_eq!(validator.validate(&value), Ok(&value));
//!
//! let too_few = validator.validate(&json!(["Pop"])).unwrap_err();
//! assert_eq!(too_few.kind(), RejectionKind::BelowMinimum);
//! assert_eq!(too_few.to_string(), "Your match macrogenre was invalid.");
//!
//! let outsider = validator.validate(&json!(["Pop", "Polka"])).unwrap_err();
//! assert_eq!(
//!     outsider.to_string(),
//!     "Your choice \"Polka\" is not one of the allowed choices in match macrogenre."
//! );
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::predicate::{distinct, has_min_len, not_blank, Predicate};
use crate::{FieldErrors, Validation};

/// Field name used in choice messages when none is configured.
pub const DEFAULT_FIELD_NAME: &str = "this field";

/// Choices exactly as they were configured.
///
/// Kept alongside the normalized set so that two validators can be compared
/// by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawChoices {
    /// Plain allowed values.
    Values(Vec<String>),
    /// `(value, label)` pairs; only the value is allowed in a list.
    LabeledPairs(Vec<(String, String)>),
}

/// An allowed set of list elements.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    raw: RawChoices,
    members: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from plain values.
    ///
    /// ```
    /// use albumswap::string_list::Vocabulary;
    ///
    /// let decades = Vocabulary::from_values(["60s", "70s"]);
    /// assert!(decades.contains("70s"));
    /// assert!(!decades.contains("80s"));
    /// ```
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_raw(RawChoices::Values(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// Build a vocabulary from `(value, label)` pairs. Labels are kept for
    /// display and ignored by membership checks.
    pub fn from_labeled_pairs<I, V, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        Self::from_raw(RawChoices::LabeledPairs(
            pairs
                .into_iter()
                .map(|(value, label)| (value.into(), label.into()))
                .collect(),
        ))
    }

    /// Normalize configured choices into a membership set.
    pub fn from_raw(raw: RawChoices) -> Self {
        let members = match &raw {
            RawChoices::Values(values) => values.iter().cloned().collect(),
            RawChoices::LabeledPairs(pairs) => {
                pairs.iter().map(|(value, _)| value.clone()).collect()
            }
        };
        Self { raw, members }
    }

    /// Whether `value` is an allowed element.
    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(value)
    }

    /// Number of configured choices.
    pub fn len(&self) -> usize {
        match &self.raw {
            RawChoices::Values(values) => values.len(),
            RawChoices::LabeledPairs(pairs) => pairs.len(),
        }
    }

    /// True when no choices were configured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allowed values in configuration order.
    pub fn values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match &self.raw {
            RawChoices::Values(values) => Box::new(values.iter().map(String::as_str)),
            RawChoices::LabeledPairs(pairs) => {
                Box::new(pairs.iter().map(|(value, _)| value.as_str()))
            }
        }
    }

    /// Display label for `value`; plain values are their own label.
    pub fn label(&self, value: &str) -> Option<&str> {
        match &self.raw {
            RawChoices::Values(values) => values
                .iter()
                .find(|candidate| candidate.as_str() == value)
                .map(String::as_str),
            RawChoices::LabeledPairs(pairs) => pairs
                .iter()
                .find(|(candidate, _)| candidate == value)
                .map(|(_, label)| label.as_str()),
        }
    }

    /// The choices as configured.
    pub fn raw(&self) -> &RawChoices {
        &self.raw
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Vocabulary {}

/// Which structural rule a rejected value broke.
///
/// Every fault is reported with the validator's single configured message;
/// this type is for callers that want the cause programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralFault {
    /// The value is not a sequence.
    NotASequence,
    /// The element at `index` is not a string.
    NonStringElement {
        /// Position of the element.
        index: usize,
    },
    /// The element at `index` is empty or whitespace only.
    BlankElement {
        /// Position of the element.
        index: usize,
    },
    /// The element at `index` repeats an earlier element.
    DuplicateElement {
        /// Position of the repeat.
        index: usize,
    },
    /// The sequence is shorter than the configured minimum.
    BelowMinimum {
        /// Actual length.
        len: usize,
        /// Configured minimum.
        min: usize,
    },
}

impl fmt::Display for StructuralFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralFault::NotASequence => f.write_str("value is not a list"),
            StructuralFault::NonStringElement { index } => {
                write!(f, "element {} is not a string", index)
            }
            StructuralFault::BlankElement { index } => write!(f, "element {} is blank", index),
            StructuralFault::DuplicateElement { index } => {
                write!(f, "element {} is a duplicate", index)
            }
            StructuralFault::BelowMinimum { len, min } => {
                write!(f, "{} elements given, at least {} required", len, min)
            }
        }
    }
}

/// Category of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Shape, type, blank or duplicate element.
    MalformedShape,
    /// Well-formed but shorter than the minimum.
    BelowMinimum,
    /// Well-formed but holds an element outside the vocabulary.
    DisallowedChoice,
}

/// A rejected list value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRejection {
    /// The value failed a structural rule.
    Malformed {
        /// The validator's configured message.
        message: String,
        /// The rule that failed.
        fault: StructuralFault,
    },
    /// The value holds an element outside the vocabulary.
    DisallowedChoice {
        /// The first element not in the vocabulary.
        element: String,
        /// The configured field name.
        field_name: String,
    },
}

impl ListRejection {
    /// Category of this rejection.
    pub fn kind(&self) -> RejectionKind {
        match self {
            ListRejection::Malformed {
                fault: StructuralFault::BelowMinimum { .. },
                ..
            } => RejectionKind::BelowMinimum,
            ListRejection::Malformed { .. } => RejectionKind::MalformedShape,
            ListRejection::DisallowedChoice { .. } => RejectionKind::DisallowedChoice,
        }
    }

    /// The structural rule that failed, for malformed values.
    pub fn fault(&self) -> Option<StructuralFault> {
        match self {
            ListRejection::Malformed { fault, .. } => Some(*fault),
            ListRejection::DisallowedChoice { .. } => None,
        }
    }
}

impl fmt::Display for ListRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListRejection::Malformed { message, .. } => f.write_str(message),
            ListRejection::DisallowedChoice {
                element,
                field_name,
            } => write!(
                f,
                "Your choice \"{}\" is not one of the allowed choices in {}.",
                element, field_name
            ),
        }
    }
}

impl std::error::Error for ListRejection {}

/// One structural check, evaluated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StructuralRule {
    NonBlankItems,
    DistinctItems,
    MinItems(usize),
}

impl StructuralRule {
    fn check(&self, items: &[&str]) -> Result<(), StructuralFault> {
        match *self {
            StructuralRule::NonBlankItems => {
                match items.iter().position(|item| !not_blank().check(*item)) {
                    Some(index) => Err(StructuralFault::BlankElement { index }),
                    None => Ok(()),
                }
            }
            StructuralRule::DistinctItems => match distinct().first_repeat(items) {
                Some(index) => Err(StructuralFault::DuplicateElement { index }),
                None => Ok(()),
            },
            StructuralRule::MinItems(min) => {
                if has_min_len(min).check(items) {
                    Ok(())
                } else {
                    Err(StructuralFault::BelowMinimum {
                        len: items.len(),
                        min,
                    })
                }
            }
        }
    }
}

/// Serializable configuration for a [`StringListValidator`].
///
/// ```
/// use albumswap::string_list::{ListValidatorConfig, StringListValidator};
///
/// let config: ListValidatorConfig = serde_json::from_str(
///     r#"{"message": "Bad genres.", "choices": [["Pop", "Pop"], ["Other", "Other"]], "min_items": 2}"#,
/// ).unwrap();
/// let validator = StringListValidator::from_config(config);
/// assert_eq!(validator.field_name(), "this field");
/// assert_eq!(validator.min_items(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListValidatorConfig {
    /// Message for structural failures.
    pub message: String,
    /// Name used in choice messages.
    #[serde(default = "default_field_name")]
    pub field_name: String,
    /// Allowed elements, as plain values or `[value, label]` pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<RawChoices>,
    /// Minimum number of elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
}

fn default_field_name() -> String {
    DEFAULT_FIELD_NAME.to_string()
}

/// Validates that a value is a list of unique, non-blank strings.
///
/// A validator is configured once and then only read, so it can be shared
/// between threads and reused for any number of values.
///
/// Two validators are equal when their message, field name, minimum and
/// configured choices (in order, labels included) are equal.
#[derive(Debug, Clone)]
pub struct StringListValidator {
    message: String,
    field_name: String,
    vocabulary: Option<Vocabulary>,
    min_items: Option<usize>,
    rules: Vec<StructuralRule>,
}

impl StringListValidator {
    /// A validator with no vocabulary and no minimum.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            vocabulary: None,
            min_items: None,
            rules: vec![StructuralRule::NonBlankItems, StructuralRule::DistinctItems],
        }
    }

    /// Build a validator from its serializable configuration.
    pub fn from_config(config: ListValidatorConfig) -> Self {
        let mut validator = Self::new(config.message).with_field_name(config.field_name);
        if let Some(choices) = config.choices {
            validator = validator.with_choices(Vocabulary::from_raw(choices));
        }
        if let Some(min) = config.min_items {
            validator = validator.with_min_items(min);
        }
        validator
    }

    /// The configuration this validator was built from.
    pub fn to_config(&self) -> ListValidatorConfig {
        ListValidatorConfig {
            message: self.message.clone(),
            field_name: self.field_name.clone(),
            choices: self.vocabulary.as_ref().map(|v| v.raw().clone()),
            min_items: self.min_items,
        }
    }

    /// Set the name used in choice messages.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Restrict elements to `vocabulary`. An empty vocabulary restricts nothing.
    pub fn with_choices(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Require at least `min` elements. Zero means no minimum.
    pub fn with_min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self.rules
            .retain(|rule| !matches!(rule, StructuralRule::MinItems(_)));
        if min > 0 {
            self.rules.push(StructuralRule::MinItems(min));
        }
        self
    }

    /// Message for structural failures.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Name used in choice messages.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Configured minimum, if any.
    pub fn min_items(&self) -> Option<usize> {
        self.min_items
    }

    /// Configured vocabulary, if any.
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Validate a decoded value, returning it unchanged when accepted.
    pub fn validate<'v>(&self, value: &'v Value) -> Result<&'v Value, ListRejection> {
        let items = string_items(value).map_err(|fault| self.reject(self.malformed(fault)))?;
        self.check(&items).map_err(|rejection| self.reject(rejection))?;
        Ok(value)
    }

    /// Validate an already typed list, returning it unchanged when accepted.
    ///
    /// ```
    /// use albumswap::string_list::StringListValidator;
    ///
    /// let validator = StringListValidator::new("Your album musical elements are invalid.");
    /// let elements = vec!["Vocals".to_string(), " Guitar ".to_string()];
    /// assert!(validator.validate_strings(&elements).is_ok());
    ///
    /// let repeated = vec!["Vocals", "Vocals"];
    /// assert!(validator.validate_strings(&repeated).is_err());
    /// ```
    pub fn validate_strings<'v, S: AsRef<str>>(
        &self,
        items: &'v [S],
    ) -> Result<&'v [S], ListRejection> {
        let borrowed: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        self.check(&borrowed)
            .map_err(|rejection| self.reject(rejection))?;
        Ok(items)
    }

    /// Validate a decoded value and report a rejection under `field`.
    ///
    /// On success the accepted elements are returned as owned strings.
    pub fn validate_field(&self, field: &str, value: &Value) -> Validation<Vec<String>, FieldErrors> {
        match self.validate(value) {
            Ok(accepted) => Validation::success(owned_strings(accepted)),
            Err(rejection) => Validation::failure(FieldErrors::single(field, rejection.to_string())),
        }
    }

    fn check(&self, items: &[&str]) -> Result<(), ListRejection> {
        for rule in &self.rules {
            rule.check(items).map_err(|fault| self.malformed(fault))?;
        }

        if let Some(vocabulary) = self.vocabulary.as_ref().filter(|v| !v.is_empty()) {
            if let Some(element) = items.iter().find(|item| !vocabulary.contains(item)) {
                return Err(ListRejection::DisallowedChoice {
                    element: (*element).to_string(),
                    field_name: self.field_name.clone(),
                });
            }
        }

        Ok(())
    }

    fn malformed(&self, fault: StructuralFault) -> ListRejection {
        ListRejection::Malformed {
            message: self.message.clone(),
            fault,
        }
    }

    fn reject(&self, rejection: ListRejection) -> ListRejection {
        tracing::debug!(
            field = %self.field_name,
            kind = ?rejection.kind(),
            cause = ?rejection.fault(),
            "list value rejected"
        );
        rejection
    }
}

impl PartialEq for StringListValidator {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.field_name == other.field_name
            && self.min_items == other.min_items
            && self.vocabulary == other.vocabulary
    }
}

impl Eq for StringListValidator {}

fn string_items(value: &Value) -> Result<Vec<&str>, StructuralFault> {
    let Value::Array(values) = value else {
        return Err(StructuralFault::NotASequence);
    };
    values
        .iter()
        .enumerate()
        .map(|(index, element)| {
            element
                .as_str()
                .ok_or(StructuralFault::NonStringElement { index })
        })
        .collect()
}

fn owned_strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn greetings() -> StringListValidator {
        StringListValidator::new("blah").with_choices(Vocabulary::from_labeled_pairs([
            ("hi", "greeting"),
            ("bye", "farewell"),
        ]))
    }

    #[test]
    fn accepts_distinct_non_blank_strings() {
        let validator = StringListValidator::new("blah");
        for value in [json!([]), json!(["a", "b", "c"]), json!(["a"])] {
            assert_eq!(validator.validate(&value), Ok(&value));
        }
    }

    #[test]
    fn rejects_non_string_element() {
        let err = StringListValidator::new("blah")
            .validate(&json!(["a", 2]))
            .unwrap_err();
        assert_eq!(err.to_string(), "blah");
        assert_eq!(err.fault(), Some(StructuralFault::NonStringElement { index: 1 }));
    }

    #[test]
    fn rejects_mapping_and_scalars() {
        let validator = StringListValidator::new("blah");
        for value in [json!({}), json!("a"), json!(null), json!(3), json!(true)] {
            let err = validator.validate(&value).unwrap_err();
            assert_eq!(err.fault(), Some(StructuralFault::NotASequence));
            assert_eq!(err.kind(), RejectionKind::MalformedShape);
        }
    }

    #[test]
    fn rejects_duplicates_by_exact_value() {
        let validator = StringListValidator::new("blah");
        let err = validator.validate(&json!(["a", "a"])).unwrap_err();
        assert_eq!(err.fault(), Some(StructuralFault::DuplicateElement { index: 1 }));
        assert!(validator.validate(&json!(["a", "A"])).is_ok());
        // trimmed forms are not compared
        assert!(validator.validate(&json!(["a", " a"])).is_ok());
    }

    #[test]
    fn rejects_blank_elements() {
        let validator = StringListValidator::new("blah");
        for value in [json!([""]), json!(["  "]), json!(["ok", "\t\n"])] {
            let err = validator.validate(&value).unwrap_err();
            assert_eq!(err.to_string(), "blah");
            assert!(matches!(
                err.fault(),
                Some(StructuralFault::BlankElement { .. })
            ));
        }
    }

    #[test]
    fn enforces_minimum_length() {
        let validator = StringListValidator::new("blah").with_min_items(3);
        let err = validator.validate(&json!(["a", "b"])).unwrap_err();
        assert_eq!(err.kind(), RejectionKind::BelowMinimum);
        assert_eq!(err.to_string(), "blah");
        assert!(validator.validate(&json!(["a", "b", "c"])).is_ok());
        assert!(validator.validate(&json!(["a", "b", "c", "d", "e"])).is_ok());
    }

    #[test]
    fn zero_minimum_allows_empty() {
        let validator = StringListValidator::new("blah").with_min_items(0);
        assert!(validator.validate(&json!([])).is_ok());
    }

    #[test]
    fn choices_accept_members_and_empty() {
        let validator = greetings();
        for value in [json!([]), json!(["hi"]), json!(["hi", "bye"])] {
            assert!(validator.validate(&value).is_ok());
        }
    }

    #[test]
    fn choices_name_first_offender() {
        let err = greetings().validate(&json!(["a", "b"])).unwrap_err();
        assert_eq!(err.kind(), RejectionKind::DisallowedChoice);
        assert_eq!(
            err,
            ListRejection::DisallowedChoice {
                element: "a".to_string(),
                field_name: "this field".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Your choice \"a\" is not one of the allowed choices in this field."
        );
    }

    #[test]
    fn labels_are_not_members() {
        let err = greetings().validate(&json!(["greeting"])).unwrap_err();
        assert_eq!(err.kind(), RejectionKind::DisallowedChoice);
    }

    #[test]
    fn structure_is_checked_before_vocabulary() {
        let err = greetings().validate(&json!(["a", "a"])).unwrap_err();
        assert_eq!(err.kind(), RejectionKind::MalformedShape);
    }

    #[test]
    fn empty_vocabulary_restricts_nothing() {
        let validator =
            StringListValidator::new("blah").with_choices(Vocabulary::from_values(Vec::<String>::new()));
        assert!(validator.validate(&json!(["anything"])).is_ok());
    }

    #[test]
    fn typed_input_matches_decoded_input() {
        let validator = greetings().with_min_items(1);
        assert!(validator.validate_strings(&["hi"]).is_ok());
        assert_eq!(
            validator.validate_strings::<&str>(&[]).unwrap_err().kind(),
            RejectionKind::BelowMinimum
        );
        assert_eq!(
            validator.validate_strings(&["hi", "yo"]).unwrap_err().kind(),
            RejectionKind::DisallowedChoice
        );
    }

    #[test]
    fn validate_field_reports_under_field() {
        let result = greetings().validate_field("match_adjectives", &json!(["nope"]));
        match result {
            Validation::Failure(errors) => assert_eq!(
                errors.get("match_adjectives"),
                Some(
                    &["Your choice \"nope\" is not one of the allowed choices in this field."
                        .to_string()][..]
                )
            ),
            Validation::Success(v) => panic!("Expected failure, got {:?}", v),
        }

        assert_eq!(
            greetings().validate_field("match_adjectives", &json!(["bye"])),
            Validation::Success(vec!["bye".to_string()])
        );
    }

    #[test]
    fn vocabulary_keeps_order_and_labels() {
        let vocabulary = Vocabulary::from_labeled_pairs([("00s", "2000s"), ("90s", "90s")]);
        assert_eq!(vocabulary.values().collect::<Vec<_>>(), vec!["00s", "90s"]);
        assert_eq!(vocabulary.label("00s"), Some("2000s"));
        assert_eq!(vocabulary.label("2000s"), None);
        assert_eq!(vocabulary.len(), 2);
    }

    fn configured(message: &str, field: &str, min: usize, choices: &[&str]) -> StringListValidator {
        StringListValidator::new(message)
            .with_field_name(field)
            .with_min_items(min)
            .with_choices(Vocabulary::from_values(choices.iter().copied()))
    }

    #[test]
    fn equality_follows_configuration() {
        let base = configured("m", "f", 2, &["x", "y"]);
        assert_eq!(base, configured("m", "f", 2, &["x", "y"]));
        assert_ne!(base, configured("other", "f", 2, &["x", "y"]));
        assert_ne!(base, configured("m", "other", 2, &["x", "y"]));
        assert_ne!(base, configured("m", "f", 3, &["x", "y"]));
        assert_ne!(base, configured("m", "f", 2, &["y", "x"]));
        assert_ne!(base, configured("m", "f", 2, &["x"]));
    }

    #[test]
    fn config_round_trip() {
        let validator = configured("m", "f", 2, &["x", "y"]);
        let json = serde_json::to_string(&validator.to_config()).unwrap();
        let config: ListValidatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(StringListValidator::from_config(config), validator);
    }

    #[traced_test]
    #[test]
    fn rejection_is_logged() {
        let _ = configured("m", "album adjectives", 0, &["x"]).validate(&json!(["z"]));
        assert!(logs_contain("list value rejected"));
        assert!(logs_contain("DisallowedChoice"));
    }
}
