//! Property-based tests for the list-of-strings validator

use albumswap::{RejectionKind, StringListValidator, StructuralFault, Vocabulary};
use proptest::prelude::*;
use serde_json::{json, Value};

fn plain() -> StringListValidator {
    StringListValidator::new("Your album musical elements are invalid.")
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,11}"
}

fn distinct_words(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(word(), 0..max).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_distinct_non_blank_lists_are_accepted(items in distinct_words(12)) {
        let value = json!(items);
        prop_assert_eq!(plain().validate(&value), Ok(&value));
    }

    #[test]
    fn prop_accepted_value_is_returned_unchanged(items in distinct_words(8)) {
        let result = plain().validate_strings(&items);
        prop_assert_eq!(result, Ok(&items[..]));
    }

    #[test]
    fn prop_any_repeat_is_rejected(
        items in distinct_words(8).prop_filter("need one item", |v| !v.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut with_repeat = items.clone();
        with_repeat.push(items[pick.index(items.len())].clone());

        let rejection = plain().validate(&json!(with_repeat)).unwrap_err();
        prop_assert_eq!(rejection.kind(), RejectionKind::MalformedShape);
        let duplicate = matches!(
            rejection.fault(),
            Some(StructuralFault::DuplicateElement { .. })
        );
        prop_assert!(duplicate);
        prop_assert_eq!(rejection.to_string(), "Your album musical elements are invalid.");
    }

    #[test]
    fn prop_whitespace_only_element_is_rejected(
        items in distinct_words(6),
        blank in "[ \t\n\u{1c}-\u{1f}]{0,4}",
    ) {
        let mut with_blank = items;
        with_blank.push(blank);
        prop_assert!(plain().validate(&json!(with_blank)).is_err());
    }

    #[test]
    fn prop_minimum_is_exact(items in distinct_words(6), min in 0usize..6) {
        let validator = plain().with_min_items(min);
        let result = validator.validate_strings(&items);
        if items.len() >= min {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), RejectionKind::BelowMinimum);
        }
    }

    #[test]
    fn prop_validation_is_idempotent(items in prop::collection::vec(word(), 0..6)) {
        let validator = plain().with_min_items(2);
        let value = json!(items);
        prop_assert_eq!(validator.validate(&value), validator.validate(&value));
    }

    #[test]
    fn prop_first_outsider_is_named(
        allowed in distinct_words(6),
        outsider in "[0-9]{3}",
    ) {
        let validator = plain()
            .with_field_name("album adjectives")
            .with_choices(Vocabulary::from_values(allowed.iter().cloned()));

        let mut items = allowed.clone();
        items.push(outsider.clone());

        if allowed.is_empty() {
            // an empty vocabulary restricts nothing
            prop_assert!(validator.validate_strings(&items).is_ok());
        } else {
            let rejection = validator.validate_strings(&items).unwrap_err();
            prop_assert_eq!(
                rejection.to_string(),
                format!(
                    "Your choice \"{}\" is not one of the allowed choices in album adjectives.",
                    outsider
                )
            );
        }
    }

    #[test]
    fn prop_non_string_elements_are_malformed(n in any::<i64>()) {
        let rejection = plain().validate(&json!(["Vocals", n])).unwrap_err();
        prop_assert_eq!(rejection.fault(), Some(StructuralFault::NonStringElement { index: 1 }));
    }
}

#[test]
fn test_scalars_and_mappings_are_not_sequences() {
    for value in [json!("Vocals"), json!(3), json!(true), json!({"a": "b"}), Value::Null] {
        let rejection = plain().validate(&value).unwrap_err();
        assert_eq!(rejection.fault(), Some(StructuralFault::NotASequence));
    }
}

#[test]
fn test_information_separators_count_as_blank() {
    for blank in ["\u{1c}", "\u{1f}\u{1e}", " \u{1d}\t"] {
        let rejection = plain().validate(&json!(["Vocals", blank])).unwrap_err();
        assert_eq!(rejection.fault(), Some(StructuralFault::BlankElement { index: 1 }));
    }
}
