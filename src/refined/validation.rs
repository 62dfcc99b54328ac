//! Validation integration for refined types

use std::fmt;

use super::{Predicate, Refined};
use crate::{FieldErrors, Validation};

impl<T, P: Predicate<T>> Refined<T, P> {
    /// Validate a value, returning a Validation result.
    pub fn validate(value: T) -> Validation<Self, P::Error> {
        Validation::from_result(Self::new(value))
    }

    /// Validate a value, reporting a failure under `field`.
    ///
    /// The predicate's error becomes the field message, so failures from
    /// several fields merge into one [`FieldErrors`].
    pub fn validate_field(value: T, field: &str) -> Validation<Self, FieldErrors>
    where
        P::Error: fmt::Display,
    {
        Self::validate(value).map_err(|error| FieldErrors::single(field, error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NonZero;

    impl Predicate<i64> for NonZero {
        type Error = &'static str;

        fn check(value: &i64) -> Result<(), Self::Error> {
            if *value != 0 {
                Ok(())
            } else {
                Err("must not be zero")
            }
        }
    }

    type NonZeroI64 = Refined<i64, NonZero>;

    #[test]
    fn test_validate() {
        assert!(NonZeroI64::validate(3).is_success());
        assert_eq!(
            NonZeroI64::validate(0).map(|n| n.into_inner()),
            Validation::Failure("must not be zero")
        );
    }

    #[test]
    fn test_validate_field_accumulates() {
        let a = NonZeroI64::validate_field(0, "left");
        let b = NonZeroI64::validate_field(0, "right");
        match a.and(b) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors.get("left"), Some(&["must not be zero".to_string()][..]));
            }
            Validation::Success(_) => panic!("Expected failure"),
        }
    }
}
