//! Validation integration for predicates

use super::combinators::Predicate;
use crate::Validation;

/// Validate a value using a predicate.
///
/// # Example
///
/// ```rust
/// use albumswap::{Validation, predicate::*};
///
/// let result = validate("English", |s: &&str| !s.is_empty(), "This field may not be blank.");
/// assert_eq!(result, Validation::success("English"));
/// ```
pub fn validate<T, E, P>(value: T, predicate: P, error: E) -> Validation<T, E>
where
    P: Predicate<T>,
{
    if predicate.check(&value) {
        Validation::success(value)
    } else {
        Validation::failure(error)
    }
}

/// Validate a value with an error factory.
///
/// Like [`validate`], but the error is built from the rejected value.
pub fn validate_with<T, E, P, F>(value: T, predicate: P, error_fn: F) -> Validation<T, E>
where
    P: Predicate<T>,
    F: FnOnce(&T) -> E,
{
    if predicate.check(&value) {
        Validation::success(value)
    } else {
        Validation::failure(error_fn(&value))
    }
}

impl<T, E> Validation<T, E> {
    /// Keep a success only if `predicate` holds for its value.
    ///
    /// A failure passes through unchanged; the predicate is not evaluated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use albumswap::{Validation, predicate::*};
    ///
    /// let country = Validation::<String, &str>::success("United Kingdom".to_string())
    ///     .ensure(|s: &String| len_max(70).check(s.as_str()), "too long");
    /// assert!(country.is_success());
    /// ```
    pub fn ensure<P>(self, predicate: P, error: E) -> Self
    where
        P: Predicate<T>,
    {
        self.and_then(|value| validate(value, predicate, error))
    }
}
