//! Validation type for accumulating errors
//!
//! `Validation` is similar to `Result`, but combining two failed validations
//! keeps both failures instead of stopping at the first one. Entry validation
//! relies on this to report every bad field of a submission in one response.
//!
//! # Examples
//!
//! ```
//! use albumswap::Validation;
//!
//! let spotify_id = Validation::<&str, Vec<&str>>::failure(vec!["Your Spotify ID was invalid."]);
//! let triplet = Validation::<bool, Vec<&str>>::failure(vec!["This field is required."]);
//!
//! assert_eq!(
//!     spotify_id.and(triplet),
//!     Validation::Failure(vec!["Your Spotify ID was invalid.", "This field is required."])
//! );
//! ```
//!
//! Tuples of validations are combined with [`ValidateAll`]:
//!
//! ```
//! use albumswap::{Validation, validation::ValidateAll};
//!
//! let result = (
//!     Validation::<_, Vec<&str>>::success("Pop"),
//!     Validation::<_, Vec<&str>>::success(true),
//!     Validation::<_, Vec<&str>>::success(2),
//! ).validate_all();
//!
//! assert_eq!(result, Validation::Success(("Pop", true, 2)));
//! ```

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with accumulated errors
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value (must implement `Semigroup` for accumulation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Create a validation from a Result
    ///
    /// # Examples
    ///
    /// ```
    /// use albumswap::Validation;
    ///
    /// let v = Validation::from_result(Err::<i32, _>("not a list"));
    /// assert_eq!(v, Validation::Failure("not a list"));
    /// ```
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }

    /// Convert this validation to a Result
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Transform the success value if present
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the error value if present
    ///
    /// # Examples
    ///
    /// ```
    /// use albumswap::Validation;
    ///
    /// let v = Validation::<i32, _>::failure("Not a valid string.");
    /// let keyed = v.map_err(|message| ("album_country", message));
    /// assert_eq!(keyed, Validation::Failure(("album_country", "Not a valid string.")));
    /// ```
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }

    /// Chain a dependent validation
    ///
    /// The function only runs when this validation succeeded; a failure is
    /// passed through untouched.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> Validation<U, E>,
    {
        match self {
            Validation::Success(value) => f(value),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine all validations in a tuple
    ///
    /// Delegates to [`ValidateAll`], implemented for tuples of up to 9 validations.
    pub fn all<V>(validations: V) -> Self
    where
        V: ValidateAll<E, Output = T>,
    {
        validations.validate_all()
    }

    /// Combine two validations, accumulating errors using the Semigroup instance
    ///
    /// If both validations are successful, returns a success with a tuple of both values.
    /// If either or both fail, accumulates the errors using `Semigroup::combine`.
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) => Validation::Failure(e),
            (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }
}

/// Trait for combining multiple validations in a tuple
///
/// Implemented for tuples of `Validation`s with heterogeneous success types
/// and a shared error type.
pub trait ValidateAll<E: Semigroup> {
    /// The output type when all validations succeed
    type Output;

    /// Combine all validations, accumulating errors
    fn validate_all(self) -> Validation<Self::Output, E>;
}

// Each element is inspected once; failures are folded left to right so the
// merged error keeps tuple order.
macro_rules! impl_validate_all {
    ($($T:ident),+) => {
        impl<E: Semigroup, $($T),+> ValidateAll<E> for ($(Validation<$T, E>,)+) {
            type Output = ($($T,)+);

            #[allow(non_snake_case)]
            fn validate_all(self) -> Validation<Self::Output, E> {
                let ($($T,)+) = self;
                let mut failure: Option<E> = None;
                $(
                    let $T = match $T {
                        Validation::Success(value) => Some(value),
                        Validation::Failure(error) => {
                            failure = Some(match failure.take() {
                                Some(acc) => acc.combine(error),
                                None => error,
                            });
                            None
                        }
                    };
                )+
                if let Some(error) = failure {
                    return Validation::Failure(error);
                }
                match ($($T,)+) {
                    ($(Some($T),)+) => Validation::Success(($($T,)+)),
                    _ => unreachable!("every element succeeded when no failure was recorded"),
                }
            }
        }
    };
}

impl_validate_all!(T1);
impl_validate_all!(T1, T2);
impl_validate_all!(T1, T2, T3);
impl_validate_all!(T1, T2, T3, T4);
impl_validate_all!(T1, T2, T3, T4, T5);
impl_validate_all!(T1, T2, T3, T4, T5, T6);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
