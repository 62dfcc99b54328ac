//! Refined types: validate once at the boundary, carry the guarantee in the type
//!
//! A `Refined<T, P>` can only be built by passing predicate `P`, so code that
//! receives one never re-checks it. Entry fields such as Spotify IDs are parsed
//! into refined values while the submission is validated.
//!
//! # Custom Predicates
//!
//! ```rust
//! use albumswap::refined::{Refined, Predicate};
//!
//! pub struct Uppercase;
//!
//! impl Predicate<String> for Uppercase {
//!     type Error = &'static str;
//!
//!     fn check(value: &String) -> Result<(), Self::Error> {
//!         if value.chars().all(|c| !c.is_lowercase()) {
//!             Ok(())
//!         } else {
//!             Err("must be uppercase")
//!         }
//!     }
//! }
//!
//! type Shout = Refined<String, Uppercase>;
//!
//! assert!(Shout::new("LOUD".to_string()).is_ok());
//! assert!(Shout::new("quiet".to_string()).is_err());
//! ```

mod serde_impl;
mod validation;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A predicate that constrains values of type T.
///
/// This is the *type-level* counterpart of [`crate::predicate::Predicate`]:
/// the predicate is part of the type and carries no runtime state.
pub trait Predicate<T>: Send + Sync + 'static {
    /// Error returned when the predicate fails
    type Error: Send + Sync;

    /// Check if the value satisfies the predicate
    fn check(value: &T) -> Result<(), Self::Error>;

    /// Human-readable description of what this predicate requires
    fn description() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A value of type T that is guaranteed to satisfy predicate P.
///
/// `Refined<T, P>` has the same memory layout as `T`.
pub struct Refined<T, P: Predicate<T>> {
    value: T,
    _predicate: PhantomData<P>,
}

impl<T, P: Predicate<T>> Refined<T, P> {
    /// Create a new refined value, checking the predicate.
    pub fn new(value: T) -> Result<Self, P::Error> {
        P::check(&value)?;
        Ok(Self {
            value,
            _predicate: PhantomData,
        })
    }

    /// Get a reference to the inner value.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Consume the refined value, returning the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug, P: Predicate<T>> fmt::Debug for Refined<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refined")
            .field("value", &self.value)
            .field("predicate", &P::description())
            .finish()
    }
}

impl<T: Clone, P: Predicate<T>> Clone for Refined<T, P> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _predicate: PhantomData,
        }
    }
}

impl<T: PartialEq, P: Predicate<T>> PartialEq for Refined<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, P: Predicate<T>> Eq for Refined<T, P> {}

impl<T: Hash, P: Predicate<T>> Hash for Refined<T, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T, P: Predicate<T>> AsRef<T> for Refined<T, P> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T, P: Predicate<T>> std::ops::Deref for Refined<T, P> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Display, P: Predicate<T>> fmt::Display for Refined<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Even;

    impl Predicate<i32> for Even {
        type Error = &'static str;

        fn check(value: &i32) -> Result<(), Self::Error> {
            if value % 2 == 0 {
                Ok(())
            } else {
                Err("value must be even")
            }
        }

        fn description() -> &'static str {
            "even integer"
        }
    }

    type EvenI32 = Refined<i32, Even>;

    #[test]
    fn test_new_success() {
        let result = EvenI32::new(42);
        assert_eq!(*result.unwrap().get(), 42);
    }

    #[test]
    fn test_new_failure() {
        assert_eq!(EvenI32::new(41).unwrap_err(), "value must be even");
    }

    #[test]
    fn test_into_inner_and_deref() {
        let n = EvenI32::new(42).unwrap();
        assert_eq!(*n, 42);
        assert_eq!(n.into_inner(), 42);
    }

    #[test]
    fn test_hash_dedups_equal_values() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(EvenI32::new(42).unwrap());
        set.insert(EvenI32::new(42).unwrap());
        set.insert(EvenI32::new(44).unwrap());

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_debug_names_predicate() {
        let debug = format!("{:?}", EvenI32::new(42).unwrap());
        assert!(debug.contains("Refined"));
        assert!(debug.contains("even integer"));
    }

    #[test]
    fn test_display() {
        assert_eq!(EvenI32::new(42).unwrap().to_string(), "42");
    }
}
