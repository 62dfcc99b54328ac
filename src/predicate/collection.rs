//! Collection predicates
//!
//! Implemented for slices; pass `&vec[..]` or `vec.as_slice()` for a `Vec`.

use std::collections::HashSet;
use std::hash::Hash;

use super::combinators::Predicate;

/// Predicate that checks minimum collection length.
#[derive(Clone, Copy, Debug)]
pub struct HasMinLen {
    min: usize,
}

impl<T> Predicate<[T]> for HasMinLen {
    #[inline]
    fn check(&self, value: &[T]) -> bool {
        value.len() >= self.min
    }
}

/// Create a predicate that checks if collection has at least min elements.
///
/// # Example
///
/// ```rust
/// use albumswap::predicate::*;
///
/// assert!(has_min_len(2).check(&["Pop", "Classical"][..]));
/// assert!(!has_min_len(2).check(&["Pop"][..]));
/// ```
pub fn has_min_len(min: usize) -> HasMinLen {
    HasMinLen { min }
}

/// Predicate that checks no element appears twice.
#[derive(Clone, Copy, Default, Debug)]
pub struct Distinct;

impl Distinct {
    /// Index of the first element equal to an earlier one.
    pub fn first_repeat<T: Eq + Hash>(&self, value: &[T]) -> Option<usize> {
        let mut seen = HashSet::with_capacity(value.len());
        value.iter().position(|item| !seen.insert(item))
    }
}

impl<T: Eq + Hash> Predicate<[T]> for Distinct {
    #[inline]
    fn check(&self, value: &[T]) -> bool {
        self.first_repeat(value).is_none()
    }
}

/// Create a predicate that checks elements are pairwise distinct.
///
/// Equality is exact: `"Pop"` and `"pop"` are distinct.
///
/// # Example
///
/// ```rust
/// use albumswap::predicate::*;
///
/// assert!(distinct().check(&["Pop", "pop"][..]));
/// assert!(!distinct().check(&["Pop", "Pop"][..]));
/// assert_eq!(distinct().first_repeat(&["a", "b", "a", "b"]), Some(2));
/// ```
pub fn distinct() -> Distinct {
    Distinct
}
