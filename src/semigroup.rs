//! Semigroup trait for merging validation failures
//!
//! Entry validation checks every field independently and reports all of the
//! failures together. Failures from separate checks are merged with
//! [`Semigroup::combine`], which must be associative:
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use albumswap::Semigroup;
//!
//! let first = vec!["Your Spotify ID was invalid."];
//! let second = vec!["This field is required."];
//! assert_eq!(
//!     first.combine(second),
//!     vec!["Your Spotify ID was invalid.", "This field is required."]
//! );
//! ```

use std::collections::BTreeMap;

/// A type that supports an associative binary operation
///
/// `combine` takes `self` by value; clone first if the originals are needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

// Keyed merge: values under the same key are combined, keys stay ordered.
impl<K: Ord, V: Semigroup> Semigroup for BTreeMap<K, V> {
    fn combine(mut self, other: Self) -> Self {
        for (key, value) in other {
            let merged = match self.remove(&key) {
                Some(existing) => existing.combine(value),
                None => value,
            };
            self.insert(key, merged);
        }
        self
    }
}
