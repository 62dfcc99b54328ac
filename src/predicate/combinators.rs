//! Core predicate trait and logical combinators

/// A composable predicate over values of type T.
///
/// # Example
///
/// ```rust
/// use albumswap::predicate::*;
///
/// let spotify_like = PredicateExt::<str>::and(
///     len_eq(22),
///     all_chars(|c: char| c.is_ascii_alphanumeric()),
/// );
/// assert!(spotify_like.check("4aawyAB9vmqN3uQ7FjRGTy"));
/// assert!(!spotify_like.check("4aawyAB9vmqN3uQ7FjRGT!"));
/// ```
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Check if the value satisfies this predicate.
    fn check(&self, value: &T) -> bool;
}

// Blanket impl for closures
impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// Extension trait for predicate combinators.
///
/// Returns a concrete type, so a composed predicate is a plain struct with
/// no allocation.
pub trait PredicateExt<T: ?Sized>: Predicate<T> + Sized {
    /// Both predicates must hold.
    fn and<P: Predicate<T>>(self, other: P) -> And<Self, P> {
        And(self, other)
    }
}

impl<T: ?Sized, P: Predicate<T>> PredicateExt<T> for P {}

/// AND combinator - both predicates must be true.
#[derive(Clone, Copy, Debug)]
pub struct And<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for And<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) && self.1.check(value)
    }
}
