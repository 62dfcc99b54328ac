//! String predicates
//!
//! Lengths are counted in characters, not bytes, so a limit of 70 admits a
//! 70-character country name regardless of its encoding.

use super::combinators::Predicate;

/// Predicate that checks a string has at least one non-whitespace character.
#[derive(Clone, Copy, Default, Debug)]
pub struct NotBlank;

impl Predicate<str> for NotBlank {
    #[inline]
    fn check(&self, value: &str) -> bool {
        !trim_space(value).is_empty()
    }
}

/// Whitespace as submitted text is trimmed: Unicode `White_Space` plus the
/// ASCII information separators `U+001C..=U+001F`.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Strip leading and trailing [`is_space`] characters.
pub fn trim_space(value: &str) -> &str {
    value.trim_matches(is_space)
}

/// Create a predicate that rejects empty and whitespace-only strings.
///
/// # Example
///
/// ```rust
/// use albumswap::predicate::*;
///
/// assert!(not_blank().check("Vibey"));
/// assert!(not_blank().check("  Loud "));
/// assert!(!not_blank().check(""));
/// assert!(!not_blank().check(" \t\n"));
/// ```
pub fn not_blank() -> NotBlank {
    NotBlank
}

/// Predicate that checks string length (in chars) is in range.
#[derive(Clone, Copy, Debug)]
pub struct LenBetween {
    min: usize,
    max: usize,
}

impl Predicate<str> for LenBetween {
    #[inline]
    fn check(&self, value: &str) -> bool {
        let len = value.chars().count();
        len >= self.min && len <= self.max
    }
}

/// Create a predicate that checks if string length is at most max.
///
/// # Example
///
/// ```rust
/// use albumswap::predicate::*;
///
/// assert!(len_max(5).check("Vibey"));
/// assert!(len_max(5).check("Pop"));
/// assert!(!len_max(5).check("Classical"));
/// ```
pub fn len_max(max: usize) -> LenBetween {
    LenBetween { min: 0, max }
}

/// Create a predicate that checks if string length is exactly len.
pub fn len_eq(len: usize) -> LenBetween {
    LenBetween { min: len, max: len }
}

/// Predicate that checks every character of a string.
#[derive(Clone, Copy, Debug)]
pub struct AllChars<F>(pub F);

impl<F> Predicate<str> for AllChars<F>
where
    F: Fn(char) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &str) -> bool {
        value.chars().all(&self.0)
    }
}

/// Create a predicate that holds when every character satisfies `f`.
///
/// An empty string satisfies it vacuously.
///
/// # Example
///
/// ```rust
/// use albumswap::predicate::*;
///
/// let alnum = all_chars(|c: char| c.is_ascii_alphanumeric());
/// assert!(alnum.check("0bxA12"));
/// assert!(!alnum.check("0b-A12"));
/// assert!(alnum.check(""));
/// ```
pub fn all_chars<F>(f: F) -> AllChars<F>
where
    F: Fn(char) -> bool + Send + Sync,
{
    AllChars(f)
}
