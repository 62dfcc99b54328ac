//! Predicate combinators for composable validation logic
//!
//! Validators in this crate are written as ordered lists of small predicates
//! rather than ad-hoc boolean expressions. A predicate answers one yes/no
//! question about a value; `and` builds bigger questions from smaller
//! ones.
//!
//! # Example
//!
//! ```rust
//! use albumswap::predicate::*;
//!
//! let items = ["Vocals", "Guitar", "Drums"];
//! assert!(distinct().check(&items[..]));
//! assert!(has_min_len(2).check(&items[..]));
//! assert!(items.iter().all(|s| not_blank().check(*s)));
//! ```
//!
//! # Integration with Validation
//!
//! ```rust
//! use albumswap::{Validation, predicate::*};
//!
//! let result = Validation::<&str, &str>::success("Talking")
//!     .ensure(|s: &&str| len_max(15).check(*s), "Ensure this field has no more than 15 characters.");
//! assert_eq!(result, Validation::success("Talking"));
//! ```

mod collection;
mod combinators;
mod string;
mod validation;

pub use combinators::{And, Predicate, PredicateExt};

pub use string::{
    all_chars, is_space, len_eq, len_max, not_blank, trim_space, AllChars, LenBetween, NotBlank,
};

pub use collection::{distinct, has_min_len, Distinct, HasMinLen};

pub use validation::{validate, validate_with};
