//! # albumswap
//!
//! Validation core for an album-exchange matching service.
//!
//! Users submit one *matching entry*: an album they recommend, two artists,
//! how much they want to talk, and what they hope to receive. This crate
//! checks a decoded submission, reports every problem at once keyed by field,
//! and keeps at most one entry per user.
//!
//! ## Pieces
//!
//! - [`StringListValidator`]: the reusable validator for list-of-strings
//!   fields (structure, then vocabulary).
//! - [`guard::ListFieldGuard`]: record-level check catching list fields that
//!   hold falsy non-list values.
//! - [`entry::EntrySchema`]: every field rule of a matching entry, accumulated
//!   with [`Validation`].
//! - [`store::EntryService`]: create, retrieve and delete with the
//!   one-entry-per-owner rule.
//!
//! ## Quick Example
//!
//! ```rust
//! use albumswap::{StringListValidator, Validation};
//! use serde_json::json;
//!
//! let elements = StringListValidator::new("Your album musical elements are invalid.");
//!
//! let result = elements.validate_field("album_musical_elements", &json!(["Vocals", "Vocals"]));
//! match result {
//!     Validation::Success(items) => println!("accepted {:?}", items),
//!     Validation::Failure(errors) => {
//!         assert_eq!(
//!             errors.get("album_musical_elements").unwrap(),
//!             &["Your album musical elements are invalid.".to_string()]
//!         );
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod entry;
pub mod error;
pub mod guard;
pub mod predicate;
pub mod refined;
pub mod semigroup;
pub mod store;
pub mod string_list;
pub mod testing;
pub mod validation;

// Re-exports
pub use error::{EntryError, FieldErrors, NON_FIELD_ERRORS};
pub use refined::Refined;
pub use semigroup::Semigroup;
pub use string_list::{
    ListRejection, ListValidatorConfig, RejectionKind, StringListValidator, StructuralFault,
    Vocabulary,
};
pub use validation::{ValidateAll, Validation};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::entry::{EntrySchema, MatchingEntry};
    pub use crate::error::{EntryError, FieldErrors};
    pub use crate::guard::{GuardedField, ListFieldGuard};
    pub use crate::semigroup::Semigroup;
    pub use crate::store::{EntryService, EntryStore, InMemoryEntryStore, OwnerId};
    pub use crate::string_list::{ListRejection, StringListValidator, Vocabulary};
    pub use crate::validation::Validation;
}
