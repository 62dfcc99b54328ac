//! Owner-keyed storage of matching entries
//!
//! Each owner holds at most one entry. [`EntryService`] enforces that rule
//! and validates submissions before they reach an [`EntryStore`].
//!
//! # Example
//!
//! ```
//! use albumswap::store::{EntryService, InMemoryEntryStore, OwnerId};
//! use albumswap::EntryError;
//! use serde_json::json;
//!
//! let service = EntryService::new(InMemoryEntryStore::new());
//! let owner = OwnerId::new(7);
//!
//! assert_eq!(service.retrieve(owner), Err(EntryError::NotFound(owner)));
//!
//! let err = service.create(owner, &json!({})).unwrap_err();
//! assert!(err.field_errors().unwrap().contains("album_spotify_id"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry::{EntrySchema, MatchingEntry};
use crate::EntryError;

/// Identifier of the user owning an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Wrap a raw user id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw user id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored entry together with its owner.
///
/// Serializes flat, with the owner under `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedEntry {
    /// The owning user.
    #[serde(rename = "user")]
    pub owner: OwnerId,
    /// The entry itself.
    #[serde(flatten)]
    pub entry: MatchingEntry,
}

/// Persistence for matching entries, keyed by owner.
pub trait EntryStore {
    /// Whether `owner` already has an entry.
    fn exists_for_owner(&self, owner: OwnerId) -> Result<bool, EntryError>;

    /// Store `entry`, failing with [`EntryError::AlreadyExists`] when the
    /// owner has one.
    fn insert(&self, entry: OwnedEntry) -> Result<(), EntryError>;

    /// Fetch the owner's entry.
    fn get(&self, owner: OwnerId) -> Result<Option<OwnedEntry>, EntryError>;

    /// Remove and return the owner's entry.
    fn remove(&self, owner: OwnerId) -> Result<Option<OwnedEntry>, EntryError>;
}

/// Process-local store backed by a locked map.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<HashMap<OwnerId, OwnedEntry>>,
}

impl InMemoryEntryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize, EntryError> {
        self.read(|entries| entries.len())
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> Result<bool, EntryError> {
        self.read(HashMap::is_empty)
    }

    fn read<R>(&self, f: impl FnOnce(&HashMap<OwnerId, OwnedEntry>) -> R) -> Result<R, EntryError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(f(&entries))
    }

    fn write<R>(
        &self,
        f: impl FnOnce(&mut HashMap<OwnerId, OwnedEntry>) -> R,
    ) -> Result<R, EntryError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        Ok(f(&mut entries))
    }
}

fn poisoned() -> EntryError {
    tracing::warn!("entry store lock poisoned");
    EntryError::Storage("entry store lock poisoned".to_string())
}

impl EntryStore for InMemoryEntryStore {
    fn exists_for_owner(&self, owner: OwnerId) -> Result<bool, EntryError> {
        self.read(|entries| entries.contains_key(&owner))
    }

    fn insert(&self, entry: OwnedEntry) -> Result<(), EntryError> {
        let owner = entry.owner;
        self.write(|entries| {
            if entries.contains_key(&owner) {
                return Err(EntryError::AlreadyExists(owner));
            }
            entries.insert(owner, entry);
            Ok(())
        })?
    }

    fn get(&self, owner: OwnerId) -> Result<Option<OwnedEntry>, EntryError> {
        self.read(|entries| entries.get(&owner).cloned())
    }

    fn remove(&self, owner: OwnerId) -> Result<Option<OwnedEntry>, EntryError> {
        self.write(|entries| entries.remove(&owner))
    }
}

/// Create, retrieve and delete entries, one per owner.
#[derive(Debug)]
pub struct EntryService<S> {
    store: S,
    schema: EntrySchema,
}

impl<S: EntryStore> EntryService<S> {
    /// A service over `store` with the standard schema.
    pub fn new(store: S) -> Self {
        Self::with_schema(store, EntrySchema::new())
    }

    /// A service over `store` with a custom schema.
    pub fn with_schema(store: S, schema: EntrySchema) -> Self {
        Self { store, schema }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and store a new entry for `owner`.
    ///
    /// An owner who already has an entry is refused before the submission
    /// is validated.
    pub fn create(&self, owner: OwnerId, input: &Value) -> Result<OwnedEntry, EntryError> {
        if self.store.exists_for_owner(owner)? {
            tracing::info!(%owner, "entry already exists");
            return Err(EntryError::AlreadyExists(owner));
        }

        let entry = self.schema.validate(input).into_result().map_err(|errors| {
            tracing::info!(%owner, fields = errors.len(), "entry submission invalid");
            EntryError::Invalid(errors)
        })?;

        let owned = OwnedEntry { owner, entry };
        self.store.insert(owned.clone())?;
        tracing::info!(%owner, "entry created");
        Ok(owned)
    }

    /// The entry owned by `owner`.
    pub fn retrieve(&self, owner: OwnerId) -> Result<OwnedEntry, EntryError> {
        self.store
            .get(owner)?
            .ok_or(EntryError::NotFound(owner))
    }

    /// Delete the entry owned by `owner`, returning it.
    pub fn delete(&self, owner: OwnerId) -> Result<OwnedEntry, EntryError> {
        let removed = self.store.remove(owner)?.ok_or(EntryError::NotFound(owner))?;
        tracing::info!(%owner, "entry deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn submission() -> Value {
        json!({
            "album_spotify_id": "4aawyAB9vmqN3uQ7FjRGTy",
            "album_macrogenre": "Pop",
            "album_description": "Bright and catchy.",
            "artist_1_spotify_id": "0OdUWJ0sBjDrqHygGUXeCF",
            "artist_2_spotify_id": "3WrFJ7ztbogyGnTHbHJFl2",
            "talkativity_preference": "Networking",
            "minds_talking": "Not OK",
            "minds_not_talking": "Totally OK",
            "adventurous": 0,
            "person_above_adventure": 2,
            "triplet": true,
            "match_macrogenre": ["Pop", "Classical"],
            "match_instrumental": false,
            "match_description": "Something to run to.",
            "user": 99,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn one_entry_per_owner() {
        let service = EntryService::new(InMemoryEntryStore::new());
        let owner = OwnerId::new(1);

        let created = service.create(owner, &submission()).unwrap();
        assert_eq!(created.owner, owner);
        assert_eq!(
            service.create(owner, &submission()),
            Err(EntryError::AlreadyExists(owner))
        );
        assert_eq!(service.store().len().unwrap(), 1);
    }

    #[test]
    fn existing_owner_is_refused_before_validation() {
        let service = EntryService::new(InMemoryEntryStore::new());
        let owner = OwnerId::new(2);
        service.create(owner, &submission()).unwrap();
        assert_eq!(
            service.create(owner, &json!({})),
            Err(EntryError::AlreadyExists(owner))
        );
    }

    #[test]
    fn invalid_submission_stores_nothing() {
        let service = EntryService::new(InMemoryEntryStore::new());
        let mut input = submission();
        input["match_macrogenre"] = json!(["Pop"]);
        let err = service.create(OwnerId::new(3), &input).unwrap_err();
        assert!(err.field_errors().unwrap().contains("match_macrogenre"));
        assert!(service.store().is_empty().unwrap());
    }

    #[test]
    fn retrieve_and_delete() {
        let service = EntryService::new(InMemoryEntryStore::new());
        let owner = OwnerId::new(4);
        assert_eq!(service.delete(owner), Err(EntryError::NotFound(owner)));

        let created = service.create(owner, &submission()).unwrap();
        assert_eq!(service.retrieve(owner).unwrap(), created);
        assert_eq!(service.delete(owner).unwrap(), created);
        assert_eq!(service.retrieve(owner), Err(EntryError::NotFound(owner)));
        service.create(owner, &submission()).unwrap();
    }

    #[test]
    fn owned_entry_serializes_flat() {
        let service = EntryService::new(InMemoryEntryStore::new());
        let created = service.create(OwnerId::new(5), &submission()).unwrap();
        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["user"], json!(5));
        assert_eq!(json["album_macrogenre"], json!("Pop"));
        let back: OwnedEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, created);
    }

    #[traced_test]
    #[test]
    fn create_and_delete_are_logged() {
        let service = EntryService::new(InMemoryEntryStore::new());
        let owner = OwnerId::new(6);
        service.create(owner, &submission()).unwrap();
        service.delete(owner).unwrap();
        assert!(logs_contain("entry created"));
        assert!(logs_contain("entry deleted"));
    }
}
