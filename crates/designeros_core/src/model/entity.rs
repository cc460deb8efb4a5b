//! Contract shared by every persisted panel entity.
//!
//! # Invariants
//! - `id()` never changes after construction.
//! - `apply_patch` only touches mutable fields.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Opaque entity identifier, unique within one collection.
pub type EntityId = String;

/// An entity owned by an `EntityStore` and persisted as one collection.
pub trait StoredEntity: Clone + Serialize + DeserializeOwned {
    /// Fields supplied by the user when the entity is created.
    type Draft;
    /// Partial update of the entity's mutable fields.
    type Patch;

    /// Durable storage key holding the whole collection.
    const STORAGE_KEY: &'static str;
    /// Short kind label used in log events.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Builds a new entity from a fresh id and creation fields.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    fn apply_patch(&mut self, patch: Self::Patch);

    /// Fixed default collection used when nothing valid is stored.
    fn seed_collection() -> Vec<Self>;

    /// Checks per-entity invariants on data loaded from storage.
    fn validate(&self) -> Result<(), String> {
        if self.id().trim().is_empty() {
            return Err(format!("{} with empty id", Self::KIND));
        }
        Ok(())
    }
}

/// Generates an id that does not collide with any id in `existing`.
pub fn fresh_entity_id<E: StoredEntity>(existing: &[E]) -> EntityId {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if existing.iter().all(|entity| entity.id() != candidate) {
            return candidate;
        }
    }
}
