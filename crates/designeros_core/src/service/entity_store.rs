//! Generic entity store with write-through persistence.
//!
//! # Responsibility
//! - Own the ordered, most-recent-first collection for one entity type.
//! - Persist the full collection after every change.
//!
//! # Invariants
//! - Every mutation that changes the collection performs exactly one write.
//! - A failed write never rolls back the in-memory change; it is reported as
//!   a warning on the returned `StoreWrite`.
//! - Unknown ids on update/delete are silent no-ops with no write.
//! - Created entities are prepended; updates never reorder.

use crate::model::entity::{fresh_entity_id, StoredEntity};
use crate::model::note::Note;
use crate::model::reminder::{Reminder, ReminderPatch};
use crate::repo::collection_gateway::{
    CollectionGateway, CollectionOrigin, GatewayError, GatewayResult,
};
use crate::repo::kv_repo::KeyValueStore;
use log::{debug, warn};

/// Outcome of a store mutation.
///
/// `storage_warning` is set when the in-memory change succeeded but could not
/// be persisted.
#[derive(Debug)]
#[must_use]
pub struct StoreWrite<T> {
    pub value: T,
    pub storage_warning: Option<GatewayError>,
}

impl<T> StoreWrite<T> {
    fn unchanged(value: T) -> Self {
        Self {
            value,
            storage_warning: None,
        }
    }

    /// Whether durable storage reflects the change.
    pub fn is_durable(&self) -> bool {
        self.storage_warning.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// In-memory collection backed by a `CollectionGateway`.
pub struct EntityStore<E, S> {
    gateway: CollectionGateway<E, S>,
    items: Vec<E>,
    origin: CollectionOrigin,
    init_warning: Option<GatewayError>,
}

pub type NoteStore<S> = EntityStore<Note, S>;
pub type ReminderStore<S> = EntityStore<Reminder, S>;

impl<E: StoredEntity, S: KeyValueStore> EntityStore<E, S> {
    /// Loads the collection under `E::STORAGE_KEY`.
    ///
    /// When nothing valid is stored, the seed collection is used and written
    /// back immediately so later loads are stable.
    pub fn open(store: S) -> Self {
        Self::with_gateway(CollectionGateway::new(store))
    }

    pub fn with_gateway(gateway: CollectionGateway<E, S>) -> Self {
        let loaded = gateway.load_or_seed();
        let mut store = Self {
            gateway,
            items: loaded.items,
            origin: loaded.origin,
            init_warning: None,
        };
        if store.origin.is_seeded() {
            store.init_warning = store.persist("seed").err();
        }
        store
    }

    /// Current collection, most recently created first.
    pub fn list(&self) -> &[E] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Where the collection came from when the store was opened.
    pub fn origin(&self) -> CollectionOrigin {
        self.origin
    }

    /// Failure to persist the seed collection on open, if any.
    pub fn init_warning(&self) -> Option<&GatewayError> {
        self.init_warning.as_ref()
    }

    /// Prepends a new entity built from `draft` and persists.
    pub fn create(&mut self, draft: E::Draft) -> StoreWrite<E> {
        let entity = E::from_draft(fresh_entity_id(&self.items), draft);
        self.items.insert(0, entity.clone());
        self.commit("create", entity)
    }

    /// Applies `patch` to the entity with `id` and persists.
    ///
    /// Returns `None` without writing when no entity has `id`.
    pub fn update(&mut self, id: &str, patch: E::Patch) -> StoreWrite<Option<E>> {
        let Some(entity) = self.items.iter_mut().find(|item| item.id() == id) else {
            debug!(
                "event=entity_update module=service status=skipped kind={} reason=unknown_id",
                E::KIND
            );
            return StoreWrite::unchanged(None);
        };
        entity.apply_patch(patch);
        let updated = entity.clone();
        self.commit("update", Some(updated))
    }

    /// Removes the entity with `id` and persists.
    ///
    /// Returns whether an entity was removed; unknown ids do not write.
    pub fn delete(&mut self, id: &str) -> StoreWrite<bool> {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            debug!(
                "event=entity_delete module=service status=skipped kind={} reason=unknown_id",
                E::KIND
            );
            return StoreWrite::unchanged(false);
        };
        self.items.remove(index);
        self.commit("delete", true)
    }

    fn commit<T>(&self, op: &'static str, value: T) -> StoreWrite<T> {
        StoreWrite {
            value,
            storage_warning: self.persist(op).err(),
        }
    }

    fn persist(&self, op: &'static str) -> GatewayResult<()> {
        match self.gateway.write(&self.items) {
            Ok(()) => {
                debug!(
                    "event=collection_write module=service status=ok op={op} kind={} key={} count={}",
                    E::KIND,
                    self.gateway.key(),
                    self.items.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=collection_write module=service status=error op={op} kind={} key={} error={err}",
                    E::KIND,
                    self.gateway.key()
                );
                Err(err)
            }
        }
    }
}

impl<S: KeyValueStore> EntityStore<Reminder, S> {
    /// Flips the completed flag of the reminder with `id`.
    pub fn toggle_completed(&mut self, id: &str) -> StoreWrite<Option<Reminder>> {
        let Some(completed) = self.get(id).map(|reminder| reminder.completed) else {
            return StoreWrite::unchanged(None);
        };
        self.update(id, ReminderPatch::completed(!completed))
    }
}
