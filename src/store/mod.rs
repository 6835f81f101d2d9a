//! Persisted state stores
//!
//! Each store owns one collection, mirrors every mutation to its
//! `Persistence` binding, and logs what it changed.

pub mod content;
pub mod entity;
pub mod messages;
pub mod orders;
pub mod products;
pub mod testimonials;

pub use content::{CategoryStore, SocialStore};
pub use entity::{EntityStore, Record};
pub use messages::MessageStore;
pub use orders::{OrderState, OrderStore};
pub use products::{CatalogQuery, CategoryFilter, ProductStore, SortOrder};
pub use testimonials::TestimonialStore;

use tracing::debug;

use crate::database::{Persistence, Repository};
use crate::model::Id;

/// A persisted `EntityStore`.
pub struct ResourceStore<T: Record> {
    entities: EntityStore<T>,
    persistence: Persistence<EntityStore<T>>,
}

impl<T: Record> ResourceStore<T> {
    /// Restores the collection from `repo`, or starts from `seed` when
    /// nothing usable has been saved yet.
    pub fn load(
        repo: impl Repository<EntityStore<T>> + 'static,
        key: &'static str,
        seed: impl FnOnce() -> Vec<T>,
    ) -> Self {
        let persistence = Persistence::new(repo, key);
        let entities = persistence
            .restore()
            .unwrap_or_else(|| EntityStore::new(seed()));
        Self {
            entities,
            persistence,
        }
    }

    pub fn all(&self) -> &[T] {
        self.entities.all()
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.entities.get(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn set_all(&mut self, records: Vec<T>) {
        self.entities.set_all(records);
        debug!(store = self.persistence.key(), count = self.entities.len(), "Replaced collection");
        self.persist();
    }

    pub fn add(&mut self, draft: T::Draft) -> T {
        let record = self.entities.add(draft);
        debug!(store = self.persistence.key(), id = record.id(), "Added record");
        self.persist();
        record
    }

    pub fn update(&mut self, id: Id, patch: T::Patch) -> Option<T> {
        let updated = self.entities.update(id, patch)?;
        debug!(store = self.persistence.key(), id, "Updated record");
        self.persist();
        Some(updated)
    }

    pub fn remove(&mut self, id: Id) -> Option<T> {
        let removed = self.entities.remove(id)?;
        debug!(store = self.persistence.key(), id, "Removed record");
        self.persist();
        Some(removed)
    }

    /// False once a snapshot write has failed and the store runs in memory only.
    pub fn is_persistent(&self) -> bool {
        self.persistence.is_active()
    }

    fn persist(&mut self) {
        self.persistence.save(&self.entities);
    }
}
