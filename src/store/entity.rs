//! Generic entity store
//!
//! An ordered collection of records keyed by numeric id. New ids follow the
//! watermark rule: one more than the highest id currently present, or 1
//! when empty. The watermark is derived from the live collection, so it
//! moves back down when the highest records are deleted.

use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

use crate::model::Id;

/// A record type managed by `EntityStore`.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Field name of the collection inside the persisted snapshot.
    const COLLECTION: &'static str;

    /// Whether new records go to the front of the list.
    const NEWEST_FIRST: bool = false;

    type Draft;
    type Patch;

    fn id(&self) -> Id;

    /// Builds the full record from its assigned id and creation payload.
    fn from_draft(id: Id, draft: Self::Draft) -> Self;

    /// Merges a partial edit. Must not touch the id.
    fn apply(&mut self, patch: Self::Patch);
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<T> {
    records: Vec<T>,
}

impl<T: Record> EntityStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Records in display order.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.records.iter().find(|r| predicate(r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn next_id(&self) -> Id {
        self.records.iter().map(Record::id).max().unwrap_or(0) + 1
    }

    /// Replaces the whole collection verbatim.
    pub fn set_all(&mut self, records: Vec<T>) {
        self.records = records;
    }

    pub fn add(&mut self, draft: T::Draft) -> T {
        let record = T::from_draft(self.next_id(), draft);
        if T::NEWEST_FIRST {
            self.records.insert(0, record.clone());
        } else {
            self.records.push(record.clone());
        }
        record
    }

    /// Applies `patch` to the record with `id`. Returns the updated record,
    /// or `None` when no such record exists.
    pub fn update(&mut self, id: Id, patch: T::Patch) -> Option<T> {
        let record = self.records.iter_mut().find(|r| r.id() == id)?;
        record.apply(patch);
        Some(record.clone())
    }

    /// Removes the record with `id`, returning it if it was present.
    pub fn remove(&mut self, id: Id) -> Option<T> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }
}

impl<T: Record> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// Snapshots are written as `{ "<collection>": [...] }`.
impl<T: Record> Serialize for EntityStore<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(T::COLLECTION, &self.records)?;
        map.end()
    }
}

impl<'de, T: Record> Deserialize<'de> for EntityStore<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor<T>(PhantomData<T>);

        impl<'de, T: Record> Visitor<'de> for CollectionVisitor<T> {
            type Value = EntityStore<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a map with a `{}` list", T::COLLECTION)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut records = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == T::COLLECTION {
                        records = Some(map.next_value::<Vec<T>>()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                let records = records.ok_or_else(|| de::Error::missing_field(T::COLLECTION))?;
                Ok(EntityStore::new(records))
            }
        }

        deserializer.deserialize_map(CollectionVisitor(PhantomData))
    }
}
