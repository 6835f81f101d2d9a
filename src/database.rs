//! Database initialization and the persistence adapter
//!
//! Every store keeps its whole state as one JSON document stored under a
//! fixed key (e.g. `order-storage`). This module sets up the embedded redb
//! file holding those documents and provides the `Repository` seam the
//! stores save through after each mutation.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, warn};

use crate::error::PersistError;

/// Table holding one JSON snapshot per store
///
/// Key: store key (e.g. "order-storage")
/// Value: JSON-serialized store state
///
/// Example:
/// - Key: "order-storage"
/// - Value: '{"orders":[...],"latestOrderNumber":10003}'
pub const TABLE_STORES: TableDefinition<&str, &str> = TableDefinition::new("stores_v1");

pub const PRODUCT_STORAGE: &str = "product-storage";
pub const ORDER_STORAGE: &str = "order-storage";
pub const MESSAGE_STORAGE: &str = "message-storage";
pub const TESTIMONIAL_STORAGE: &str = "testimonial-storage";
pub const CATEGORY_STORAGE: &str = "category-storage";
pub const SOCIAL_STORAGE: &str = "social-storage";

/// Initializes the embedded database and creates the snapshot table
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g., "storefront.db")
///
/// # Example
///
/// ```no_run
/// # use storefront::database::init_db;
/// let db = init_db("storefront.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_STORES)?;
    }
    write_txn.commit()?;

    Ok(db)
}

/// Durable home of a store's state.
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait Repository<S>: Send + Sync {
    fn load(&self) -> Result<Option<S>, PersistError>;
    fn save(&self, state: &S) -> Result<(), PersistError>;
}

/// Repository writing a store's snapshot into the redb `stores_v1` table.
pub struct RedbRepository<S> {
    db: Arc<Database>,
    key: &'static str,
    _state: PhantomData<fn() -> S>,
}

impl<S> RedbRepository<S> {
    pub fn new(db: Arc<Database>, key: &'static str) -> Self {
        Self {
            db,
            key,
            _state: PhantomData,
        }
    }

    fn read_raw(&self) -> Result<Option<String>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_STORES)?;
        let raw = table.get(self.key)?.map(|guard| guard.value().to_string());
        Ok(raw)
    }

    fn write_raw(&self, json: &str) -> Result<(), redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_STORES)?;
            table.insert(self.key, json)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl<S> Repository<S> for RedbRepository<S>
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<S>, PersistError> {
        match self.read_raw()? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &S) -> Result<(), PersistError> {
        let json = serde_json::to_string(state)?;
        self.write_raw(&json)?;
        Ok(())
    }
}

/// Repository keeping the last snapshot as JSON text in memory.
///
/// Clones share the same slot, so a test can hand one clone to a store and
/// inspect or reuse the other.
pub struct MemoryRepository<S> {
    slot: Arc<Mutex<Option<String>>>,
    _state: PhantomData<fn() -> S>,
}

impl<S> MemoryRepository<S> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            _state: PhantomData,
        }
    }

    /// Raw JSON currently stored, if any.
    pub fn snapshot(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S> Default for MemoryRepository<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for MemoryRepository<S> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            _state: PhantomData,
        }
    }
}

impl<S> Repository<S> for MemoryRepository<S>
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<S>, PersistError> {
        match self.snapshot() {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &S) -> Result<(), PersistError> {
        let json = serde_json::to_string(state)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }
}

/// A store's binding to its repository.
///
/// Save failures are logged and switch the binding to memory-only mode: the
/// store keeps working, later mutations are simply not mirrored anymore.
pub struct Persistence<S> {
    repo: Box<dyn Repository<S>>,
    key: &'static str,
    active: bool,
}

impl<S> Persistence<S> {
    pub fn new(repo: impl Repository<S> + 'static, key: &'static str) -> Self {
        Self {
            repo: Box::new(repo),
            key,
            active: true,
        }
    }

    /// Loads the saved state. Unreadable snapshots are logged and treated as absent.
    pub fn restore(&self) -> Option<S> {
        match self.repo.load() {
            Ok(Some(state)) => {
                debug!(store = self.key, "Restored persisted state");
                Some(state)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(store = self.key, error = %e, "Persisted state unreadable, starting from defaults");
                None
            }
        }
    }

    pub fn save(&mut self, state: &S) {
        if !self.active {
            return;
        }
        if let Err(e) = self.repo.save(state) {
            error!(store = self.key, error = %e, "Failed to persist state, continuing in memory only");
            self.active = false;
        }
    }

    /// False once a write has failed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}
