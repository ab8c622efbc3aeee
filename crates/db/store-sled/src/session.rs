use std::{fmt, sync::Arc};

use dashmap::DashMap;
use numgen_db::{
    session::{SessionManager, StoreSession},
    traits::SequenceDatabase,
    DbError, DbResult,
};

use crate::SledSequenceDb;

/// Session manager over a registry of named sled-backed stores.
///
/// Cheaply clonable; clones share the registry.
#[derive(Clone, Debug, Default)]
pub struct SledSessionManager {
    stores: Arc<DashMap<String, Arc<SledSequenceDb>>>,
}

impl SledSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `store` reachable by sessions opened for `name`.
    pub fn register_store(&self, name: &str, store: Arc<SledSequenceDb>) {
        self.stores.insert(name.to_string(), store);
    }
}

impl SessionManager for SledSessionManager {
    fn open_session(&self, store_name: &str) -> DbResult<Box<dyn StoreSession>> {
        let db = self
            .stores
            .get(store_name)
            .ok_or_else(|| DbError::UnknownStore(store_name.to_string()))?
            .clone();
        Ok(Box::new(SledStoreSession {
            store_name: store_name.to_string(),
            db,
            manager: Arc::new(self.clone()),
        }))
    }

    fn release_session(&self, _session: Box<dyn StoreSession>) {
        // Sled sessions hold no server-side resources; dropping suffices.
    }
}

/// Session against one sled-backed store.
///
/// Sled writes are autocommitted, so a session never carries an open
/// caller transaction; host backends with real transactions report theirs
/// through the same trait.
struct SledStoreSession {
    store_name: String,
    db: Arc<SledSequenceDb>,
    manager: Arc<dyn SessionManager>,
}

impl fmt::Debug for SledStoreSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SledStoreSession")
            .field("store_name", &self.store_name)
            .finish_non_exhaustive()
    }
}

impl StoreSession for SledStoreSession {
    fn store_name(&self) -> &str {
        &self.store_name
    }

    fn sequence_db(&self) -> Arc<dyn SequenceDatabase> {
        self.db.clone()
    }

    fn has_active_transaction(&self) -> bool {
        false
    }

    fn manager(&self) -> Arc<dyn SessionManager> {
        self.manager.clone()
    }
}
