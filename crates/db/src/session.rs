//! Session boundary toward the surrounding repository.
//!
//! Callers reach the sequence store through a session that may carry an
//! open transaction of their own.  The isolation decorator in the engine
//! crate uses the session's manager to open a secondary session when the
//! increment must commit independently of the caller's transaction.

use std::sync::Arc;

use crate::{traits::SequenceDatabase, DbResult};

/// A live connection to one named store.
pub trait StoreSession: Send {
    /// Name of the store this session is connected to.
    fn store_name(&self) -> &str;

    /// Sequence records visible to this session.
    fn sequence_db(&self) -> Arc<dyn SequenceDatabase>;

    /// Whether the caller currently has a transaction open on this session.
    fn has_active_transaction(&self) -> bool;

    /// The manager that produced this session.
    fn manager(&self) -> Arc<dyn SessionManager>;
}

/// Opens and releases sessions against named stores.
pub trait SessionManager: Send + Sync {
    fn open_session(&self, store_name: &str) -> DbResult<Box<dyn StoreSession>>;

    /// Returns a session to the manager.  Must be called exactly once per
    /// opened session, on every exit path.
    fn release_session(&self, session: Box<dyn StoreSession>);
}
