use std::sync::Arc;

use numgen_db::session::{SessionManager, StoreSession};
use parking_lot::Mutex;
use tracing::*;

use crate::{GenerateError, SequenceGenerator};

/// Decorator that commits the increment outside the caller's transaction.
///
/// If the increment ran inside the caller's transaction and that
/// transaction later rolled back, the counter would revert while the
/// number stays handed out, silently reissuing it to somebody else.  When
/// the caller's session has a transaction open, the increment is
/// delegated to a fresh secondary session instead, which is released on
/// every exit path.
#[derive(Debug)]
pub struct OutOfTransactionGenerator<G> {
    inner: G,
    /// Serializes secondary-session open/release for this generator
    /// instance (one per store), not process-wide.
    session_gate: Mutex<()>,
}

impl<G> OutOfTransactionGenerator<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            session_gate: Mutex::new(()),
        }
    }
}

/// Releases the held session back to its manager on drop, so conflict
/// exhaustion, fatal errors and panics all return it exactly once.
struct SessionGuard {
    manager: Arc<dyn SessionManager>,
    session: Option<Box<dyn StoreSession>>,
}

impl SessionGuard {
    fn open(manager: Arc<dyn SessionManager>, store_name: &str) -> Result<Self, numgen_db::DbError> {
        let session = manager.open_session(store_name)?;
        Ok(Self {
            manager,
            session: Some(session),
        })
    }

    fn session(&self) -> &dyn StoreSession {
        // Present from open() until drop.
        self.session.as_deref().expect("session already released")
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            self.manager.release_session(session);
        }
    }
}

impl<G: SequenceGenerator> SequenceGenerator for OutOfTransactionGenerator<G> {
    fn next_value(&self, session: &dyn StoreSession, name: &str) -> Result<i64, GenerateError> {
        if !session.has_active_transaction() {
            return self.inner.next_value(session, name);
        }

        let _gate = self.session_gate.lock();
        debug!(%name, store = session.store_name(), "caller transaction active, incrementing on a secondary session");
        let secondary = SessionGuard::open(session.manager(), session.store_name())
            .map_err(|e| GenerateError::failed(name, e))?;
        self.inner.next_value(secondary.session(), name)
    }
}
