//! Scriptable store and session doubles for engine tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU32, Ordering},
        Arc,
    },
};

use numgen_db::{
    session::{SessionManager, StoreSession},
    traits::SequenceDatabase,
    DbError, DbResult, SequenceEntry,
};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct StubState {
    entries: HashMap<String, SequenceEntry>,
    conflicts_remaining: u32,
    commit_failure: Option<DbError>,
    cas_calls: u32,
}

/// In-memory store with injectable conflicts and commit failures.
#[derive(Debug, Default)]
pub(crate) struct StubDb {
    state: Mutex<StubState>,
}

impl StubDb {
    pub(crate) fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_entry(name: &str, entry: SequenceEntry) -> Arc<Self> {
        let db = Self::default();
        db.state.lock().entries.insert(name.to_string(), entry);
        Arc::new(db)
    }

    /// The next `count` commits fail with a version conflict.
    pub(crate) fn inject_conflicts(&self, count: u32) {
        self.state.lock().conflicts_remaining = count;
    }

    /// All further commits fail with `err`.
    pub(crate) fn fail_commits_with(&self, err: DbError) {
        self.state.lock().commit_failure = Some(err);
    }

    pub(crate) fn cas_calls(&self) -> u32 {
        self.state.lock().cas_calls
    }

    pub(crate) fn delete(&self, name: &str) {
        self.state.lock().entries.remove(name);
    }
}

impl SequenceDatabase for StubDb {
    fn get_sequence(&self, name: &str) -> DbResult<Option<SequenceEntry>> {
        Ok(self.state.lock().entries.get(name).cloned())
    }

    fn put_sequence(&self, name: &str, entry: &SequenceEntry) -> DbResult<()> {
        self.state
            .lock()
            .entries
            .insert(name.to_string(), entry.clone());
        Ok(())
    }

    fn compare_and_put_sequence(
        &self,
        name: &str,
        expected: &SequenceEntry,
        new: &SequenceEntry,
    ) -> DbResult<()> {
        let mut state = self.state.lock();
        state.cas_calls += 1;
        if let Some(err) = state.commit_failure.clone() {
            return Err(err);
        }
        if state.conflicts_remaining > 0 {
            state.conflicts_remaining -= 1;
            return Err(DbError::VersionConflict);
        }
        match state.entries.get(name) {
            Some(current) if current == expected => {
                state.entries.insert(name.to_string(), new.clone());
                Ok(())
            }
            _ => Err(DbError::VersionConflict),
        }
    }
}

#[derive(Debug, Default)]
struct StubManagerInner {
    opened: AtomicU32,
    released: AtomicU32,
    fail_open: AtomicBool,
}

/// Session manager double that counts opens and releases.
#[derive(Clone, Debug)]
pub(crate) struct StubManager {
    db: Arc<StubDb>,
    inner: Arc<StubManagerInner>,
}

impl StubManager {
    pub(crate) fn new(db: Arc<StubDb>) -> Self {
        Self {
            db,
            inner: Arc::new(StubManagerInner::default()),
        }
    }

    /// A caller-held session; secondary sessions opened through the
    /// manager never report an active transaction.
    pub(crate) fn session(&self, in_transaction: bool) -> StubSession {
        StubSession {
            db: self.db.clone(),
            in_transaction,
            manager: self.clone(),
        }
    }

    pub(crate) fn fail_opens(&self) {
        self.inner.fail_open.store(true, Ordering::SeqCst);
    }

    pub(crate) fn opened(&self) -> u32 {
        self.inner.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn released(&self) -> u32 {
        self.inner.released.load(Ordering::SeqCst)
    }
}

impl SessionManager for StubManager {
    fn open_session(&self, _store_name: &str) -> DbResult<Box<dyn StoreSession>> {
        if self.inner.fail_open.load(Ordering::SeqCst) {
            return Err(DbError::Io("session open failed".to_string()));
        }
        self.inner.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.session(false)))
    }

    fn release_session(&self, _session: Box<dyn StoreSession>) {
        self.inner.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub(crate) struct StubSession {
    db: Arc<StubDb>,
    in_transaction: bool,
    manager: StubManager,
}

impl StoreSession for StubSession {
    fn store_name(&self) -> &str {
        "stub"
    }

    fn sequence_db(&self) -> Arc<dyn SequenceDatabase> {
        self.db.clone()
    }

    fn has_active_transaction(&self) -> bool {
        self.in_transaction
    }

    fn manager(&self) -> Arc<dyn SessionManager> {
        Arc::new(self.manager.clone())
    }
}
