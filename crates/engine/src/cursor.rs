use std::{fmt, sync::Arc};

use numgen_db::{traits::SequenceDatabase, DbError, DbResult, SequenceEntry};

/// Read/advance handle over one sequence record.
///
/// Holds the snapshot last read from the store; [`advance`](Self::advance)
/// commits against that snapshot, so a concurrent writer makes the commit
/// fail with [`DbError::VersionConflict`] and the caller must
/// [`refresh`](Self::refresh) before trying again.
pub struct SequenceCursor {
    db: Arc<dyn SequenceDatabase>,
    name: String,
    entry: SequenceEntry,
}

impl fmt::Debug for SequenceCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceCursor")
            .field("name", &self.name)
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

impl SequenceCursor {
    /// Locates the sequence record by name.  `None` if no record with
    /// that name exists or is visible.
    pub fn load(db: Arc<dyn SequenceDatabase>, name: &str) -> DbResult<Option<Self>> {
        let Some(entry) = db.get_sequence(name)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            db,
            name: name.to_string(),
            entry,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The next value this sequence will issue, as of the last read.
    pub fn current_value(&self) -> i64 {
        self.entry.current_value()
    }

    pub fn increment_amount(&self) -> i64 {
        self.entry.increment_amount()
    }

    /// Re-reads the latest committed state from the store.
    pub fn refresh(&mut self) -> DbResult<()> {
        self.entry = self
            .db
            .get_sequence(&self.name)?
            .ok_or(DbError::NonExistentEntry)?;
        Ok(())
    }

    /// Commits one increment and returns the issued (pre-advance) value.
    ///
    /// The store now holds the next baseline for the following caller.
    pub fn advance(&mut self) -> DbResult<i64> {
        let issued = self.entry.current_value();
        let next = self
            .entry
            .advanced()
            .ok_or_else(|| DbError::Other(format!("sequence '{}' value overflowed", self.name)))?;
        self.db
            .compare_and_put_sequence(&self.name, &self.entry, &next)?;
        self.entry = next;
        Ok(issued)
    }
}
