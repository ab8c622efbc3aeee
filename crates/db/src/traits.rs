//! Trait definitions for the low level sequence store interface.

use crate::{DbResult, SequenceEntry};

/// Key-value store of sequence records, keyed by sequence name, with an
/// optimistic-concurrency commit.  Implementations supply the sole
/// mechanism preventing two concurrent increments from advancing from the
/// same baseline; callers add no locking of their own.
pub trait SequenceDatabase: Send + Sync + 'static {
    /// Gets the sequence record for `name`, if present and visible.
    fn get_sequence(&self, name: &str) -> DbResult<Option<SequenceEntry>>;

    /// Creates or replaces a sequence record unconditionally.
    ///
    /// Administration path; the increment engine never calls this.
    fn put_sequence(&self, name: &str, entry: &SequenceEntry) -> DbResult<()>;

    /// Commits `new` for `name` only if the stored record still equals
    /// `expected`.  Fails with [`DbError::VersionConflict`] if another
    /// writer committed since `expected` was read (or the record vanished).
    ///
    /// [`DbError::VersionConflict`]: crate::DbError::VersionConflict
    fn compare_and_put_sequence(
        &self,
        name: &str,
        expected: &SequenceEntry,
        new: &SequenceEntry,
    ) -> DbResult<()>;
}
