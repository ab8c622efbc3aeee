use numgen_db::{traits::SequenceDatabase, DbError, DbResult, SequenceEntry};

/// Tree holding all sequence records, keyed by sequence name.
pub const SEQUENCES_TREE: &str = "number_sequences";

/// Sled-backed [`SequenceDatabase`].
#[derive(Debug, Clone)]
pub struct SledSequenceDb {
    tree: sled::Tree,
}

fn to_db_error(err: sled::Error) -> DbError {
    DbError::Io(err.to_string())
}

fn encode_entry(entry: &SequenceEntry) -> DbResult<Vec<u8>> {
    borsh::to_vec(entry).map_err(|e| DbError::Codec(e.to_string()))
}

fn decode_entry(buf: &[u8]) -> DbResult<SequenceEntry> {
    borsh::from_slice(buf).map_err(|e| DbError::Codec(e.to_string()))
}

impl SledSequenceDb {
    /// Opens (or creates) the sequences tree in the given database.
    pub fn new(db: &sled::Db) -> DbResult<Self> {
        let tree = db.open_tree(SEQUENCES_TREE).map_err(to_db_error)?;
        Ok(Self { tree })
    }
}

impl SequenceDatabase for SledSequenceDb {
    fn get_sequence(&self, name: &str) -> DbResult<Option<SequenceEntry>> {
        let val = self.tree.get(name).map_err(to_db_error)?;
        val.as_deref().map(decode_entry).transpose()
    }

    fn put_sequence(&self, name: &str, entry: &SequenceEntry) -> DbResult<()> {
        let value = encode_entry(entry)?;
        self.tree.insert(name, value).map_err(to_db_error)?;
        self.tree.flush().map_err(to_db_error)?;
        Ok(())
    }

    fn compare_and_put_sequence(
        &self,
        name: &str,
        expected: &SequenceEntry,
        new: &SequenceEntry,
    ) -> DbResult<()> {
        let old = encode_entry(expected)?;
        let value = encode_entry(new)?;
        let swap = self
            .tree
            .compare_and_swap(name, Some(old), Some(value))
            .map_err(to_db_error)?;
        match swap {
            Ok(()) => {
                self.tree.flush().map_err(to_db_error)?;
                Ok(())
            }
            // Covers both an interleaved commit and a concurrent deletion.
            Err(_) => Err(DbError::VersionConflict),
        }
    }
}
