use thiserror::Error;

/// Errors surfaced by sequence stores and session managers.
#[derive(Debug, Error, Clone)]
pub enum DbError {
    /// The record existed when located but is gone now.
    #[error("sequence entry does not exist")]
    NonExistentEntry,

    /// The record changed since the writer's last read.  This is the only
    /// error kind the increment engine recovers from.
    #[error("sequence entry changed since last read")]
    VersionConflict,

    #[error("unknown store '{0}'")]
    UnknownStore(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

pub type DbResult<T> = Result<T, DbError>;
