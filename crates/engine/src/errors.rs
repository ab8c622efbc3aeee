use numgen_db::DbError;
use numgen_format::FormatError;
use thiserror::Error;

/// Failures of the generation pipeline.  Version conflicts are recovered
/// internally by the retry engine and never surface here.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The named sequence is absent or not visible to the caller.
    #[error("number sequence '{0}' not found or not accessible")]
    SequenceNotFound(String),

    /// A non-conflict store error aborted the increment.
    #[error("failed to generate a new number in sequence '{name}'")]
    GenerationFailed {
        name: String,
        #[source]
        source: DbError,
    },

    /// Version conflicts persisted through every allowed attempt.
    #[error("exhausted all retry attempts generating a number in sequence '{0}'")]
    RetryExhausted(String),

    /// The issued number has more digits than the pattern can represent.
    #[error(transparent)]
    FormatOverflow(#[from] FormatError),
}

impl GenerateError {
    pub(crate) fn failed(name: &str, source: DbError) -> Self {
        Self::GenerationFailed {
            name: name.to_string(),
            source,
        }
    }
}
