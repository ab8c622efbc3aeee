use numgen_db::session::StoreSession;

use crate::GenerateError;

/// Issues the next value of a named sequence.
///
/// Implementations compose: the retrying engine talks to the store, and
/// the out-of-transaction decorator wraps any other generator to pick the
/// session the increment commits on.
pub trait SequenceGenerator: Send + Sync {
    fn next_value(&self, session: &dyn StoreSession, name: &str) -> Result<i64, GenerateError>;
}
