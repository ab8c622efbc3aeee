//! Sled store for number sequences.
//!
//! One tree holds all sequence records; the optimistic commit maps onto
//! [`sled::Tree::compare_and_swap`] over the borsh-encoded record bytes.

mod session;
mod store;

pub use session::SledSessionManager;
pub use store::{SledSequenceDb, SEQUENCES_TREE};
