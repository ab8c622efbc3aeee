//! Core types and trait definitions for the number-sequence store.
//!
//! A sequence is a named, persistently stored counter with a current value
//! and a fixed increment step.  This crate defines the record type, the
//! error taxonomy shared across the workspace, and the store/session
//! boundary traits that concrete backends implement.

mod entry;
mod errors;
pub mod session;
pub mod traits;

pub use entry::SequenceEntry;
pub use errors::{DbError, DbResult};
