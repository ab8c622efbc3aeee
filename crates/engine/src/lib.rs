//! Number generation engine.
//!
//! Issues unique, increasing numbers from named sequences held in a
//! [`SequenceDatabase`](numgen_db::traits::SequenceDatabase), retrying
//! optimistic-concurrency conflicts with randomized exponential backoff,
//! and formats the issued number through `numgen-format`.
//!
//! Calls are synchronous and may block the calling thread for the
//! duration of each backoff sleep; wrap externally if cancellation or
//! timeouts are needed.

mod cursor;
mod errors;
mod generator;
mod isolation;
mod retry;
mod traits;

#[cfg(test)]
pub(crate) mod testutil;

#[cfg(test)]
use numgen_store_sled as _;
#[cfg(test)]
use sled as _;

pub use cursor::SequenceCursor;
pub use errors::GenerateError;
pub use generator::NumberGenerator;
pub use isolation::OutOfTransactionGenerator;
pub use retry::{RetryPolicy, RetrySequenceGenerator};
pub use traits::SequenceGenerator;
