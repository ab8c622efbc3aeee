use std::{thread, time::Duration};

use numgen_db::{session::StoreSession, DbError};
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::*;

use crate::{cursor::SequenceCursor, GenerateError, SequenceGenerator};

/// Retry budget and backoff shape for conflicting increments.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub initial_interval_ms: u64,
    pub growth_factor: f64,
    /// Scale each interval by a uniform draw from `[0, 1)`.
    pub randomize: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_interval_ms: 1000,
            growth_factor: 1.5,
            randomize: true,
        }
    }
}

/// Increment engine that retries version conflicts.
///
/// Locates the record once, then loops: re-read the latest committed
/// state, commit one increment under optimistic concurrency, and on a
/// version conflict sleep a randomized, growing interval before the next
/// round.  Non-conflict errors abort immediately and are never retried.
#[derive(Debug)]
pub struct RetrySequenceGenerator<R = StdRng> {
    policy: RetryPolicy,
    rng: Mutex<R>,
}

impl RetrySequenceGenerator<StdRng> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_rng(policy, StdRng::from_entropy())
    }
}

impl Default for RetrySequenceGenerator<StdRng> {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl<R: Rng + Send> RetrySequenceGenerator<R> {
    /// Builds the engine around an injected randomness source, so retry
    /// timing is reproducible in tests.
    pub fn with_rng(policy: RetryPolicy, rng: R) -> Self {
        Self {
            policy,
            rng: Mutex::new(rng),
        }
    }

    /// Interval before the retry with 0-based index `retry_idx`.
    ///
    /// `max = initial * retry_idx * growth`, scaled by a uniform draw when
    /// randomization is on.  The factor `retry_idx` makes the very first
    /// retry interval zero no matter how the policy is configured; kept
    /// as-is on purpose.
    fn backoff_interval(&self, retry_idx: u32) -> Duration {
        let max_interval = self.policy.initial_interval_ms as f64
            * (f64::from(retry_idx) * self.policy.growth_factor);
        let millis = if self.policy.randomize {
            let draw: f64 = self.rng.lock().gen();
            (max_interval * draw).round()
        } else {
            max_interval.round()
        };
        Duration::from_millis(millis as u64)
    }
}

impl<R: Rng + Send> SequenceGenerator for RetrySequenceGenerator<R> {
    fn next_value(&self, session: &dyn StoreSession, name: &str) -> Result<i64, GenerateError> {
        let db = session.sequence_db();
        let mut cursor = SequenceCursor::load(db, name)
            .map_err(|e| GenerateError::failed(name, e))?
            .ok_or_else(|| GenerateError::SequenceNotFound(name.to_string()))?;

        for attempt in 0..self.policy.max_attempts {
            // A prior attempt's snapshot is known possibly stale, so every
            // round starts from a fresh read.
            cursor
                .refresh()
                .map_err(|e| GenerateError::failed(name, e))?;

            match cursor.advance() {
                Ok(issued) => {
                    trace!(%name, issued, attempt, "issued sequence value");
                    return Ok(issued);
                }
                Err(DbError::VersionConflict) => {
                    let interval = self.backoff_interval(attempt);
                    debug!(%name, attempt, ?interval, "sequence commit conflicted, backing off");
                    thread::sleep(interval);
                }
                Err(e) => return Err(GenerateError::failed(name, e)),
            }
        }

        warn!(%name, attempts = self.policy.max_attempts, "sequence retry attempts exhausted");
        Err(GenerateError::RetryExhausted(name.to_string()))
    }
}
