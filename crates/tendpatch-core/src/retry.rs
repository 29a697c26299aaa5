//! Bounded retrying of a failable operation
//!
//! Waits grow linearly (`interval`, `2 * interval`, ... capped at
//! `max_interval`) and `period` caps the total time spent waiting. Once the
//! next wait would exceed `period` the last error is returned, so the
//! number of attempts is always finite. Waits race the task context; a
//! running attempt is never interrupted.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::context::{CancelReason, TaskContext};
use crate::patch::RETRY_PERIOD;

/// Timing of retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    period: Duration,
    interval: Duration,
    max_interval: Duration,
}

impl RetryPolicy {
    /// Smallest spacing between attempts
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Retry for up to `period` of waiting, starting at one-second spacing
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(30),
        }
    }

    /// Change the spacing between attempts
    #[must_use]
    pub fn with_interval(mut self, interval: Duration, max_interval: Duration) -> Self {
        self.interval = interval.max(Self::MIN_INTERVAL);
        self.max_interval = max_interval.max(self.interval);
        self
    }

    /// Total waiting budget
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait after the given failed attempt (1-based)
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.interval.saturating_mul(attempt).min(self.max_interval)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RETRY_PERIOD)
    }
}

/// Why a retried operation did not succeed
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// Every attempt failed and the waiting budget is used up
    #[error("{description} failed after {attempts} attempts: {source}")]
    Exhausted {
        /// Operation name
        description: String,
        /// Attempts made
        attempts: u32,
        /// Error from the last attempt
        source: E,
    },

    /// The task context was cancelled while waiting to retry
    #[error("{description} stopped after {attempts} attempts: {reason}")]
    Cancelled {
        /// Operation name
        description: String,
        /// Attempts made
        attempts: u32,
        /// Cancellation or deadline
        reason: CancelReason,
        /// Error from the last attempt
        last_error: E,
    },
}

impl<E> RetryError<E> {
    /// Number of attempts made
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } | RetryError::Cancelled { attempts, .. } => {
                *attempts
            }
        }
    }

    /// The error of the last attempt
    pub fn last_error(&self) -> &E {
        match self {
            RetryError::Exhausted { source, .. } => source,
            RetryError::Cancelled { last_error, .. } => last_error,
        }
    }
}

/// Run `operation` until it succeeds, the policy gives up or `ctx` is done
///
/// The operation always runs at least once.
///
/// # Errors
/// `Exhausted` with the last error once the waiting budget is spent,
/// `Cancelled` as soon as the context is cancelled or past its deadline.
pub async fn retry<T, E, F, Fut>(
    ctx: &TaskContext,
    policy: &RetryPolicy,
    description: &str,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let mut waited = Duration::ZERO;
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let err = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(description, attempt, "succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        let delay = policy.delay_for(attempt);
        waited += delay;
        if waited > policy.period {
            warn!(description, attempts = attempt, error = %err, "giving up");
            return Err(RetryError::Exhausted {
                description: description.to_string(),
                attempts: attempt,
                source: err,
            });
        }

        debug!(
            description,
            attempt,
            retry_in = ?delay,
            error = %err,
            "attempt failed, retrying"
        );

        tokio::select! {
            biased;
            reason = ctx.done() => {
                warn!(description, attempts = attempt, %reason, "retry aborted");
                return Err(RetryError::Cancelled {
                    description: description.to_string(),
                    attempts: attempt,
                    reason,
                    last_error: err,
                });
            }
            () = tokio::time::sleep(delay) => {}
        }
    }
}
