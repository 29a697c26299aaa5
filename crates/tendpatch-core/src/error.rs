//! Core error types for tendpatch-core

use std::fmt;

use chrono::{DateTime, Utc};
use tendpatch_pkg::Backend;
use thiserror::Error;

use crate::context::CancelReason;

/// Separator between backend messages in an aggregated failure
pub const FAILURE_SEPARATOR: &str = ",\n";

/// Errors outside a patch run itself
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Actor communication error
    #[error("actor communication error: {0}")]
    ActorError(String),
}

/// One backend whose update still failed after retrying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    /// Backend that failed
    pub backend: Backend,
    /// Error text of the last attempt, unmodified
    pub message: String,
    /// Attempts made
    pub attempts: u32,
    /// When the backend was given up on
    pub failed_at: DateTime<Utc>,
}

impl BackendFailure {
    /// Record a failure now
    pub fn new(backend: Backend, message: impl Into<String>, attempts: u32) -> Self {
        Self {
            backend,
            message: message.into(),
            attempts,
            failed_at: Utc::now(),
        }
    }
}

/// Failures of one patch run, in backend processing order
///
/// Displays as the messages joined by `",\n"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureLog {
    entries: Vec<BackendFailure>,
}

impl FailureLog {
    /// Empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, failure: BackendFailure) {
        self.entries.push(failure);
    }

    /// No backend failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failed backends
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Failures in processing order
    pub fn iter(&self) -> impl Iterator<Item = &BackendFailure> {
        self.entries.iter()
    }

    /// Backends that failed, in processing order
    #[must_use]
    pub fn backends(&self) -> Vec<Backend> {
        self.entries.iter().map(|f| f.backend).collect()
    }

    /// The error message recorded for `backend`
    #[must_use]
    pub fn message_for(&self, backend: Backend) -> Option<&str> {
        self.entries
            .iter()
            .find(|f| f.backend == backend)
            .map(|f| f.message.as_str())
    }
}

impl fmt::Display for FailureLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(FAILURE_SEPARATOR)?;
            }
            f.write_str(&entry.message)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FailureLog {
    type Item = &'a BackendFailure;
    type IntoIter = std::slice::Iter<'a, BackendFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outcome of a patch run that did not fully succeed
#[derive(Error, Debug, Clone)]
pub enum PatchError {
    /// One or more backends failed; the message is their errors joined
    #[error("{0}")]
    Failed(FailureLog),

    /// The task context was cancelled or expired
    #[error("{backend} updates interrupted: {reason}")]
    Cancelled {
        /// Backend being attempted when the run stopped
        backend: Backend,
        /// Cancellation or deadline
        reason: CancelReason,
    },
}

impl PatchError {
    /// Per-backend failures, if the run was not cancelled
    #[must_use]
    pub fn failures(&self) -> Option<&FailureLog> {
        match self {
            PatchError::Failed(log) => Some(log),
            PatchError::Cancelled { .. } => None,
        }
    }

    /// The run stopped because of cancellation or a deadline
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PatchError::Cancelled { .. })
    }
}
