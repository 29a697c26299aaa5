//! Error types for tendpatch-exec

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while running a local command
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// Program could not be started
    #[error("failed to spawn {program}: {message}")]
    SpawnError {
        /// Program that failed to start
        program: String,
        /// OS error kind
        kind: io::ErrorKind,
        /// OS error text
        message: String,
    },

    /// Command timed out
    #[error("command timed out after {timeout:?}")]
    Timeout {
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// I/O error while collecting output
    #[error("I/O error: {0}")]
    IoError(String),
}

impl ExecError {
    /// The program is not installed or not on the search path
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ExecError::SpawnError {
                kind: io::ErrorKind::NotFound,
                ..
            }
        )
    }
}
