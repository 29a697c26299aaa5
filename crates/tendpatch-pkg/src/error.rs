//! Error types for tendpatch-pkg

use tendpatch_exec::{CommandResult, ExecError};
use thiserror::Error;

/// Errors that can occur during package operations
#[derive(Error, Debug, Clone)]
pub enum PackageError {
    /// Package manager not found on system
    #[error("package manager not found: {0}")]
    ManagerNotFound(String),

    /// Repository is unavailable
    #[error("repository unavailable: {0}")]
    RepositoryUnavailable(String),

    /// Lock file conflict (another process running)
    #[error("lock file conflict: {0}")]
    LockConflict(String),

    /// Insufficient permissions (need sudo)
    #[error("insufficient permissions: {0}")]
    PermissionDenied(String),

    /// Command execution failed
    #[error("command failed: {status} - {message}")]
    CommandFailed {
        /// Exit status
        status: i32,
        /// Error message
        message: String,
    },

    /// The command could not be run at all
    #[error("execution error: {0}")]
    ExecutionError(String),

    /// Any other failure, reported verbatim
    #[error("{0}")]
    Other(String),
}

impl PackageError {
    /// Classify a failed command by what the package manager printed
    ///
    /// `locked_status` and `privileges_status` are manager-specific exit
    /// codes that signal the same conditions without relying on message text.
    pub(crate) fn from_failed_command(
        result: &CommandResult,
        locked_status: Option<i32>,
        privileges_status: Option<i32>,
    ) -> Self {
        const LOCK_MARKERS: &[&str] = &[
            "Could not get lock",
            "Unable to acquire the dpkg frontend lock",
            "Existing lock",
            "System management is locked",
        ];
        const PERMISSION_MARKERS: &[&str] = &[
            "Permission denied",
            "are you root?",
            "You need to be root",
            "Root privileges are required",
        ];
        const REPOSITORY_MARKERS: &[&str] = &[
            "Could not resolve",
            "Failed to fetch",
            "Cannot find a valid baseurl",
            "Failed to download metadata",
            "Could not refresh the repositories",
        ];

        let output = result.combined_output();
        let summary = result.error_summary();
        let has = |markers: &[&str]| markers.iter().any(|m| output.contains(m));

        if locked_status == Some(result.status) || has(LOCK_MARKERS) {
            PackageError::LockConflict(summary)
        } else if privileges_status == Some(result.status) || has(PERMISSION_MARKERS) {
            PackageError::PermissionDenied(summary)
        } else if has(REPOSITORY_MARKERS) {
            PackageError::RepositoryUnavailable(summary)
        } else {
            PackageError::CommandFailed {
                status: result.status,
                message: summary,
            }
        }
    }
}

impl From<ExecError> for PackageError {
    fn from(err: ExecError) -> Self {
        if err.is_not_found() {
            PackageError::ManagerNotFound(err.to_string())
        } else {
            PackageError::ExecutionError(err.to_string())
        }
    }
}
