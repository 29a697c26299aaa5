//! Update executor trait

use async_trait::async_trait;

use crate::error::PackageError;
use crate::types::{AptUpgradeOptions, YumUpdateOptions, ZypperPatchOptions};

/// Performs the actual system update, one operation per backend
///
/// Each call is expected to run to completion on its own; callers handle
/// retrying.
#[async_trait]
pub trait UpdateExecutor: Send + Sync {
    /// Apply APT updates
    async fn run_apt_upgrade(&self, options: &AptUpgradeOptions) -> Result<(), PackageError>;

    /// Apply YUM updates
    async fn run_yum_update(&self, options: &YumUpdateOptions) -> Result<(), PackageError>;

    /// Apply Zypper patches
    async fn run_zypper_patch(&self, options: &ZypperPatchOptions) -> Result<(), PackageError>;
}
