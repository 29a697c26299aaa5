//! Update executor backed by the host's real package managers

use std::sync::Arc;

use async_trait::async_trait;
use tendpatch_exec::CommandRunner;
use tracing::debug;

use crate::apt::AptManager;
use crate::error::PackageError;
use crate::traits::UpdateExecutor;
use crate::types::{AptUpgradeOptions, YumUpdateOptions, ZypperPatchOptions};
use crate::yum::YumManager;
use crate::zypper::ZypperManager;

/// Runs apt-get, yum and zypper through a shared command runner
pub struct SystemUpdateExecutor {
    apt: AptManager,
    yum: YumManager,
    zypper: ZypperManager,
}

impl SystemUpdateExecutor {
    /// Create an executor whose managers all use `runner`
    pub fn new(runner: Arc<dyn CommandRunner>, use_sudo: bool) -> Self {
        debug!(runner = runner.runner_type(), use_sudo, "creating update executor");
        Self {
            apt: AptManager::new(runner.clone(), use_sudo),
            yum: YumManager::new(runner.clone(), use_sudo),
            zypper: ZypperManager::new(runner, use_sudo),
        }
    }
}

#[async_trait]
impl UpdateExecutor for SystemUpdateExecutor {
    async fn run_apt_upgrade(&self, options: &AptUpgradeOptions) -> Result<(), PackageError> {
        self.apt.run_apt_upgrade(options).await
    }

    async fn run_yum_update(&self, options: &YumUpdateOptions) -> Result<(), PackageError> {
        self.yum.run_yum_update(options).await
    }

    async fn run_zypper_patch(&self, options: &ZypperPatchOptions) -> Result<(), PackageError> {
        self.zypper.run_zypper_patch(options).await
    }
}
