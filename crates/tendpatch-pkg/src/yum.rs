//! YUM package manager (RHEL/CentOS)

use std::sync::Arc;

use tendpatch_exec::{CommandRunner, CommandSpec};
use tracing::{info, instrument};

use crate::error::PackageError;
use crate::types::YumUpdateOptions;

/// `yum check-update` exits with 100 when updates are available
const CHECK_UPDATE_AVAILABLE: i32 = 100;

/// YUM package manager implementation
pub struct YumManager {
    runner: Arc<dyn CommandRunner>,
    use_sudo: bool,
}

impl YumManager {
    /// Create a new YUM manager
    pub fn new(runner: Arc<dyn CommandRunner>, use_sudo: bool) -> Self {
        Self { runner, use_sudo }
    }

    /// Build the yum command for the given options
    ///
    /// A dry run lists what would be updated via `check-update` with the
    /// same filters instead of installing anything.
    fn update_command(options: &YumUpdateOptions) -> CommandSpec {
        let mut cmd = CommandSpec::new("yum");
        cmd = if options.dry_run {
            cmd.arg("check-update")
        } else if options.minimal {
            cmd.args(["-y", "update-minimal"])
        } else {
            cmd.args(["-y", "update"])
        };
        if options.security {
            cmd = cmd.arg("--security");
        }
        cmd.args(options.excludes.iter().map(|pkg| format!("--exclude={pkg}")))
    }

    fn prepare(&self, cmd: CommandSpec) -> CommandSpec {
        if self.use_sudo {
            cmd.with_sudo()
        } else {
            cmd
        }
    }

    /// Run yum update
    ///
    /// # Errors
    /// Returns a classified failure if yum exits unsuccessfully.
    #[instrument(skip(self))]
    pub async fn run_yum_update(&self, options: &YumUpdateOptions) -> Result<(), PackageError> {
        info!(
            security = options.security,
            minimal = options.minimal,
            excludes = options.excludes.len(),
            dry_run = options.dry_run,
            "starting yum update"
        );

        let result = self
            .runner
            .run(&self.prepare(Self::update_command(options)))
            .await?;

        let ok = result.success() || (options.dry_run && result.status == CHECK_UPDATE_AVAILABLE);
        if !ok {
            return Err(PackageError::from_failed_command(&result, None, None));
        }

        info!(duration = ?result.duration, "yum update completed");
        Ok(())
    }
}
