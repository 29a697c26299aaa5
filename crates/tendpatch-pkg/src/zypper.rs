//! Zypper package manager (SUSE)

use std::sync::Arc;

use tendpatch_exec::{CommandRunner, CommandSpec};
use tracing::{info, instrument, warn};

use crate::error::PackageError;
use crate::types::ZypperPatchOptions;

/// Insufficient privileges
const EXIT_ERR_PRIVILEGES: i32 = 5;
/// Another process holds the zypp lock
const EXIT_ZYPP_LOCKED: i32 = 7;
/// Some repositories were skipped because they could not be refreshed
const EXIT_INF_REPOS_SKIPPED: i32 = 106;

/// Zypper package manager implementation
pub struct ZypperManager {
    runner: Arc<dyn CommandRunner>,
    use_sudo: bool,
}

impl ZypperManager {
    /// Create a new Zypper manager
    pub fn new(runner: Arc<dyn CommandRunner>, use_sudo: bool) -> Self {
        Self { runner, use_sudo }
    }

    fn patch_command(options: &ZypperPatchOptions) -> CommandSpec {
        let mut cmd = CommandSpec::new("zypper")
            .args(["--gpg-auto-import-keys", "--non-interactive", "patch"])
            .args(options.categories.iter().map(|c| format!("--category={c}")))
            .args(options.severities.iter().map(|s| format!("--severity={s}")));
        if options.with_update {
            cmd = cmd.arg("--with-update");
        }
        if options.with_optional {
            cmd = cmd.arg("--with-optional");
        }
        if options.dry_run {
            cmd = cmd.arg("--dry-run");
        }
        cmd
    }

    /// Exit codes 100-103 report that patches were applied and a follow-up
    /// (another run, a reboot, a service restart) is advisable.
    fn is_success_status(status: i32) -> bool {
        status == 0 || (100..=103).contains(&status)
    }

    fn prepare(&self, cmd: CommandSpec) -> CommandSpec {
        if self.use_sudo {
            cmd.with_sudo()
        } else {
            cmd
        }
    }

    /// Run zypper patch
    ///
    /// # Errors
    /// Returns a classified failure if zypper reports an error status.
    #[instrument(skip(self))]
    pub async fn run_zypper_patch(&self, options: &ZypperPatchOptions) -> Result<(), PackageError> {
        info!(
            categories = ?options.categories,
            severities = ?options.severities,
            dry_run = options.dry_run,
            "starting zypper patch"
        );

        let result = self
            .runner
            .run(&self.prepare(Self::patch_command(options)))
            .await?;

        if result.status == EXIT_INF_REPOS_SKIPPED {
            return Err(PackageError::RepositoryUnavailable(result.error_summary()));
        }
        if !Self::is_success_status(result.status) {
            return Err(PackageError::from_failed_command(
                &result,
                Some(EXIT_ZYPP_LOCKED),
                Some(EXIT_ERR_PRIVILEGES),
            ));
        }
        if result.status != 0 {
            warn!(status = result.status, "zypper patch finished with follow-up required");
        }

        info!(duration = ?result.duration, "zypper patch completed");
        Ok(())
    }
}
