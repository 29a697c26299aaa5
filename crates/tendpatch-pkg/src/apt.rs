//! APT package manager (Debian/Ubuntu)

use std::sync::Arc;

use tendpatch_exec::{CommandRunner, CommandSpec};
use tracing::{debug, info, instrument};

use crate::error::PackageError;
use crate::types::AptUpgradeOptions;

/// APT package manager implementation
pub struct AptManager {
    /// Runner for apt-get commands
    runner: Arc<dyn CommandRunner>,
    /// Whether to use sudo
    use_sudo: bool,
}

impl AptManager {
    /// Create a new APT manager
    ///
    /// # Arguments
    /// * `runner` - Command runner for apt-get
    /// * `use_sudo` - Whether to prefix commands with sudo
    pub fn new(runner: Arc<dyn CommandRunner>, use_sudo: bool) -> Self {
        Self { runner, use_sudo }
    }

    /// Base apt-get command; never prompts and keeps local config files
    fn apt_get() -> CommandSpec {
        CommandSpec::new("apt-get")
            .env("DEBIAN_FRONTEND", "noninteractive")
            .args(["-o", "Dpkg::Options::=--force-confold"])
            .args(["-o", "Dpkg::Options::=--force-confdef"])
    }

    fn update_command() -> CommandSpec {
        Self::apt_get().arg("update")
    }

    fn upgrade_command(options: &AptUpgradeOptions) -> CommandSpec {
        let mut cmd = Self::apt_get().arg("-y");
        if options.dry_run {
            cmd = cmd.arg("--simulate");
        }
        cmd.arg(options.upgrade_type.subcommand())
    }

    fn prepare(&self, cmd: CommandSpec) -> CommandSpec {
        if self.use_sudo {
            cmd.with_sudo()
        } else {
            cmd
        }
    }

    /// Refresh package lists, then upgrade
    ///
    /// # Errors
    /// Returns `RepositoryUnavailable` if the package lists cannot be
    /// refreshed, or a classified failure of the upgrade itself.
    #[instrument(skip(self))]
    pub async fn run_apt_upgrade(&self, options: &AptUpgradeOptions) -> Result<(), PackageError> {
        debug!("refreshing apt package lists");

        let update = self.runner.run(&self.prepare(Self::update_command())).await?;
        if !update.success() {
            return Err(match PackageError::from_failed_command(&update, None, None) {
                PackageError::CommandFailed { message, .. } => {
                    PackageError::RepositoryUnavailable(message)
                }
                other => other,
            });
        }

        info!(
            upgrade_type = options.upgrade_type.subcommand(),
            dry_run = options.dry_run,
            "starting apt-get upgrade"
        );

        let result = self
            .runner
            .run(&self.prepare(Self::upgrade_command(options)))
            .await?;

        if !result.success() {
            return Err(PackageError::from_failed_command(&result, None, None));
        }

        info!(duration = ?result.duration, "apt-get upgrade completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;
    use crate::types::AptGetUpgradeType;

    #[test]
    fn test_upgrade_command() {
        let cmd = AptManager::upgrade_command(&AptUpgradeOptions::default());

        assert_eq!(cmd.program, "apt-get");
        assert_eq!(cmd.args.last().map(String::as_str), Some("upgrade"));
        assert!(!cmd.args.contains(&"--simulate".to_string()));
        assert!(
            cmd.env
                .contains(&("DEBIAN_FRONTEND".to_string(), "noninteractive".to_string()))
        );
    }

    #[test]
    fn test_dist_upgrade_dry_run_command() {
        let cmd = AptManager::upgrade_command(&AptUpgradeOptions {
            dry_run: true,
            upgrade_type: AptGetUpgradeType::DistUpgrade,
        });

        assert!(cmd.to_string().ends_with("-y --simulate dist-upgrade"));
    }

    #[tokio::test]
    async fn test_run_apt_upgrade_updates_first() {
        let runner = Arc::new(ScriptedRunner::succeeding());
        let apt = AptManager::new(runner.clone(), false);

        apt.run_apt_upgrade(&AptUpgradeOptions::default())
            .await
            .unwrap();

        let commands = runner.commands();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].ends_with("--force-confdef update"));
        assert!(commands[1].ends_with("-y upgrade"));
    }

    #[tokio::test]
    async fn test_run_apt_upgrade_update_failure_is_repository_error() {
        let runner = Arc::new(ScriptedRunner::new([(
            100,
            "W: Failed to fetch http://deb.debian.org/debian/dists/bookworm/InRelease\n",
        )]));
        let apt = AptManager::new(runner.clone(), false);

        let err = apt
            .run_apt_upgrade(&AptUpgradeOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, PackageError::RepositoryUnavailable(_)));
        assert_eq!(runner.commands().len(), 1);
    }

    #[tokio::test]
    async fn test_run_apt_upgrade_lock_conflict() {
        let runner = Arc::new(ScriptedRunner::new([
            (0, ""),
            (100, "E: Could not get lock /var/lib/dpkg/lock-frontend\n"),
        ]));
        let apt = AptManager::new(runner, false);

        let err = apt
            .run_apt_upgrade(&AptUpgradeOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, PackageError::LockConflict(_)));
    }

    #[tokio::test]
    async fn test_run_apt_upgrade_with_sudo() {
        let runner = Arc::new(ScriptedRunner::succeeding());
        let apt = AptManager::new(runner.clone(), true);

        apt.run_apt_upgrade(&AptUpgradeOptions::default())
            .await
            .unwrap();

        assert!(
            runner
                .commands()
                .iter()
                .all(|c| c.starts_with("sudo DEBIAN_FRONTEND=noninteractive apt-get"))
        );
    }
}
