//! Per-backend update options built from a patch task

use tendpatch_pkg::{AptGetUpgradeType, AptUpgradeOptions, YumUpdateOptions, ZypperPatchOptions};

use crate::config::{AptUpgradeType, PatchTaskConfig};

/// Options for `apt-get`
#[must_use]
pub fn apt_options(task: &PatchTaskConfig) -> AptUpgradeOptions {
    AptUpgradeOptions {
        dry_run: task.dry_run,
        upgrade_type: match task.apt.upgrade_type {
            AptUpgradeType::Default => AptGetUpgradeType::Upgrade,
            AptUpgradeType::Dist => AptGetUpgradeType::DistUpgrade,
        },
    }
}

/// Options for `yum`
#[must_use]
pub fn yum_options(task: &PatchTaskConfig) -> YumUpdateOptions {
    YumUpdateOptions {
        security: task.yum.security,
        minimal: task.yum.minimal,
        excludes: task.yum.excludes.clone(),
        dry_run: task.dry_run,
    }
}

/// Options for `zypper patch`
#[must_use]
pub fn zypper_options(task: &PatchTaskConfig) -> ZypperPatchOptions {
    ZypperPatchOptions {
        categories: task.zypper.categories.clone(),
        severities: task.zypper.severities.clone(),
        with_update: task.zypper.with_update,
        with_optional: task.zypper.with_optional,
        dry_run: task.dry_run,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AptSettings, YumSettings, ZypperSettings};

    #[test]
    fn test_defaults_map_to_backend_defaults() {
        let task = PatchTaskConfig::default();

        assert_eq!(apt_options(&task), AptUpgradeOptions::default());
        assert_eq!(yum_options(&task), YumUpdateOptions::default());
        assert_eq!(zypper_options(&task), ZypperPatchOptions::default());
    }

    #[test]
    fn test_dry_run_reaches_every_backend() {
        let task = PatchTaskConfig {
            dry_run: true,
            ..PatchTaskConfig::default()
        };

        assert!(apt_options(&task).dry_run);
        assert!(yum_options(&task).dry_run);
        assert!(zypper_options(&task).dry_run);
    }

    #[test]
    fn test_field_mapping() {
        let task = PatchTaskConfig {
            dry_run: false,
            apt: AptSettings {
                upgrade_type: AptUpgradeType::Dist,
            },
            yum: YumSettings {
                security: true,
                minimal: true,
                excludes: vec!["kernel".to_string(), "httpd".to_string()],
            },
            zypper: ZypperSettings {
                categories: vec!["security".to_string()],
                severities: vec!["critical".to_string()],
                with_update: true,
                with_optional: false,
            },
        };

        assert_eq!(
            apt_options(&task).upgrade_type,
            AptGetUpgradeType::DistUpgrade
        );

        let yum = yum_options(&task);
        assert!(yum.security && yum.minimal);
        assert_eq!(yum.excludes, vec!["kernel", "httpd"]);

        let zypper = zypper_options(&task);
        assert_eq!(zypper.categories, vec!["security"]);
        assert_eq!(zypper.severities, vec!["critical"]);
        assert!(zypper.with_update);
        assert!(!zypper.with_optional);
    }
}
