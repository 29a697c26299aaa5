//! Patch task configuration
//!
//! Every field has a default, so a task file only needs to mention the
//! settings it changes. Settings for a backend that is not installed are
//! ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration for one patch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchTaskConfig {
    /// Simulate the update on every backend
    pub dry_run: bool,
    /// APT settings
    pub apt: AptSettings,
    /// YUM settings
    pub yum: YumSettings,
    /// Zypper settings
    pub zypper: ZypperSettings,
}

impl PatchTaskConfig {
    /// Load a task from a TOML file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse a task from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not a valid task
    pub fn from_toml(content: &str) -> Result<Self, CoreError> {
        toml::from_str(content).map_err(|e| CoreError::ConfigError(e.to_string()))
    }
}

/// APT settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AptSettings {
    /// Which kind of upgrade to run
    #[serde(rename = "type")]
    pub upgrade_type: AptUpgradeType,
}

/// Kind of APT upgrade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AptUpgradeType {
    /// `apt-get upgrade`
    #[default]
    #[serde(alias = "DEFAULT")]
    Default,
    /// `apt-get dist-upgrade`
    #[serde(alias = "DIST")]
    Dist,
}

/// YUM settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YumSettings {
    /// Only security updates
    pub security: bool,
    /// Minimal version updates
    pub minimal: bool,
    /// Packages to leave alone
    pub excludes: Vec<String>,
}

/// Zypper settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZypperSettings {
    /// Patch categories
    pub categories: Vec<String>,
    /// Patch severities
    pub severities: Vec<String>,
    /// Also apply updates not covered by a patch
    pub with_update: bool,
    /// Include optional patches
    pub with_optional: bool,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_task_is_default() {
        let task = PatchTaskConfig::from_toml("").unwrap();

        assert_eq!(task, PatchTaskConfig::default());
        assert!(task.yum.excludes.is_empty());
        assert_eq!(task.apt.upgrade_type, AptUpgradeType::Default);
    }

    #[test]
    fn test_parse_full_task() {
        let task = PatchTaskConfig::from_toml(
            r#"
dry_run = true

[apt]
type = "DIST"

[yum]
security = true
excludes = ["kernel*", "glibc"]

[zypper]
categories = ["security"]
severities = ["critical", "important"]
with_update = true
"#,
        )
        .unwrap();

        assert!(task.dry_run);
        assert_eq!(task.apt.upgrade_type, AptUpgradeType::Dist);
        assert!(task.yum.security);
        assert!(!task.yum.minimal);
        assert_eq!(task.yum.excludes, vec!["kernel*", "glibc"]);
        assert_eq!(task.zypper.severities, vec!["critical", "important"]);
        assert!(task.zypper.with_update);
        assert!(!task.zypper.with_optional);
    }

    #[test]
    fn test_rejects_unknown_upgrade_type() {
        let err = PatchTaskConfig::from_toml("[apt]\ntype = \"full\"\n").unwrap_err();

        assert!(matches!(err, CoreError::ConfigError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[apt]\ntype = \"dist\"").unwrap();

        let task = PatchTaskConfig::load(file.path()).unwrap();

        assert_eq!(task.apt.upgrade_type, AptUpgradeType::Dist);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PatchTaskConfig::load(Path::new("/nonexistent/task.toml")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/task.toml"));
    }
}
