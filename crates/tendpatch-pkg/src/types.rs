//! Type definitions for package management

use serde::{Deserialize, Serialize};

/// Package manager backend, in the order backends are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// APT with dpkg (Debian/Ubuntu)
    Apt,
    /// YUM with RPM (RHEL/CentOS)
    Yum,
    /// Zypper with RPM (SUSE)
    Zypper,
}

impl Backend {
    /// All backends in processing order
    pub const ALL: [Backend; 3] = [Backend::Apt, Backend::Yum, Backend::Zypper];

    /// Human-readable name of the update operation, used in retry diagnostics
    #[must_use]
    pub fn update_description(self) -> &'static str {
        match self {
            Backend::Apt => "installing APT package updates",
            Backend::Yum => "installing YUM package updates",
            Backend::Zypper => "installing Zypper updates",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Apt => write!(f, "apt"),
            Backend::Yum => write!(f, "yum"),
            Backend::Zypper => write!(f, "zypper"),
        }
    }
}

/// Snapshot of which package tools exist on the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// `apt-get` present
    pub apt_get: bool,
    /// `dpkg-query` present
    pub dpkg_query: bool,
    /// `yum` present
    pub yum: bool,
    /// `zypper` present
    pub zypper: bool,
    /// `rpmquery` present (shared by yum and zypper)
    pub rpm_query: bool,
}

impl Capabilities {
    /// A backend is usable only when both its frontend and its query tool exist
    #[must_use]
    pub fn is_usable(&self, backend: Backend) -> bool {
        match backend {
            Backend::Apt => self.apt_get && self.dpkg_query,
            Backend::Yum => self.yum && self.rpm_query,
            Backend::Zypper => self.zypper && self.rpm_query,
        }
    }

    /// Usable backends in processing order
    #[must_use]
    pub fn usable_backends(&self) -> Vec<Backend> {
        Backend::ALL
            .into_iter()
            .filter(|b| self.is_usable(*b))
            .collect()
    }
}

/// Which `apt-get` subcommand performs the upgrade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AptGetUpgradeType {
    /// `apt-get upgrade`
    #[default]
    Upgrade,
    /// `apt-get dist-upgrade`
    DistUpgrade,
}

impl AptGetUpgradeType {
    /// The `apt-get` subcommand
    #[must_use]
    pub fn subcommand(self) -> &'static str {
        match self {
            AptGetUpgradeType::Upgrade => "upgrade",
            AptGetUpgradeType::DistUpgrade => "dist-upgrade",
        }
    }
}

/// Options for an APT upgrade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptUpgradeOptions {
    /// Simulate only
    pub dry_run: bool,
    /// Upgrade subcommand
    pub upgrade_type: AptGetUpgradeType,
}

/// Options for a YUM update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YumUpdateOptions {
    /// Only apply security updates
    pub security: bool,
    /// Update to the lowest version that fixes the advisory
    pub minimal: bool,
    /// Packages excluded from the update
    pub excludes: Vec<String>,
    /// Report only
    pub dry_run: bool,
}

/// Options for a Zypper patch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZypperPatchOptions {
    /// Patch categories to install (security, recommended, ...)
    pub categories: Vec<String>,
    /// Patch severities to install (critical, important, ...)
    pub severities: Vec<String>,
    /// Also apply package updates not covered by a patch
    pub with_update: bool,
    /// Include optional patches
    pub with_optional: bool,
    /// Simulate only
    pub dry_run: bool,
}
