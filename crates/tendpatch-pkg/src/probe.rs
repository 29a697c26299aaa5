//! Host capability probing
//!
//! Decides which package tools are installed by looking them up on the
//! search path. Nothing is cached: every query touches the filesystem, so
//! tools installed or removed between patch runs are noticed.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::debug;

use crate::types::Capabilities;

/// Independent yes/no facts about the package tools on the host
pub trait CapabilityProber: Send + Sync {
    /// `apt-get` is installed
    fn apt_get_exists(&self) -> bool;

    /// `dpkg-query` is installed
    fn dpkg_query_exists(&self) -> bool;

    /// `yum` is installed
    fn yum_exists(&self) -> bool;

    /// `zypper` is installed
    fn zypper_exists(&self) -> bool;

    /// `rpmquery` is installed
    fn rpm_query_exists(&self) -> bool;

    /// Query every fact once
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            apt_get: self.apt_get_exists(),
            dpkg_query: self.dpkg_query_exists(),
            yum: self.yum_exists(),
            zypper: self.zypper_exists(),
            rpm_query: self.rpm_query_exists(),
        }
    }
}

/// A fixed set of facts
impl CapabilityProber for Capabilities {
    fn apt_get_exists(&self) -> bool {
        self.apt_get
    }

    fn dpkg_query_exists(&self) -> bool {
        self.dpkg_query
    }

    fn yum_exists(&self) -> bool {
        self.yum
    }

    fn zypper_exists(&self) -> bool {
        self.zypper
    }

    fn rpm_query_exists(&self) -> bool {
        self.rpm_query
    }

    fn capabilities(&self) -> Capabilities {
        *self
    }
}

/// Looks tools up as executables on a search path
#[derive(Debug, Clone)]
pub struct PathProber {
    search_path: Option<OsString>,
}

impl PathProber {
    /// Probe the directories listed in `$PATH`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            search_path: env::var_os("PATH"),
        }
    }

    /// Probe an explicit list of directories
    ///
    /// An empty list, or directories whose names contain the path
    /// separator, leave nothing to search.
    pub fn with_search_path(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        let dirs: Vec<PathBuf> = dirs.into_iter().map(Into::into).collect();
        Self {
            search_path: env::join_paths(dirs).ok().filter(|p| !p.is_empty()),
        }
    }

    /// Full path of `program`, if it is installed
    #[must_use]
    pub fn find(&self, program: &str) -> Option<PathBuf> {
        let search_path = self.search_path.as_ref()?;
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let found = which::which_in(program, Some(search_path), cwd).ok();
        debug!(program, found = ?found, "looked up program");
        found
    }

    fn exists(&self, program: &str) -> bool {
        self.find(program).is_some()
    }
}

impl Default for PathProber {
    fn default() -> Self {
        Self::from_env()
    }
}

impl CapabilityProber for PathProber {
    fn apt_get_exists(&self) -> bool {
        self.exists("apt-get")
    }

    fn dpkg_query_exists(&self) -> bool {
        self.exists("dpkg-query")
    }

    fn yum_exists(&self) -> bool {
        self.exists("yum")
    }

    fn zypper_exists(&self) -> bool {
        self.exists("zypper")
    }

    fn rpm_query_exists(&self) -> bool {
        self.exists("rpmquery")
    }
}
