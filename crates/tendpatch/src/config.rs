//! Agent configuration loading and types

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tendpatch_core::{RETRY_PERIOD, RetryPolicy};

/// Top-level configuration for the tendpatch agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Agent settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// Retry timing for each backend
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Agent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prefix package manager commands with sudo
    #[serde(default)]
    pub use_sudo: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            use_sudo: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Retry timing, in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total time a backend may spend waiting between attempts
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
    /// Wait after the first failure; grows by this much per attempt
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Longest single wait
    #[serde(default = "default_max_interval_secs")]
    pub max_interval_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            period_secs: default_period_secs(),
            interval_secs: default_interval_secs(),
            max_interval_secs: default_max_interval_secs(),
        }
    }
}

fn default_period_secs() -> u64 {
    RETRY_PERIOD.as_secs()
}

fn default_interval_secs() -> u64 {
    1
}

fn default_max_interval_secs() -> u64 {
    30
}

impl RetryConfig {
    /// Policy handed to the patch runner
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(Duration::from_secs(self.period_secs)).with_interval(
            Duration::from_secs(self.interval_secs),
            Duration::from_secs(self.max_interval_secs),
        )
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from an explicit path, the default paths, or use defaults
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be loaded
    pub fn load_default(explicit: Option<&Path>) -> eyre::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(path) = std::env::var("TENDPATCH_CONFIG") {
            return Self::load(Path::new(&path));
        }

        let mut paths = vec![
            PathBuf::from("tendpatch.toml"),
            PathBuf::from("/etc/tendpatch/tendpatch.toml"),
        ];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tendpatch/tendpatch.toml"));
        }

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Config::default())
    }
}
