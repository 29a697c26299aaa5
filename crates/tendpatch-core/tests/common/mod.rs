//! Shared mocks for the core integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tendpatch_core::RetryPolicy;
use tendpatch_pkg::{
    AptUpgradeOptions, Backend, CapabilityProber, Capabilities, PackageError, UpdateExecutor,
    YumUpdateOptions, ZypperPatchOptions,
};

/// Policy with a 10s waiting budget and 1s..5s spacing
pub fn test_policy() -> RetryPolicy {
    RetryPolicy::new(Duration::from_secs(10))
        .with_interval(Duration::from_secs(1), Duration::from_secs(5))
}

pub fn caps(apt: bool, yum: bool, zypper: bool) -> Capabilities {
    Capabilities {
        apt_get: apt,
        dpkg_query: apt,
        yum,
        zypper,
        rpm_query: yum || zypper,
    }
}

/// How a mocked backend behaves
#[derive(Clone)]
pub enum Behavior {
    /// Fail this many times, then succeed
    FailTimes(u32, String),
    /// Never succeed
    AlwaysFail(String),
}

/// Records every call and the options it received
#[derive(Default)]
pub struct MockExecutor {
    behaviors: HashMap<Backend, Behavior>,
    calls: Mutex<Vec<Backend>>,
    apt_options: Mutex<Vec<AptUpgradeOptions>>,
    yum_options: Mutex<Vec<YumUpdateOptions>>,
    zypper_options: Mutex<Vec<ZypperPatchOptions>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, backend: Backend, behavior: Behavior) -> Self {
        self.behaviors.insert(backend, behavior);
        self
    }

    pub fn calls(&self) -> Vec<Backend> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, backend: Backend) -> usize {
        self.calls().iter().filter(|b| **b == backend).count()
    }

    /// Calls with consecutive repeats of the same backend collapsed
    pub fn backend_order(&self) -> Vec<Backend> {
        let mut order = self.calls();
        order.dedup();
        order
    }

    pub fn apt_options(&self) -> Vec<AptUpgradeOptions> {
        self.apt_options.lock().unwrap().clone()
    }

    pub fn yum_options(&self) -> Vec<YumUpdateOptions> {
        self.yum_options.lock().unwrap().clone()
    }

    pub fn zypper_options(&self) -> Vec<ZypperPatchOptions> {
        self.zypper_options.lock().unwrap().clone()
    }

    fn invoke(&self, backend: Backend) -> Result<(), PackageError> {
        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(backend);
            calls.iter().filter(|b| **b == backend).count()
        };

        match self.behaviors.get(&backend) {
            None => Ok(()),
            Some(Behavior::FailTimes(n, msg)) if attempt <= *n as usize => {
                Err(PackageError::Other(msg.clone()))
            }
            Some(Behavior::FailTimes(..)) => Ok(()),
            Some(Behavior::AlwaysFail(msg)) => Err(PackageError::Other(msg.clone())),
        }
    }
}

#[async_trait]
impl UpdateExecutor for MockExecutor {
    async fn run_apt_upgrade(&self, options: &AptUpgradeOptions) -> Result<(), PackageError> {
        self.apt_options.lock().unwrap().push(options.clone());
        self.invoke(Backend::Apt)
    }

    async fn run_yum_update(&self, options: &YumUpdateOptions) -> Result<(), PackageError> {
        self.yum_options.lock().unwrap().push(options.clone());
        self.invoke(Backend::Yum)
    }

    async fn run_zypper_patch(&self, options: &ZypperPatchOptions) -> Result<(), PackageError> {
        self.zypper_options.lock().unwrap().push(options.clone());
        self.invoke(Backend::Zypper)
    }
}

/// Prober whose YUM tools can be installed between runs
#[derive(Default)]
pub struct ToggleProber {
    pub yum_installed: AtomicBool,
}

impl CapabilityProber for ToggleProber {
    fn apt_get_exists(&self) -> bool {
        false
    }

    fn dpkg_query_exists(&self) -> bool {
        false
    }

    fn yum_exists(&self) -> bool {
        self.yum_installed.load(Ordering::SeqCst)
    }

    fn zypper_exists(&self) -> bool {
        false
    }

    fn rpm_query_exists(&self) -> bool {
        self.yum_installed.load(Ordering::SeqCst)
    }
}
