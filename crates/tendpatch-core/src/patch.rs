//! `PatchRunner`: applies a patch task to every usable backend
//!
//! Backends run strictly one after another: dpkg and rpm hold exclusive
//! locks on their databases and must not be driven concurrently.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tendpatch_pkg::{Backend, CapabilityProber, PackageError, UpdateExecutor};
use tracing::{debug, error, info, instrument, warn};

use crate::config::PatchTaskConfig;
use crate::context::TaskContext;
use crate::error::{BackendFailure, FailureLog, PatchError};
use crate::options::{apt_options, yum_options, zypper_options};
use crate::retry::{RetryError, RetryPolicy, retry};

/// Waiting budget shared by every backend
pub const RETRY_PERIOD: Duration = Duration::from_secs(3 * 60);

/// Runs package updates across the backends present on the host
pub struct PatchRunner {
    prober: Arc<dyn CapabilityProber>,
    executor: Arc<dyn UpdateExecutor>,
    policy: RetryPolicy,
}

impl PatchRunner {
    /// Create a runner using the default retry policy
    pub fn new(prober: Arc<dyn CapabilityProber>, executor: Arc<dyn UpdateExecutor>) -> Self {
        Self {
            prober,
            executor,
            policy: RetryPolicy::new(RETRY_PERIOD),
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The retry policy applied to each backend
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Apply `task` to every usable backend, in APT, YUM, Zypper order
    ///
    /// Host capabilities are probed on every call. A backend that keeps
    /// failing is recorded and the remaining backends are still attempted.
    ///
    /// # Errors
    /// `PatchError::Failed` listing every backend that failed, or
    /// `PatchError::Cancelled` as soon as `ctx` is cancelled or expires.
    #[instrument(skip_all, fields(dry_run = task.dry_run))]
    pub async fn run_updates(
        &self,
        ctx: &TaskContext,
        task: &PatchTaskConfig,
    ) -> Result<(), PatchError> {
        let capabilities = self.prober.capabilities();
        let mut failures = FailureLog::new();

        for backend in Backend::ALL {
            if !capabilities.is_usable(backend) {
                debug!(%backend, "backend not present, skipping");
                continue;
            }
            if let Some(reason) = ctx.check() {
                return Err(PatchError::Cancelled { backend, reason });
            }

            debug!("{}", install_notice(backend));

            let result = match backend {
                Backend::Apt => {
                    let options = apt_options(task);
                    self.attempt(ctx, backend, || self.executor.run_apt_upgrade(&options))
                        .await
                }
                Backend::Yum => {
                    let options = yum_options(task);
                    self.attempt(ctx, backend, || self.executor.run_yum_update(&options))
                        .await
                }
                Backend::Zypper => {
                    let options = zypper_options(task);
                    self.attempt(ctx, backend, || self.executor.run_zypper_patch(&options))
                        .await
                }
            };

            match result {
                Ok(()) => info!(%backend, "package updates applied"),
                Err(RetryError::Exhausted {
                    attempts, source, ..
                }) => {
                    error!(%backend, attempts, error = %source, "package updates failed");
                    failures.push(BackendFailure::new(backend, source.to_string(), attempts));
                }
                Err(RetryError::Cancelled { reason, .. }) => {
                    if !failures.is_empty() {
                        warn!(failed = ?failures.backends(), "earlier backends failed before cancellation");
                    }
                    return Err(PatchError::Cancelled { backend, reason });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PatchError::Failed(failures))
        }
    }

    async fn attempt<F, Fut>(
        &self,
        ctx: &TaskContext,
        backend: Backend,
        operation: F,
    ) -> Result<(), RetryError<PackageError>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), PackageError>>,
    {
        retry(ctx, &self.policy, backend.update_description(), operation).await
    }
}

fn install_notice(backend: Backend) -> &'static str {
    match backend {
        Backend::Apt => "Installing APT package updates.",
        Backend::Yum => "Installing YUM package updates.",
        Backend::Zypper => "Installing Zypper updates.",
    }
}
