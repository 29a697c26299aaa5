//! Command runner trait

use std::time::Duration;

use async_trait::async_trait;

use crate::command::CommandSpec;
use crate::error::ExecError;
use crate::result::CommandResult;

/// Something that can run a command on the host and report its outcome
///
/// A non-zero exit status is not an error at this level; callers inspect
/// [`CommandResult::status`] themselves.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandResult, ExecError>;

    /// Run a command, giving up once `timeout` has elapsed
    async fn run_with_timeout(
        &self,
        cmd: &CommandSpec,
        timeout: Duration,
    ) -> Result<CommandResult, ExecError>;

    /// Short name used in logs
    fn runner_type(&self) -> &'static str;
}
