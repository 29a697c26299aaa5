//! Test doubles shared by the backend tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tendpatch_exec::{CommandResult, CommandRunner, CommandSpec, ExecError};

/// Replays canned `(status, stderr)` results and records every command
///
/// Once the script runs out every command succeeds.
pub(crate) struct ScriptedRunner {
    script: Mutex<VecDeque<(i32, String)>>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn new<'a>(script: impl IntoIterator<Item = (i32, &'a str)>) -> Self {
        Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|(status, stderr)| (status, stderr.to_string()))
                    .collect(),
            ),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn succeeding() -> Self {
        Self::new(Vec::<(i32, &str)>::new())
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandResult, ExecError> {
        self.commands.lock().unwrap().push(cmd.to_string());
        let (status, stderr) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((0, String::new()));

        Ok(CommandResult {
            status,
            stdout: String::new(),
            stderr,
            duration: Duration::from_millis(1),
        })
    }

    async fn run_with_timeout(
        &self,
        cmd: &CommandSpec,
        _timeout: Duration,
    ) -> Result<CommandResult, ExecError> {
        self.run(cmd).await
    }

    fn runner_type(&self) -> &'static str {
        "scripted"
    }
}
