//! Message types for actor communication

use crate::config::PatchTaskConfig;
use crate::context::TaskContext;

/// Apply one patch task to the host
#[derive(Debug)]
pub struct RunPatchTask {
    /// What to apply
    pub task: PatchTaskConfig,
    /// Cancellation and deadline for this task
    pub ctx: TaskContext,
}
