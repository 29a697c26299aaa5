//! tendpatch-core: Patch orchestration
//!
//! Detects the package backends present on the host, builds per-backend
//! options from a patch task, invokes each update with bounded retries and
//! aggregates the failures. `PatchActor` wraps the runner so patch tasks
//! are applied one at a time.

pub mod actor;
pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod options;
pub mod patch;
pub mod retry;

pub use actor::{PatchActor, PatchActorArgs};
pub use config::{AptSettings, AptUpgradeType, PatchTaskConfig, YumSettings, ZypperSettings};
pub use context::{CancelReason, TaskContext};
pub use error::{BackendFailure, CoreError, FailureLog, PatchError};
pub use message::RunPatchTask;
pub use patch::{PatchRunner, RETRY_PERIOD};
pub use retry::{RetryError, RetryPolicy, retry};
