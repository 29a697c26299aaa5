//! tendpatch-exec: Local command execution
//!
//! Runs package-manager commands on the current host. Commands are spawned
//! directly (no shell), so arguments never need quoting.

pub mod command;
pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use command::CommandSpec;
pub use error::ExecError;
pub use local::LocalExecutor;
pub use result::CommandResult;
pub use traits::CommandRunner;
