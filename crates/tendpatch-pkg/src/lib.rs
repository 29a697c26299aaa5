//! tendpatch-pkg: Package manager backends
//!
//! Option types, update executors (apt-get, yum, zypper) and host
//! capability probing.

pub mod apt;
pub mod error;
pub mod probe;
pub mod system;
pub mod traits;
pub mod types;
pub mod yum;
pub mod zypper;

pub use apt::AptManager;
pub use error::PackageError;
pub use probe::{CapabilityProber, PathProber};
pub use system::SystemUpdateExecutor;
pub use traits::UpdateExecutor;
pub use types::{
    AptGetUpgradeType, AptUpgradeOptions, Backend, Capabilities, YumUpdateOptions,
    ZypperPatchOptions,
};
pub use yum::YumManager;
pub use zypper::ZypperManager;

#[cfg(test)]
pub(crate) mod testing;
