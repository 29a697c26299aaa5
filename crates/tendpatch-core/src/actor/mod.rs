//! Actor implementations

pub mod patch;

pub use patch::{PatchActor, PatchActorArgs};
