//! Build stages.
//!
//! A stage is one discrete step of the build pipeline. The composer asks a
//! [`StageRegistry`] for the provider registered under each requested
//! [`Capability`] and collects the [`StageDescriptor`]s they produce.
//!
//! # Submodules
//!
//! - [`registry`] - capability-keyed provider registry and the provider trait
//! - [`providers`] - built-in component compiler, icon resolver and packager

pub mod providers;
pub mod registry;
mod types;

pub use registry::{StageContext, StageProvider, StageRegistry};
pub use types::*;
