//! extforge-lib: build configuration composition for browser extensions
//!
//! This crate turns an extension manifest and a small set of compose options
//! into an ordered, immutable [`config::BuildConfig`] for an external build
//! driver:
//! - `Manifest`: typed model of `manifest.json` with structural validation
//! - `ComposeOptions`: the recognized compose options
//! - `StageRegistry`: stage providers keyed by capability tag
//! - `Composer`: the pure composition step
//! - `ConfigCache`: explicit cache a driver threads through its rebuild loop
//! - `Project`: loads a project directory from disk

pub mod cache;
pub mod compose;
pub mod config;
pub mod consts;
pub mod error;
pub mod init;
pub mod manifest;
pub mod options;
pub mod project;
pub mod sources;
pub mod stage;
pub mod util;

pub use cache::ConfigCache;
pub use compose::{Composer, compose};
pub use config::{BuildConfig, BuildOptions};
pub use error::ConfigError;
pub use manifest::Manifest;
pub use options::{ComponentTarget, ComposeOptions, IconCompiler};
pub use project::{Project, ProjectError};
pub use sources::SourceSet;
pub use stage::{Capability, StageDescriptor, StageRegistry};
