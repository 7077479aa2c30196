//! The composition error type.

use thiserror::Error;

use crate::stage::Capability;

/// Errors raised while composing a build configuration.
///
/// Every variant is detected synchronously, before any source file is read,
/// and rejects the whole configuration. Nothing is dropped or repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  /// The manifest is not structurally valid.
  #[error("invalid manifest: {reason}")]
  InvalidManifest { reason: String },

  /// The manifest references no entry points at all.
  #[error("manifest declares no entry points")]
  NoEntryPoints,

  /// An entry point references a file that is not among the discoverable sources.
  #[error("entry point '{name}' references missing file: {path}")]
  MissingEntryPoint { name: String, path: String },

  /// An entry point needs a rewriting stage that was not requested.
  #[error("entry point '{name}' ({path}) requires the {capability} stage, which is not enabled")]
  UnhandledEntryPoint {
    name: String,
    path: String,
    capability: Capability,
  },

  /// An option key is not recognized.
  #[error("unrecognized option: {key}")]
  UnknownOption { key: String },

  /// A recognized option has an unusable value.
  #[error("invalid value for option '{key}': {message}")]
  InvalidOption { key: String, message: String },

  /// The icon compiler renders for a different runtime than the component compiler targets.
  #[error("icon compiler '{icon}' is incompatible with component compiler target '{target}'")]
  IncompatibleIconCompiler { icon: String, target: String },

  /// No provider is registered for a requested capability.
  #[error("no stage registered for capability '{0}'")]
  MissingStage(Capability),

  /// A provider described a stage for a different capability than it was registered under.
  #[error("stage '{stage}' was registered for {expected} but describes {actual}")]
  CapabilityMismatch {
    stage: String,
    expected: Capability,
    actual: Capability,
  },

  /// A stage sequence violates the ordering rules.
  #[error("invalid stage order: {0}")]
  InvalidStageOrder(String),

  /// The configuration could not be serialized for hashing.
  #[error("failed to hash configuration: {0}")]
  Hash(String),
}

impl From<crate::util::hash::HashError> for ConfigError {
  fn from(err: crate::util::hash::HashError) -> Self {
    ConfigError::Hash(err.to_string())
  }
}
