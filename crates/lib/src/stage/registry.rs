//! Explicit registry of stage providers keyed by capability.
//!
//! Providers are registered up front and resolved by capability tag at
//! composition time. Nothing is discovered at runtime.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::providers::{ComponentCompilerStage, IconResolverStage, PackageStage};
use super::types::{Capability, ManifestRef, StageDescriptor};
use crate::error::ConfigError;
use crate::manifest::{EntryPoints, Manifest};
use crate::options::ComposeOptions;

/// Everything a provider may read while describing its stage.
pub struct StageContext<'a> {
  pub manifest: &'a Manifest,
  pub manifest_ref: &'a ManifestRef,
  pub options: &'a ComposeOptions,
  pub entry_points: &'a EntryPoints,
}

/// Produces the descriptor for one capability.
pub trait StageProvider: Send + Sync {
  fn capability(&self) -> Capability;

  fn describe(&self, ctx: &StageContext<'_>) -> Result<StageDescriptor, ConfigError>;

  /// Entry-point file extensions (lowercase, no dot) that only this stage can
  /// turn into something the packager understands.
  fn handled_extensions(&self) -> &[&'static str] {
    &[]
  }
}

pub struct StageRegistry {
  providers: BTreeMap<Capability, Box<dyn StageProvider>>,
}

impl StageRegistry {
  /// An empty registry.
  pub fn new() -> Self {
    Self {
      providers: BTreeMap::new(),
    }
  }

  /// A registry with the built-in component compiler, icon resolver and packager.
  pub fn with_defaults() -> Self {
    let mut registry = Self::new();
    registry.register(Box::new(ComponentCompilerStage));
    registry.register(Box::new(IconResolverStage));
    registry.register(Box::new(PackageStage));
    registry
  }

  /// Register a provider under its capability, returning the one it replaces.
  pub fn register(&mut self, provider: Box<dyn StageProvider>) -> Option<Box<dyn StageProvider>> {
    let capability = provider.capability();
    let previous = self.providers.insert(capability, provider);
    if previous.is_some() {
      debug!(capability = %capability, "replaced stage provider");
    }
    previous
  }

  pub fn get(&self, capability: Capability) -> Result<&dyn StageProvider, ConfigError> {
    self
      .providers
      .get(&capability)
      .map(|p| &**p)
      .ok_or(ConfigError::MissingStage(capability))
  }

  pub fn contains(&self, capability: Capability) -> bool {
    self.providers.contains_key(&capability)
  }

  pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
    self.providers.keys().copied()
  }

  /// The registered capability whose provider handles `extension`, if any.
  pub fn handler_for(&self, extension: &str) -> Option<Capability> {
    self
      .providers
      .values()
      .find(|p| p.handled_extensions().iter().any(|e| *e == extension))
      .map(|p| p.capability())
  }
}

impl Default for StageRegistry {
  fn default() -> Self {
    Self::with_defaults()
  }
}

impl fmt::Debug for StageRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StageRegistry")
      .field("capabilities", &self.providers.keys().collect::<Vec<_>>())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::stage::types::StageParams;

  struct FixedPackager;

  impl StageProvider for FixedPackager {
    fn capability(&self) -> Capability {
      Capability::Package
    }

    fn describe(&self, ctx: &StageContext<'_>) -> Result<StageDescriptor, ConfigError> {
      Ok(StageDescriptor::new(
        "package:fixed",
        Capability::Package,
        StageParams::Package {
          manifest: ctx.manifest_ref.clone(),
          entry_points: EntryPoints::new(),
        },
      ))
    }
  }

  #[test]
  fn defaults_cover_every_capability() {
    let registry = StageRegistry::with_defaults();
    for capability in Capability::PIPELINE {
      assert!(registry.contains(*capability), "missing {capability}");
    }
  }

  #[test]
  fn empty_registry_reports_missing_stage() {
    let registry = StageRegistry::new();
    let err = registry.get(Capability::Package).err().unwrap();
    assert_eq!(err, ConfigError::MissingStage(Capability::Package));
  }

  #[test]
  fn register_replaces_existing_provider() {
    let mut registry = StageRegistry::with_defaults();
    let previous = registry.register(Box::new(FixedPackager));
    assert!(previous.is_some());
    assert_eq!(registry.capabilities().count(), 3);
  }

  #[test]
  fn vue_files_are_handled_by_component_compiler() {
    let registry = StageRegistry::with_defaults();
    assert_eq!(registry.handler_for("vue"), Some(Capability::ComponentCompile));
    assert_eq!(registry.handler_for("ts"), None);
  }
}
