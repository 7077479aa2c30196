//! Build configuration composition.
//!
//! [`Composer::compose`] turns a manifest and compose options into a
//! [`BuildConfig`]. It is a pure function of its inputs: the source set is
//! supplied by the caller, so composition reads no files and touches no
//! environment. Repeated calls with the same inputs yield identical
//! configurations.

use tracing::{debug, info};

use crate::config::{BuildConfig, BuildOptions};
use crate::error::ConfigError;
use crate::manifest::{EntryPoints, Manifest, entry_extension};
use crate::options::ComposeOptions;
use crate::sources::SourceSet;
use crate::stage::{Capability, ManifestRef, StageContext, StageRegistry};

/// Composes build configurations against a fixed registry and source set.
#[derive(Debug)]
pub struct Composer {
  registry: StageRegistry,
  sources: SourceSet,
  build: BuildOptions,
}

impl Composer {
  pub fn new(registry: StageRegistry, sources: SourceSet) -> Self {
    Self {
      registry,
      sources,
      build: BuildOptions::default(),
    }
  }

  pub fn with_build_options(mut self, build: BuildOptions) -> Self {
    self.build = build;
    self
  }

  pub fn registry(&self) -> &StageRegistry {
    &self.registry
  }

  pub fn sources(&self) -> &SourceSet {
    &self.sources
  }

  pub fn build_options(&self) -> &BuildOptions {
    &self.build
  }

  /// Compose a build configuration.
  ///
  /// Checks run in this order and the first failure is returned:
  /// 1. every requested capability has a registered provider
  /// 2. the icon compiler agrees with the component compiler target
  /// 3. the manifest is structurally valid
  /// 4. every entry point exists in the source set
  /// 5. every entry point that needs a rewriting stage has it enabled
  ///
  /// Stages are then described in pipeline order: component compiler, icon
  /// resolver, packager.
  ///
  /// # Errors
  ///
  /// Returns a [`ConfigError`] describing the first violated rule.
  pub fn compose(&self, manifest: &Manifest, options: &ComposeOptions) -> Result<BuildConfig, ConfigError> {
    let requested = requested_capabilities(options);
    for capability in &requested {
      self.registry.get(*capability)?;
    }

    check_icon_runtime(options)?;
    manifest.validate()?;

    let entry_points = manifest.entry_points();
    self.check_entry_points_exist(&entry_points)?;
    self.check_entry_points_handled(&entry_points, &requested)?;

    let manifest_ref = ManifestRef::from_manifest(manifest)?;
    let ctx = StageContext {
      manifest,
      manifest_ref: &manifest_ref,
      options,
      entry_points: &entry_points,
    };

    let mut stages = Vec::with_capacity(requested.len());
    for capability in requested {
      let stage = self.registry.get(capability)?.describe(&ctx)?;
      if stage.capability != capability {
        return Err(ConfigError::CapabilityMismatch {
          stage: stage.name,
          expected: capability,
          actual: stage.capability,
        });
      }
      debug!(stage = %stage.name, phase = %stage.phase, "added stage");
      stages.push(stage);
    }

    let config = BuildConfig::new(stages, self.build.clone(), options.clone())?;
    info!(
      manifest = %manifest.name,
      stages = config.len(),
      hash = %config.hash()?,
      "composed build configuration"
    );
    Ok(config)
  }

  fn check_entry_points_exist(&self, entry_points: &EntryPoints) -> Result<(), ConfigError> {
    for (name, path) in entry_points {
      if !self.sources.contains(path) {
        return Err(ConfigError::MissingEntryPoint {
          name: name.clone(),
          path: path.clone(),
        });
      }
    }
    Ok(())
  }

  fn check_entry_points_handled(&self, entry_points: &EntryPoints, requested: &[Capability]) -> Result<(), ConfigError> {
    for (name, path) in entry_points {
      let Some(extension) = entry_extension(path) else {
        continue;
      };
      if let Some(capability) = self.registry.handler_for(&extension)
        && !requested.contains(&capability)
      {
        return Err(ConfigError::UnhandledEntryPoint {
          name: name.clone(),
          path: path.clone(),
          capability,
        });
      }
    }
    Ok(())
  }
}

/// Compose with the default stage registry.
pub fn compose(manifest: &Manifest, options: &ComposeOptions, sources: &SourceSet) -> Result<BuildConfig, ConfigError> {
  Composer::new(StageRegistry::with_defaults(), sources.clone()).compose(manifest, options)
}

/// Capabilities the options ask for, in pipeline order. Packaging is always requested.
fn requested_capabilities(options: &ComposeOptions) -> Vec<Capability> {
  Capability::PIPELINE
    .iter()
    .copied()
    .filter(|capability| match capability {
      Capability::ComponentCompile => options.component_compiler_target.is_some(),
      Capability::IconGenerate => options.icon_compiler.is_some(),
      Capability::Package => true,
    })
    .collect()
}

fn check_icon_runtime(options: &ComposeOptions) -> Result<(), ConfigError> {
  if let (Some(icon), Some(target)) = (options.icon_compiler, options.component_compiler_target)
    && let Some(runtime) = icon.component_runtime()
    && runtime != target
  {
    return Err(ConfigError::IncompatibleIconCompiler {
      icon: icon.to_string(),
      target: target.to_string(),
    });
  }
  Ok(())
}
