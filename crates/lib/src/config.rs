//! The composed build configuration.
//!
//! A [`BuildConfig`] is the ordered, immutable description of stages handed to
//! an external build driver. It can only be constructed through
//! [`BuildConfig::new`] (or deserialized, which goes through the same checks),
//! so every value upholds:
//! - the stage sequence is non-empty
//! - there is at most one packaging stage
//! - the packaging stage, if present, is last

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_OUT_DIR;
use crate::error::ConfigError;
use crate::options::ComposeOptions;
use crate::stage::{Capability, StageDescriptor, StageParams};
use crate::util::hash::{Hashable, ObjectHash};

/// Top-level options passed through to the build driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
  /// Project root; entry-point paths are relative to it.
  pub root: String,
  pub out_dir: String,
  pub sourcemap: bool,
  pub minify: bool,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      root: ".".to_string(),
      out_dir: DEFAULT_OUT_DIR.to_string(),
      sourcemap: false,
      minify: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBuildConfig")]
pub struct BuildConfig {
  stages: Vec<StageDescriptor>,
  build: BuildOptions,
  options: ComposeOptions,
}

/// Unchecked shape used when deserializing.
#[derive(Deserialize)]
struct RawBuildConfig {
  stages: Vec<StageDescriptor>,
  build: BuildOptions,
  options: ComposeOptions,
}

impl TryFrom<RawBuildConfig> for BuildConfig {
  type Error = ConfigError;

  fn try_from(raw: RawBuildConfig) -> Result<Self, Self::Error> {
    BuildConfig::new(raw.stages, raw.build, raw.options)
  }
}

impl Hashable for BuildConfig {}

impl BuildConfig {
  /// Assemble a configuration, enforcing the stage ordering rules.
  pub fn new(stages: Vec<StageDescriptor>, build: BuildOptions, options: ComposeOptions) -> Result<Self, ConfigError> {
    if stages.is_empty() {
      return Err(ConfigError::InvalidStageOrder("stage sequence is empty".to_string()));
    }

    let packaging: Vec<usize> = stages
      .iter()
      .enumerate()
      .filter(|(_, s)| s.is_packaging())
      .map(|(i, _)| i)
      .collect();

    if packaging.len() > 1 {
      return Err(ConfigError::InvalidStageOrder(format!(
        "found {} packaging stages, at most one is allowed",
        packaging.len()
      )));
    }

    if let Some(&index) = packaging.first()
      && index != stages.len() - 1
    {
      return Err(ConfigError::InvalidStageOrder(format!(
        "packaging stage '{}' must be last, but '{}' follows it",
        stages[index].name,
        stages[index + 1].name
      )));
    }

    for stage in &stages {
      if stage.phase != stage.capability.phase() || !params_match(stage) {
        return Err(ConfigError::InvalidStageOrder(format!(
          "stage '{}' is inconsistent with its capability '{}'",
          stage.name, stage.capability
        )));
      }
    }

    Ok(Self { stages, build, options })
  }

  /// Stages in execution order.
  pub fn stages(&self) -> &[StageDescriptor] {
    &self.stages
  }

  pub fn build(&self) -> &BuildOptions {
    &self.build
  }

  /// The options this configuration was composed with.
  pub fn options(&self) -> &ComposeOptions {
    &self.options
  }

  pub fn packaging_stage(&self) -> Option<&StageDescriptor> {
    self.stages.last().filter(|s| s.is_packaging())
  }

  pub fn rewrite_stages(&self) -> impl Iterator<Item = &StageDescriptor> {
    self.stages.iter().filter(|s| s.rewrites_source())
  }

  pub fn stage(&self, capability: Capability) -> Option<&StageDescriptor> {
    self.stages.iter().find(|s| s.capability == capability)
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  /// Always false for a constructed configuration.
  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Content hash of the whole configuration.
  pub fn hash(&self) -> Result<ObjectHash, ConfigError> {
    Ok(self.compute_hash()?)
  }
}

fn params_match(stage: &StageDescriptor) -> bool {
  matches!(
    (stage.capability, &stage.params),
    (Capability::ComponentCompile, StageParams::ComponentCompiler { .. })
      | (Capability::IconGenerate, StageParams::IconResolver { .. })
      | (Capability::Package, StageParams::Package { .. })
  )
}
