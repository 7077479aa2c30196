use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;
use crate::options::{ComponentTarget, IconCompiler};
use crate::util::hash::{HashError, Hashable, ObjectHash};

/// Tag under which a stage provider is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
  ComponentCompile,
  IconGenerate,
  Package,
}

impl Capability {
  /// Pipeline order. Source-rewriting capabilities come first, packaging last.
  pub const PIPELINE: &[Capability] = &[
    Capability::ComponentCompile,
    Capability::IconGenerate,
    Capability::Package,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Capability::ComponentCompile => "component-compile",
      Capability::IconGenerate => "icon-generate",
      Capability::Package => "package",
    }
  }

  pub fn phase(&self) -> Phase {
    match self {
      Capability::ComponentCompile | Capability::IconGenerate => Phase::Rewrite,
      Capability::Package => Phase::Package,
    }
  }
}

impl fmt::Display for Capability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Whether a stage rewrites source or packages the rewritten output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
  Rewrite,
  Package,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Phase::Rewrite => write!(f, "rewrite"),
      Phase::Package => write!(f, "package"),
    }
  }
}

/// Identifies the manifest a packaging stage was composed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRef {
  pub name: String,
  pub version: String,
  pub manifest_version: u8,
  /// Content hash of the parsed manifest.
  pub hash: ObjectHash,
}

impl ManifestRef {
  pub fn from_manifest(manifest: &Manifest) -> Result<Self, HashError> {
    Ok(Self {
      name: manifest.name.clone(),
      version: manifest.version.clone(),
      manifest_version: manifest.manifest_version,
      hash: manifest.compute_hash()?,
    })
  }
}

/// Stage-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StageParams {
  ComponentCompiler {
    target: ComponentTarget,
    /// File extensions (without the dot) this stage compiles.
    extensions: Vec<String>,
  },
  IconResolver {
    compiler: IconCompiler,
    /// Import prefix resolved to generated icon components.
    module_prefix: String,
  },
  Package {
    manifest: ManifestRef,
    /// Logical entry-point name to project-relative path.
    entry_points: BTreeMap<String, String>,
  },
}

/// One stage of a composed build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDescriptor {
  /// Stable name, e.g. `component-compiler:vue3`.
  pub name: String,
  pub capability: Capability,
  pub phase: Phase,
  pub params: StageParams,
}

impl StageDescriptor {
  pub fn new(name: impl Into<String>, capability: Capability, params: StageParams) -> Self {
    Self {
      name: name.into(),
      capability,
      phase: capability.phase(),
      params,
    }
  }

  pub fn is_packaging(&self) -> bool {
    self.phase == Phase::Package
  }

  pub fn rewrites_source(&self) -> bool {
    self.phase == Phase::Rewrite
  }

  /// The manifest reference carried by a packaging stage.
  pub fn manifest(&self) -> Option<&ManifestRef> {
    match &self.params {
      StageParams::Package { manifest, .. } => Some(manifest),
      _ => None,
    }
  }
}
