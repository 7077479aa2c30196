//! The `extforge.toml` project configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ProjectError;
use crate::consts::{DEFAULT_EXCLUDES, DEFAULT_MANIFEST_FILE, DEFAULT_OUT_DIR};

/// Project-level settings. Every key is optional.
///
/// ```toml
/// manifest = "manifest.json"
/// out_dir = "dist"
/// sourcemap = false
/// minify = true
/// exclude = ["node_modules", "dist", ".git"]
///
/// [options]
/// componentCompilerTarget = "vue3"
/// iconCompiler = "vue3"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
  /// Manifest path relative to the project root.
  pub manifest: String,
  pub out_dir: String,
  pub sourcemap: bool,
  pub minify: bool,
  /// Directory names skipped during source discovery.
  pub exclude: Vec<String>,
  /// Raw compose options, validated by [`crate::options::ComposeOptions::from_map`].
  pub options: BTreeMap<String, serde_json::Value>,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      manifest: DEFAULT_MANIFEST_FILE.to_string(),
      out_dir: DEFAULT_OUT_DIR.to_string(),
      sourcemap: false,
      minify: true,
      exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
      options: BTreeMap::new(),
    }
  }
}

impl ProjectConfig {
  pub fn parse(text: &str, path: &Path) -> Result<Self, ProjectError> {
    toml::from_str(text).map_err(|source| ProjectError::ParseConfig {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn load(path: &Path) -> Result<Self, ProjectError> {
    let text = fs::read_to_string(path).map_err(|source| ProjectError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&text, path)
  }
}
