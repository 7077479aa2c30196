//! Project loading.
//!
//! A project is a directory with an optional `extforge.toml`, a manifest file
//! and the extension's sources. This module is the only place that reads the
//! filesystem; the loaded values are then handed to the pure
//! [`Composer`](crate::compose::Composer).

mod config;
mod sources;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::compose::Composer;
use crate::config::{BuildConfig, BuildOptions};
use crate::consts::CONFIG_FILE_NAME;
use crate::error::ConfigError;
use crate::manifest::Manifest;
use crate::options::ComposeOptions;
use crate::sources::{SourceSet, normalize_path};
use crate::stage::StageRegistry;

pub use config::ProjectConfig;
pub use sources::discover_sources;

/// Errors that can occur while loading a project.
#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("project directory not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}: {source}", path.display())]
  ParseConfig { path: PathBuf, source: toml::de::Error },

  #[error("failed to scan sources under {}: {message}", path.display())]
  Scan { path: PathBuf, message: String },

  #[error("invalid manifest {}: {source}", path.display())]
  Manifest { path: PathBuf, source: ConfigError },

  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// A loaded project, ready to compose.
#[derive(Debug, Clone)]
pub struct Project {
  /// Canonical project root.
  pub root: PathBuf,
  pub config: ProjectConfig,
  pub manifest: Manifest,
  pub options: ComposeOptions,
  pub sources: SourceSet,
}

impl Project {
  /// Load the project rooted at `root`.
  ///
  /// A missing `extforge.toml` means all defaults. Options are validated here,
  /// so an unrecognized option fails the load.
  pub fn load(root: &Path) -> Result<Self, ProjectError> {
    let root = dunce::canonicalize(root).map_err(|_| ProjectError::NotFound {
      path: root.to_path_buf(),
    })?;
    if !root.is_dir() {
      return Err(ProjectError::NotFound { path: root });
    }

    let config_path = root.join(CONFIG_FILE_NAME);
    let config = if config_path.is_file() {
      ProjectConfig::load(&config_path)?
    } else {
      debug!(path = ?config_path, "no project config, using defaults");
      ProjectConfig::default()
    };

    let manifest_path = root.join(&config.manifest);
    let manifest_text = fs::read_to_string(&manifest_path).map_err(|source| ProjectError::Read {
      path: manifest_path.clone(),
      source,
    })?;
    let manifest = Manifest::from_json(&manifest_text).map_err(|source| ProjectError::Manifest {
      path: manifest_path.clone(),
      source,
    })?;

    let options = ComposeOptions::from_map(&config.options)?;
    let mut exclude = config.exclude.clone();
    let out_dir = normalize_path(&config.out_dir);
    if !out_dir.is_empty() && !exclude.contains(&out_dir) {
      exclude.push(out_dir);
    }
    let sources = discover_sources(&root, &exclude)?;

    info!(
      root = %root.display(),
      manifest = %manifest.name,
      sources = sources.len(),
      "loaded project"
    );

    Ok(Self {
      root,
      config,
      manifest,
      options,
      sources,
    })
  }

  pub fn build_options(&self) -> BuildOptions {
    BuildOptions {
      root: self.root.display().to_string(),
      out_dir: self.config.out_dir.clone(),
      sourcemap: self.config.sourcemap,
      minify: self.config.minify,
    }
  }

  /// A composer over this project's sources and build options.
  pub fn composer(&self) -> Composer {
    Composer::new(StageRegistry::with_defaults(), self.sources.clone()).with_build_options(self.build_options())
  }

  pub fn compose(&self) -> Result<BuildConfig, ConfigError> {
    self.composer().compose(&self.manifest, &self.options)
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.root.join(&self.config.manifest)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;
  use crate::stage::Capability;

  const MANIFEST: &str = r#"{
    "manifest_version": 3,
    "name": "Tab Notes",
    "version": "0.1.0",
    "background": { "service_worker": "src/background.ts", "type": "module" },
    "action": { "default_popup": "src/popup.vue" }
  }"#;

  const CONFIG: &str = r#"
out_dir = "build"
sourcemap = true

[options]
componentCompilerTarget = "vue3"
iconCompiler = "vue3"
"#;

  fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  /// Every file under `root` with its contents, directories included as empty entries.
  fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    walkdir::WalkDir::new(root)
      .sort_by_file_name()
      .into_iter()
      .map(|entry| {
        let entry = entry.unwrap();
        let content = if entry.file_type().is_file() {
          fs::read(entry.path()).unwrap()
        } else {
          Vec::new()
        };
        (entry.path().to_path_buf(), content)
      })
      .collect()
  }

  fn project_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "manifest.json", MANIFEST);
    write(temp.path(), CONFIG_FILE_NAME, CONFIG);
    write(temp.path(), "src/background.ts", "export {}");
    write(temp.path(), "src/popup.vue", "<template><div/></template>");
    temp
  }

  #[test]
  fn loads_and_composes_project() {
    let temp = project_dir();
    let project = Project::load(temp.path()).unwrap();

    assert_eq!(project.manifest.name, "Tab Notes");
    assert!(project.sources.contains("src/popup.vue"));
    assert_eq!(project.config.out_dir, "build");

    let config = project.compose().unwrap();
    assert_eq!(config.len(), 3);
    assert!(config.stage(Capability::IconGenerate).is_some());
    assert!(config.build().sourcemap);
    assert_eq!(config.build().out_dir, "build");
  }

  #[test]
  fn missing_config_uses_defaults() {
    let temp = project_dir();
    fs::remove_file(temp.path().join(CONFIG_FILE_NAME)).unwrap();

    let project = Project::load(temp.path()).unwrap();
    assert_eq!(project.options, ComposeOptions::default());

    // popup.vue now has no compiler stage to handle it
    assert!(matches!(project.compose(), Err(ConfigError::UnhandledEntryPoint { .. })));
  }

  #[test]
  fn unknown_option_fails_load() {
    let temp = project_dir();
    write(temp.path(), CONFIG_FILE_NAME, "[options]\nfoo = true\n");

    let err = Project::load(temp.path()).unwrap_err();
    assert!(matches!(err, ProjectError::Config(ConfigError::UnknownOption { ref key }) if key == "foo"));
  }

  #[test]
  fn missing_manifest_is_read_error() {
    let temp = TempDir::new().unwrap();
    let err = Project::load(temp.path()).unwrap_err();
    assert!(matches!(err, ProjectError::Read { .. }));
  }

  #[test]
  fn malformed_manifest_names_file() {
    let temp = project_dir();
    write(temp.path(), "manifest.json", "{");

    let err = Project::load(temp.path()).unwrap_err();
    assert!(matches!(err, ProjectError::Manifest { .. }));
    assert!(err.to_string().contains("manifest.json"));
  }

  #[test]
  fn nonexistent_root_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = Project::load(&temp.path().join("nope")).unwrap_err();
    assert!(matches!(err, ProjectError::NotFound { .. }));
  }

  #[test]
  fn missing_entry_source_fails_compose() {
    let temp = project_dir();
    fs::remove_file(temp.path().join("src/background.ts")).unwrap();

    let project = Project::load(temp.path()).unwrap();
    let err = project.compose().unwrap_err();
    assert_eq!(
      err,
      ConfigError::MissingEntryPoint {
        name: "background".to_string(),
        path: "src/background.ts".to_string(),
      }
    );
  }

  #[test]
  fn output_directory_is_not_a_source() {
    let temp = project_dir();
    write(temp.path(), "build/background.js", "");
    write(temp.path(), "build/manifest.json", "{}");

    let project = Project::load(temp.path()).unwrap();
    assert!(!project.sources.iter().any(|path| path.starts_with("build/")));
    assert!(project.sources.contains("src/background.ts"));
  }

  #[test]
  fn failed_compose_leaves_project_untouched() {
    let temp = project_dir();
    fs::remove_file(temp.path().join("src/background.ts")).unwrap();
    let project = Project::load(temp.path()).unwrap();
    let before = snapshot(&project.root);

    assert!(project.compose().is_err());
    assert!(project.compose().is_err());

    assert_eq!(snapshot(&project.root), before);
  }

  #[test]
  fn failed_load_leaves_project_untouched() {
    let temp = project_dir();
    write(temp.path(), CONFIG_FILE_NAME, "[options]\nfoo = true\n");
    let before = snapshot(temp.path());

    assert!(Project::load(temp.path()).is_err());

    assert_eq!(snapshot(temp.path()), before);
  }

  #[test]
  fn composing_leaves_project_untouched() {
    let temp = project_dir();
    let project = Project::load(temp.path()).unwrap();
    let before = discover_sources(&project.root, &[]).unwrap();

    project.compose().unwrap();
    project.compose().unwrap();

    assert_eq!(discover_sources(&project.root, &[]).unwrap(), before);
  }
}
