//! Scaffold a new extension project.
//!
//! This module provides the logic for `extforge init`, which writes:
//! - `extforge.toml` with component compilation and icon generation enabled
//! - `manifest.json` referencing the two source entry points
//! - `src/background.ts` and `src/popup.vue`

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::consts::{CONFIG_FILE_NAME, DEFAULT_MANIFEST_FILE};

pub use templates::{BACKGROUND_TEMPLATE, CONFIG_TEMPLATE, MANIFEST_TEMPLATE, POPUP_TEMPLATE};

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("file already exists: {}", path.display())]
  PathExists { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error("failed to canonicalize path {}: {source}", path.display())]
  Canonicalize { path: PathBuf, source: std::io::Error },
}

/// Options for scaffolding a project.
pub struct InitOptions {
  /// Directory to create the project in (created if missing).
  pub project_dir: PathBuf,
  /// Extension name; defaults to the directory name.
  pub name: Option<String>,
}

/// Result of a successful initialization.
#[derive(Debug)]
pub struct InitResult {
  /// The project directory (canonicalized)
  pub project_dir: PathBuf,
  /// Files written, in creation order
  pub files: Vec<PathBuf>,
}

/// Scaffold a new project.
///
/// # Errors
///
/// Returns an error if `extforge.toml` or `manifest.json` already exist, or
/// if a directory or file cannot be written. Existing source files are never
/// overwritten.
pub fn init(options: &InitOptions) -> Result<InitResult, InitError> {
  let dir = &options.project_dir;
  fs::create_dir_all(dir).map_err(|source| InitError::CreateDir {
    path: dir.clone(),
    source,
  })?;
  let project_dir = dunce::canonicalize(dir).map_err(|source| InitError::Canonicalize {
    path: dir.clone(),
    source,
  })?;

  for name in [CONFIG_FILE_NAME, DEFAULT_MANIFEST_FILE] {
    let path = project_dir.join(name);
    if path.exists() {
      return Err(InitError::PathExists { path });
    }
  }

  let name = options.name.clone().unwrap_or_else(|| {
    project_dir
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_else(|| "extension".to_string())
  });
  let manifest = MANIFEST_TEMPLATE.replace("{name}", &json_escape(&name));

  let mut files = Vec::new();
  write_file(&project_dir.join(CONFIG_FILE_NAME), CONFIG_TEMPLATE, &mut files)?;
  write_file(&project_dir.join(DEFAULT_MANIFEST_FILE), &manifest, &mut files)?;

  let src_dir = project_dir.join("src");
  fs::create_dir_all(&src_dir).map_err(|source| InitError::CreateDir {
    path: src_dir.clone(),
    source,
  })?;
  for (file, content) in [("background.ts", BACKGROUND_TEMPLATE), ("popup.vue", POPUP_TEMPLATE)] {
    let path = src_dir.join(file);
    if path.exists() {
      info!(path = %path.display(), "keeping existing source file");
      continue;
    }
    write_file(&path, content, &mut files)?;
  }

  Ok(InitResult { project_dir, files })
}

fn write_file(path: &Path, content: &str, files: &mut Vec<PathBuf>) -> Result<(), InitError> {
  fs::write(path, content).map_err(|source| InitError::WriteFile {
    path: path.to_path_buf(),
    source,
  })?;
  files.push(path.to_path_buf());
  Ok(())
}

fn json_escape(value: &str) -> String {
  let quoted = serde_json::to_string(value).unwrap_or_default();
  quoted
    .strip_prefix('"')
    .and_then(|s| s.strip_suffix('"'))
    .unwrap_or_default()
    .to_string()
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::project::Project;
  use crate::stage::Capability;

  #[test]
  fn scaffolded_project_composes() {
    let temp = TempDir::new().unwrap();
    let result = init(&InitOptions {
      project_dir: temp.path().join("my-ext"),
      name: None,
    })
    .unwrap();

    assert_eq!(result.files.len(), 4);

    let project = Project::load(&result.project_dir).unwrap();
    assert_eq!(project.manifest.name, "my-ext");

    let config = project.compose().unwrap();
    assert_eq!(
      config.stages().iter().map(|s| s.capability).collect::<Vec<_>>(),
      vec![Capability::ComponentCompile, Capability::IconGenerate, Capability::Package]
    );
  }

  #[test]
  fn refuses_to_overwrite_manifest() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("manifest.json"), "{}").unwrap();

    let err = init(&InitOptions {
      project_dir: temp.path().to_path_buf(),
      name: Some("x".to_string()),
    })
    .unwrap_err();
    assert!(matches!(err, InitError::PathExists { .. }));
  }

  #[test]
  fn name_is_json_escaped() {
    let temp = TempDir::new().unwrap();
    let result = init(&InitOptions {
      project_dir: temp.path().to_path_buf(),
      name: Some("Say \"hi\"".to_string()),
    })
    .unwrap();

    let project = Project::load(&result.project_dir).unwrap();
    assert_eq!(project.manifest.name, "Say \"hi\"");
  }

  #[test]
  fn existing_sources_are_kept() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/popup.vue"), "<template>mine</template>").unwrap();

    let result = init(&InitOptions {
      project_dir: temp.path().to_path_buf(),
      name: None,
    })
    .unwrap();

    assert_eq!(result.files.len(), 3);
    let popup = fs::read_to_string(temp.path().join("src/popup.vue")).unwrap();
    assert_eq!(popup, "<template>mine</template>");
  }
}
