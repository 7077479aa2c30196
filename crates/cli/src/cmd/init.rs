//! Implementation of the `extforge init` command.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use extforge_lib::init::{InitOptions, init};

use crate::output::{print_info, print_success};

pub fn cmd_init(dir: &Path, name: Option<String>) -> Result<()> {
  info!(dir = %dir.display(), "initializing project");
  let options = InitOptions {
    project_dir: dir.to_path_buf(),
    name,
  };
  let result = init(&options).with_context(|| format!("Failed to initialize project in {}", dir.display()))?;

  print_success(&format!("Initialized project in {}", result.project_dir.display()));
  for file in &result.files {
    let rel = file.strip_prefix(&result.project_dir).unwrap_or(file);
    print_info(&format!("created {}", rel.display()));
  }
  Ok(())
}
