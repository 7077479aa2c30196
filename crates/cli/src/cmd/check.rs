//! Implementation of the `extforge check` command.

use std::path::Path;

use anyhow::{Context, Result};

use extforge_lib::Project;

use crate::output::print_success;

pub fn cmd_check(dir: &Path) -> Result<()> {
  let project = Project::load(dir).with_context(|| format!("Failed to load project: {}", dir.display()))?;
  let config = project.compose().context("Failed to compose build configuration")?;
  let hash = config.hash().context("Failed to hash build configuration")?;

  print_success(&format!(
    "{} {}: {} stage(s), config {}",
    project.manifest.name,
    project.manifest.version,
    config.len(),
    hash
  ));
  Ok(())
}
