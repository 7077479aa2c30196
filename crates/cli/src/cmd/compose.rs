//! Implementation of the `extforge compose` command.
//!
//! Loads the project, composes the build configuration and prints it either as
//! a human-readable stage list or as JSON for an external build driver.

use std::path::Path;

use anyhow::{Context, Result};

use extforge_lib::stage::StageParams;
use extforge_lib::{BuildConfig, Project};

use crate::output::{OutputFormat, print_json, print_stat, symbols, truncate_hash};

pub fn cmd_compose(dir: &Path, format: OutputFormat) -> Result<()> {
  let project = Project::load(dir).with_context(|| format!("Failed to load project: {}", dir.display()))?;
  let config = project.compose().context("Failed to compose build configuration")?;

  if format.is_json() {
    return print_json(&config);
  }

  print_text(&project, &config)
}

fn print_text(project: &Project, config: &BuildConfig) -> Result<()> {
  let hash = config.hash().context("Failed to hash build configuration")?;

  println!("Config: {}", truncate_hash(&hash.0));
  println!(
    "Manifest: {} {} (mv{})",
    project.manifest.name, project.manifest.version, project.manifest.manifest_version
  );
  print_stat("Root", &config.build().root);
  print_stat("Out dir", &config.build().out_dir);
  print_stat("Sources", &project.sources.len().to_string());

  println!("Stages: {}", config.len());
  for (i, stage) in config.stages().iter().enumerate() {
    println!("  {}. {} [{}]", i + 1, stage.name, stage.phase);
  }

  if let Some(StageParams::Package { entry_points, .. }) = config.packaging_stage().map(|s| &s.params) {
    println!("Entry points: {}", entry_points.len());
    for (name, path) in entry_points {
      println!("  {} {} {}", name, symbols::ARROW, path);
    }
  }

  Ok(())
}
