//! CLI smoke tests for extforge.
//!
//! These tests run the binary against temporary projects and check exit codes
//! and the key lines of its output.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the extforge binary.
fn extforge_cmd() -> Command {
  cargo_bin_cmd!("extforge")
}

const MANIFEST: &str = r#"{
  "manifest_version": 3,
  "name": "Tab Notes",
  "version": "1.0.0",
  "background": { "service_worker": "bg.ts" },
  "action": { "default_popup": "popup.vue" }
}"#;

const CONFIG: &str = r#"
[options]
componentCompilerTarget = "vue3"
"#;

/// Create a temp project with the given config and the two entry files.
fn temp_project(config: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("manifest.json"), MANIFEST).unwrap();
  std::fs::write(temp.path().join("extforge.toml"), config).unwrap();
  std::fs::write(temp.path().join("bg.ts"), "export {}").unwrap();
  std::fs::write(temp.path().join("popup.vue"), "<template/>").unwrap();
  temp
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  extforge_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  extforge_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("extforge"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["compose", "check", "init"] {
    extforge_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// compose
// =============================================================================

#[test]
fn compose_lists_stages_in_order() {
  let temp = temp_project(CONFIG);

  extforge_cmd()
    .arg("compose")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Stages: 2"))
    .stdout(predicate::str::contains("1. component-compiler:vue3 [rewrite]"))
    .stdout(predicate::str::contains("2. package:mv3 [package]"));
}

#[test]
fn compose_json_is_parseable() {
  let temp = temp_project(CONFIG);

  let output = extforge_cmd()
    .arg("compose")
    .arg(temp.path())
    .arg("--format")
    .arg("json")
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let stages = json["stages"].as_array().unwrap();
  assert_eq!(stages.len(), 2);
  assert_eq!(stages[1]["capability"], "package");
  assert_eq!(stages[1]["params"]["manifest"]["name"], "Tab Notes");
  assert_eq!(json["options"]["componentCompilerTarget"], "vue3");
}

#[test]
fn compose_rejects_unknown_option() {
  let temp = temp_project("[options]\nfoo = true\n");

  extforge_cmd()
    .arg("compose")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("unrecognized option: foo"));
}

#[test]
fn compose_names_missing_entry_point() {
  let temp = temp_project(CONFIG);
  std::fs::remove_file(temp.path().join("bg.ts")).unwrap();

  extforge_cmd()
    .arg("compose")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("bg.ts"));
}

#[test]
fn compose_nonexistent_dir_fails() {
  let temp = TempDir::new().unwrap();

  extforge_cmd()
    .arg("compose")
    .arg(temp.path().join("missing"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_reports_stage_count() {
  let temp = temp_project(CONFIG);

  extforge_cmd()
    .arg("check")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Tab Notes 1.0.0: 2 stage(s)"));
}

#[test]
fn check_fails_without_component_compiler() {
  let temp = temp_project("");

  extforge_cmd()
    .arg("check")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("popup.vue"));
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_then_check_succeeds() {
  let temp = TempDir::new().unwrap();
  let dir = temp.path().join("my-ext");

  extforge_cmd().arg("init").arg(&dir).assert().success();

  assert!(dir.join("extforge.toml").exists());
  assert!(dir.join("manifest.json").exists());
  assert!(dir.join("src/popup.vue").exists());

  extforge_cmd()
    .arg("check")
    .arg(&dir)
    .assert()
    .success()
    .stdout(predicate::str::contains("3 stage(s)"));
}

#[test]
fn init_fails_if_project_exists() {
  let temp = temp_project(CONFIG);

  extforge_cmd()
    .arg("init")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));
}
