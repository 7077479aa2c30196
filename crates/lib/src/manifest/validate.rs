//! Structural validation of a parsed manifest.

use std::collections::BTreeSet;

use tracing::warn;

use super::types::Manifest;
use crate::error::ConfigError;

fn invalid(reason: impl Into<String>) -> ConfigError {
  ConfigError::InvalidManifest { reason: reason.into() }
}

/// Browser extension version: one to four dot-separated integers in
/// `0..=65535`, no leading zeros.
pub fn is_valid_version(version: &str) -> bool {
  let parts: Vec<&str> = version.split('.').collect();
  if parts.is_empty() || parts.len() > 4 {
    return false;
  }
  parts.iter().all(|part| {
    !part.is_empty()
      && part.bytes().all(|b| b.is_ascii_digit())
      && (part.len() == 1 || !part.starts_with('0'))
      && part.parse::<u32>().is_ok_and(|n| n <= 65535)
  })
}

impl Manifest {
  /// Check the structural rules that do not depend on the source tree.
  ///
  /// Entry-point existence is checked by the composer against its
  /// [`crate::sources::SourceSet`].
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !matches!(self.manifest_version, 2 | 3) {
      return Err(invalid(format!(
        "unsupported manifest_version {}, expected 2 or 3",
        self.manifest_version
      )));
    }

    if self.name.trim().is_empty() {
      return Err(invalid("name must not be empty"));
    }

    if !is_valid_version(&self.version) {
      return Err(invalid(format!(
        "version '{}' must be 1-4 dot-separated integers between 0 and 65535",
        self.version
      )));
    }

    match self.manifest_version {
      3 => {
        if self.browser_action.is_some() {
          return Err(invalid("browser_action is not supported in manifest_version 3, use action"));
        }
        if self.background.as_ref().is_some_and(|b| !b.scripts.is_empty()) {
          return Err(invalid(
            "background.scripts is not supported in manifest_version 3, use background.service_worker",
          ));
        }
        if self.background.as_ref().is_some_and(|b| b.page.is_some()) {
          return Err(invalid(
            "background.page is not supported in manifest_version 3, use background.service_worker",
          ));
        }
      }
      _ => {
        if self.action.is_some() {
          return Err(invalid("action requires manifest_version 3, use browser_action"));
        }
        if self.background.as_ref().is_some_and(|b| b.service_worker.is_some()) {
          return Err(invalid(
            "background.service_worker requires manifest_version 3, use background.scripts or background.page",
          ));
        }
      }
    }

    let mut seen = BTreeSet::new();
    for permission in &self.permissions {
      if !seen.insert(permission.as_str()) {
        warn!(permission = %permission, "duplicate permission in manifest");
      }
    }

    let entries = self.entry_points();
    if entries.is_empty() {
      return Err(ConfigError::NoEntryPoints);
    }

    for (name, path) in &entries {
      if path.is_empty() {
        return Err(invalid(format!("entry point '{}' has an empty path", name)));
      }
      if path.starts_with('/') || path.contains(':') {
        return Err(invalid(format!(
          "entry point '{}' must be a project-relative path: {}",
          name, path
        )));
      }
      if path.split('/').any(|segment| segment == "..") {
        return Err(invalid(format!(
          "entry point '{}' escapes the project root: {}",
          name, path
        )));
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tracing_test::traced_test;

  use super::*;
  use crate::manifest::types::{Action, Background};

  fn valid() -> Manifest {
    Manifest::new("demo", "1.0.0").with_background("src/bg.ts")
  }

  #[test]
  fn accepts_valid_manifest() {
    assert_eq!(valid().validate(), Ok(()));
  }

  #[test]
  fn version_rules() {
    assert!(is_valid_version("1"));
    assert!(is_valid_version("1.0.0.65535"));
    assert!(is_valid_version("0.10.2"));
    assert!(!is_valid_version(""));
    assert!(!is_valid_version("1.0.0.0.0"));
    assert!(!is_valid_version("1.01"));
    assert!(!is_valid_version("1.65536"));
    assert!(!is_valid_version("1.0-beta"));
    assert!(!is_valid_version("1..0"));
  }

  #[test]
  fn rejects_bad_version() {
    let mut manifest = valid();
    manifest.version = "v1".to_string();
    assert!(matches!(manifest.validate(), Err(ConfigError::InvalidManifest { .. })));
  }

  #[test]
  fn rejects_blank_name() {
    let mut manifest = valid();
    manifest.name = "  ".to_string();
    assert!(matches!(manifest.validate(), Err(ConfigError::InvalidManifest { .. })));
  }

  #[test]
  fn rejects_unknown_manifest_version() {
    let mut manifest = valid();
    manifest.manifest_version = 4;
    assert!(matches!(manifest.validate(), Err(ConfigError::InvalidManifest { .. })));
  }

  #[test]
  fn rejects_mismatched_action_keys() {
    let mut mv3 = valid();
    mv3.browser_action = Some(Action::default());
    assert!(mv3.validate().is_err());

    let mut mv2 = valid();
    mv2.manifest_version = 2;
    mv2.action = Some(Action::default());
    assert!(mv2.validate().is_err());
  }

  #[test]
  fn rejects_background_scripts_in_mv3() {
    let mut manifest = Manifest::new("demo", "1.0");
    manifest.background = Some(Background {
      scripts: vec!["bg.js".to_string()],
      ..Default::default()
    });
    assert!(manifest.validate().is_err());

    manifest.manifest_version = 2;
    assert_eq!(manifest.validate(), Ok(()));
  }

  #[test]
  fn background_keys_must_match_manifest_version() {
    let mut mv2_worker = Manifest::new("demo", "1.0").with_background("bg.js");
    mv2_worker.manifest_version = 2;
    assert!(matches!(
      mv2_worker.validate(),
      Err(ConfigError::InvalidManifest { reason }) if reason.contains("service_worker")
    ));

    let mut mv3_page = Manifest::new("demo", "1.0");
    mv3_page.background = Some(Background {
      page: Some("background.html".to_string()),
      ..Default::default()
    });
    assert!(matches!(
      mv3_page.validate(),
      Err(ConfigError::InvalidManifest { reason }) if reason.contains("background.page")
    ));

    mv3_page.manifest_version = 2;
    assert_eq!(mv3_page.validate(), Ok(()));
  }

  #[test]
  fn rejects_manifest_without_entry_points() {
    let manifest = Manifest::new("demo", "1.0");
    assert_eq!(manifest.validate(), Err(ConfigError::NoEntryPoints));
  }

  #[test]
  fn rejects_paths_outside_project() {
    let escaping = Manifest::new("demo", "1.0").with_background("../outside.ts");
    assert!(matches!(escaping.validate(), Err(ConfigError::InvalidManifest { reason }) if reason.contains("escapes")));

    let absolute = Manifest::new("demo", "1.0").with_background("/etc/bg.ts");
    assert!(matches!(absolute.validate(), Err(ConfigError::InvalidManifest { .. })));
  }

  #[test]
  #[traced_test]
  fn duplicate_permissions_only_warn() {
    let manifest = valid().with_permission("storage").with_permission("storage");
    assert_eq!(manifest.validate(), Ok(()));
    assert!(logs_contain("duplicate permission"));
  }
}
