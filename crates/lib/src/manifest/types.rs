//! Manifest types for browser extensions.
//!
//! [`Manifest`] models the parts of `manifest.json` that the composer needs to
//! understand: identity, permissions and every key that points at a source
//! file. Keys it does not model are kept in `extra` so the document passes
//! through to the packaging stage unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::util::hash::Hashable;

/// A browser extension manifest (`manifest.json`), Manifest V2 or V3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  pub manifest_version: u8,
  pub name: String,
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub permissions: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub host_permissions: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub background: Option<Background>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub content_scripts: Vec<ContentScript>,
  /// Toolbar action (MV3).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub action: Option<Action>,
  /// Toolbar action (MV2).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub browser_action: Option<Action>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options_page: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options_ui: Option<OptionsUi>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub devtools_page: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub side_panel: Option<SidePanel>,
  /// Icon paths keyed by pixel size.
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub icons: BTreeMap<String, String>,
  /// Keys this model does not interpret.
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}

impl Hashable for Manifest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Background {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub service_worker: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub scripts: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub page: Option<String>,
  /// `"module"` for ES module service workers.
  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentScript {
  #[serde(default)]
  pub matches: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub js: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub css: Vec<String>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default_popup: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default_icon: Option<IconSet>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default_title: Option<String>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}

/// An action icon: either a single path or paths keyed by pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconSet {
  Single(String),
  Sized(BTreeMap<String, String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsUi {
  pub page: String,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidePanel {
  pub default_path: String,
}

impl Manifest {
  /// Create a minimal MV3 manifest with no entry points.
  pub fn new(name: &str, version: &str) -> Self {
    Self {
      manifest_version: 3,
      name: name.to_string(),
      version: version.to_string(),
      description: None,
      permissions: Vec::new(),
      host_permissions: Vec::new(),
      background: None,
      content_scripts: Vec::new(),
      action: None,
      browser_action: None,
      options_page: None,
      options_ui: None,
      devtools_page: None,
      side_panel: None,
      icons: BTreeMap::new(),
      extra: BTreeMap::new(),
    }
  }

  /// Parse a manifest from JSON text.
  ///
  /// Type errors and missing required keys are reported as
  /// [`ConfigError::InvalidManifest`]; structural rules are checked separately
  /// by [`Manifest::validate`].
  pub fn from_json(text: &str) -> Result<Self, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::InvalidManifest { reason: e.to_string() })
  }

  pub fn with_background(mut self, service_worker: &str) -> Self {
    self.background = Some(Background {
      service_worker: Some(service_worker.to_string()),
      ..Default::default()
    });
    self
  }

  /// Set the popup on whichever toolbar action key matches `manifest_version`.
  pub fn with_popup(mut self, popup: &str) -> Self {
    let action = self.toolbar_action_mut().get_or_insert_with(Action::default);
    action.default_popup = Some(popup.to_string());
    self
  }

  pub fn with_content_script(mut self, matches: &[&str], js: &[&str]) -> Self {
    self.content_scripts.push(ContentScript {
      matches: matches.iter().map(|m| m.to_string()).collect(),
      js: js.iter().map(|j| j.to_string()).collect(),
      ..Default::default()
    });
    self
  }

  pub fn with_icon(mut self, size: &str, path: &str) -> Self {
    self.icons.insert(size.to_string(), path.to_string());
    self
  }

  pub fn with_permission(mut self, permission: &str) -> Self {
    self.permissions.push(permission.to_string());
    self
  }

  /// The toolbar action for this manifest version (`action` or `browser_action`).
  pub fn toolbar_action(&self) -> Option<&Action> {
    if self.manifest_version == 2 {
      self.browser_action.as_ref()
    } else {
      self.action.as_ref()
    }
  }

  fn toolbar_action_mut(&mut self) -> &mut Option<Action> {
    if self.manifest_version == 2 {
      &mut self.browser_action
    } else {
      &mut self.action
    }
  }
}
