//! Compose options.
//!
//! Exactly two option keys are recognized:
//! - `componentCompilerTarget`: UI runtime the component compiler targets
//! - `iconCompiler`: rendering convention for generated icon components
//!
//! Any other key rejects the configuration. A missing key, JSON `null` or the
//! string `"none"` leaves the corresponding stage out.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const COMPONENT_COMPILER_TARGET: &str = "componentCompilerTarget";
pub const ICON_COMPILER: &str = "iconCompiler";

/// Option keys accepted by [`ComposeOptions::from_map`].
pub const RECOGNIZED_OPTIONS: &[&str] = &[COMPONENT_COMPILER_TARGET, ICON_COMPILER];

/// UI runtime targeted by the component compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentTarget {
  Vue3,
  Vue2,
}

impl ComponentTarget {
  pub const ALL: &[ComponentTarget] = &[ComponentTarget::Vue3, ComponentTarget::Vue2];

  pub fn as_str(&self) -> &'static str {
    match self {
      ComponentTarget::Vue3 => "vue3",
      ComponentTarget::Vue2 => "vue2",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|t| t.as_str() == value)
  }
}

impl fmt::Display for ComponentTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Rendering convention for generated icon components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconCompiler {
  Vue3,
  Vue2,
  Jsx,
  Solid,
  Svelte,
  WebComponents,
  Raw,
}

impl IconCompiler {
  pub const ALL: &[IconCompiler] = &[
    IconCompiler::Vue3,
    IconCompiler::Vue2,
    IconCompiler::Jsx,
    IconCompiler::Solid,
    IconCompiler::Svelte,
    IconCompiler::WebComponents,
    IconCompiler::Raw,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      IconCompiler::Vue3 => "vue3",
      IconCompiler::Vue2 => "vue2",
      IconCompiler::Jsx => "jsx",
      IconCompiler::Solid => "solid",
      IconCompiler::Svelte => "svelte",
      IconCompiler::WebComponents => "web-components",
      IconCompiler::Raw => "raw",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|c| c.as_str() == value)
  }

  /// The component runtime this convention emits code for, if it is one the
  /// component compiler can target.
  pub fn component_runtime(&self) -> Option<ComponentTarget> {
    match self {
      IconCompiler::Vue3 => Some(ComponentTarget::Vue3),
      IconCompiler::Vue2 => Some(ComponentTarget::Vue2),
      _ => None,
    }
  }
}

impl fmt::Display for IconCompiler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Validated compose options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeOptions {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub component_compiler_target: Option<ComponentTarget>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon_compiler: Option<IconCompiler>,
}

impl ComposeOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_component_compiler(mut self, target: ComponentTarget) -> Self {
    self.component_compiler_target = Some(target);
    self
  }

  pub fn with_icon_compiler(mut self, compiler: IconCompiler) -> Self {
    self.icon_compiler = Some(compiler);
    self
  }

  /// Parse options from a raw key/value map.
  ///
  /// All keys are checked before any value, so an unrecognized key is
  /// reported even when a recognized key also has a bad value.
  pub fn from_map(map: &BTreeMap<String, serde_json::Value>) -> Result<Self, ConfigError> {
    if let Some(key) = map.keys().find(|k| !RECOGNIZED_OPTIONS.contains(&k.as_str())) {
      return Err(ConfigError::UnknownOption { key: key.clone() });
    }

    let component_compiler_target = match option_str(map, COMPONENT_COMPILER_TARGET)? {
      Some(value) => Some(ComponentTarget::parse(value).ok_or_else(|| ConfigError::InvalidOption {
        key: COMPONENT_COMPILER_TARGET.to_string(),
        message: format!(
          "unknown target '{}', expected one of: {}",
          value,
          join(ComponentTarget::ALL.iter().map(|t| t.as_str()))
        ),
      })?),
      None => None,
    };

    let icon_compiler = match option_str(map, ICON_COMPILER)? {
      Some(value) => Some(IconCompiler::parse(value).ok_or_else(|| ConfigError::InvalidOption {
        key: ICON_COMPILER.to_string(),
        message: format!(
          "unknown compiler '{}', expected one of: {}",
          value,
          join(IconCompiler::ALL.iter().map(|c| c.as_str()))
        ),
      })?),
      None => None,
    };

    Ok(Self {
      component_compiler_target,
      icon_compiler,
    })
  }

  /// Parse options from a JSON object.
  pub fn from_json(value: &serde_json::Value) -> Result<Self, ConfigError> {
    match value {
      serde_json::Value::Object(object) => {
        let map: BTreeMap<String, serde_json::Value> =
          object.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        Self::from_map(&map)
      }
      serde_json::Value::Null => Ok(Self::default()),
      _ => Err(ConfigError::InvalidOption {
        key: "options".to_string(),
        message: "expected an object".to_string(),
      }),
    }
  }
}

/// Read a string-valued option; `null` and `"none"` mean "not requested".
fn option_str<'a>(map: &'a BTreeMap<String, serde_json::Value>, key: &str) -> Result<Option<&'a str>, ConfigError> {
  match map.get(key) {
    None | Some(serde_json::Value::Null) => Ok(None),
    Some(serde_json::Value::String(s)) if s == "none" => Ok(None),
    Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
    Some(other) => Err(ConfigError::InvalidOption {
      key: key.to_string(),
      message: format!("expected a string, got {}", other),
    }),
  }
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
  values.collect::<Vec<_>>().join(", ")
}
