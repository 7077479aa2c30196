//! Entry-point extraction.
//!
//! Every manifest key that names a source file becomes an entry point with a
//! stable logical name, e.g. `background`, `popup`,
//! `content_scripts[0].js[1]` or `icons.128`.

use std::collections::BTreeMap;

use super::types::{IconSet, Manifest};
use crate::sources::normalize_path;

/// Logical entry-point name mapped to its normalized, project-relative path.
pub type EntryPoints = BTreeMap<String, String>;

impl Manifest {
  /// Collect every file this manifest references.
  ///
  /// `action` is read for MV3 manifests and `browser_action` for MV2. Paths
  /// are normalized with [`normalize_path`].
  pub fn entry_points(&self) -> EntryPoints {
    let mut entries = EntryPoints::new();
    let mut add = |name: String, path: &str| {
      entries.insert(name, normalize_path(path));
    };

    if let Some(background) = &self.background {
      if let Some(worker) = &background.service_worker {
        add("background".to_string(), worker);
      }
      if let Some(page) = &background.page {
        add("background.page".to_string(), page);
      }
      for (i, script) in background.scripts.iter().enumerate() {
        add(format!("background.scripts[{}]", i), script);
      }
    }

    for (i, script) in self.content_scripts.iter().enumerate() {
      for (j, js) in script.js.iter().enumerate() {
        add(format!("content_scripts[{}].js[{}]", i, j), js);
      }
      for (j, css) in script.css.iter().enumerate() {
        add(format!("content_scripts[{}].css[{}]", i, j), css);
      }
    }

    if let Some(action) = self.toolbar_action() {
      if let Some(popup) = &action.default_popup {
        add("popup".to_string(), popup);
      }
      match &action.default_icon {
        Some(IconSet::Single(path)) => add("action.default_icon".to_string(), path),
        Some(IconSet::Sized(sizes)) => {
          for (size, path) in sizes {
            add(format!("action.default_icon.{}", size), path);
          }
        }
        None => {}
      }
    }

    // options_ui supersedes options_page when both are present
    if let Some(options_ui) = &self.options_ui {
      add("options".to_string(), &options_ui.page);
    } else if let Some(page) = &self.options_page {
      add("options".to_string(), page);
    }

    if let Some(page) = &self.devtools_page {
      add("devtools".to_string(), page);
    }
    if let Some(panel) = &self.side_panel {
      add("side_panel".to_string(), &panel.default_path);
    }

    for (size, path) in &self.icons {
      add(format!("icons.{}", size), path);
    }

    entries
  }
}

/// Lowercased file extension of an entry path, without the dot.
pub fn entry_extension(path: &str) -> Option<String> {
  let file_name = path.rsplit('/').next()?;
  let (stem, ext) = file_name.rsplit_once('.')?;
  if stem.is_empty() || ext.is_empty() {
    return None;
  }
  Some(ext.to_ascii_lowercase())
}
