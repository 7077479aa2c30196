//! The set of source files a build driver can discover.
//!
//! Paths are stored relative to the project root in normalized form (forward
//! slashes, no leading `./`), which is also how manifest entry points are
//! normalized before lookup.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Normalize a project-relative path for comparison.
///
/// Backslashes become forward slashes, `.` segments and repeated separators
/// are dropped. `..` segments and a leading `/` are kept so validation can
/// reject them.
pub fn normalize_path(path: &str) -> String {
  let unified = path.replace('\\', "/");
  let absolute = unified.starts_with('/');
  let segments: Vec<&str> = unified.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
  let joined = segments.join("/");
  if absolute { format!("/{}", joined) } else { joined }
}

/// Relative paths of all files under the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSet {
  files: BTreeSet<String>,
}

impl SourceSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a source set from already-relative paths.
  pub fn from_paths<I, S>(paths: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self {
      files: paths.into_iter().map(|p| normalize_path(p.as_ref())).collect(),
    }
  }

  pub fn insert(&mut self, path: &str) -> bool {
    self.files.insert(normalize_path(path))
  }

  pub fn contains(&self, path: &str) -> bool {
    self.files.contains(&normalize_path(path))
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.files.iter().map(String::as_str)
  }
}
