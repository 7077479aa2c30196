//! Source discovery.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use super::ProjectError;
use crate::sources::{SourceSet, normalize_path};

/// Walk `root` and collect every regular file as a project-relative path.
///
/// Entries in `exclude` are directory names, or project-relative paths when
/// they contain a `/`. Matching directories are skipped entirely. Symlinks
/// are followed and recorded under the link's own path. Entries are visited in
/// file-name order, so the result is deterministic.
pub fn discover_sources(root: &Path, exclude: &[String]) -> Result<SourceSet, ProjectError> {
  let mut sources = SourceSet::new();

  let walker = WalkDir::new(root)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| e.depth() == 0 || !is_excluded(root, e.path(), exclude));

  for entry in walker {
    let entry = entry.map_err(|e| ProjectError::Scan {
      path: root.to_path_buf(),
      message: e.to_string(),
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let rel_path = entry
      .path()
      .strip_prefix(root)
      .unwrap_or(entry.path())
      .to_string_lossy()
      .to_string();
    sources.insert(&rel_path);
  }

  debug!(root = ?root, count = sources.len(), "discovered sources");
  Ok(sources)
}

fn is_excluded(root: &Path, path: &Path, exclude: &[String]) -> bool {
  let name = path.file_name().and_then(|n| n.to_str());
  let rel = path.strip_prefix(root).ok().map(|p| normalize_path(&p.to_string_lossy()));
  exclude.iter().any(|x| {
    if x.contains('/') {
      rel.as_deref() == Some(normalize_path(x).as_str())
    } else {
      name == Some(x.as_str())
    }
  })
}
