//! Rebuild cache for composed configurations.
//!
//! A build driver that rebuilds incrementally keeps a [`ConfigCache`] in its
//! own loop state and asks it for the configuration on every rebuild. The
//! cache recomposes only when the manifest, options, source set or build
//! options changed. There is no process-wide cache.

use serde::Serialize;
use tracing::debug;

use crate::compose::Composer;
use crate::config::{BuildConfig, BuildOptions};
use crate::error::ConfigError;
use crate::manifest::Manifest;
use crate::options::ComposeOptions;
use crate::sources::SourceSet;
use crate::util::hash::{Hashable, ObjectHash};

/// Everything a composition depends on.
#[derive(Serialize)]
struct Fingerprint<'a> {
  manifest: &'a Manifest,
  options: &'a ComposeOptions,
  sources: &'a SourceSet,
  build: &'a BuildOptions,
}

impl Hashable for Fingerprint<'_> {}

#[derive(Debug)]
struct CachedConfig {
  fingerprint: ObjectHash,
  config: BuildConfig,
}

/// Holds the most recently composed configuration.
#[derive(Debug, Default)]
pub struct ConfigCache {
  entry: Option<CachedConfig>,
  hits: u64,
  misses: u64,
}

impl ConfigCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Return the cached configuration if its inputs are unchanged, otherwise
  /// compose a new one and cache it.
  ///
  /// A failed composition leaves the previously cached configuration in place.
  pub fn get_or_compose(
    &mut self,
    composer: &Composer,
    manifest: &Manifest,
    options: &ComposeOptions,
  ) -> Result<&BuildConfig, ConfigError> {
    let fingerprint = Fingerprint {
      manifest,
      options,
      sources: composer.sources(),
      build: composer.build_options(),
    }
    .compute_hash()?;

    let entry = match self.entry.take() {
      Some(cached) if cached.fingerprint == fingerprint => {
        self.hits += 1;
        debug!(fingerprint = %fingerprint, "reusing composed configuration");
        cached
      }
      previous => {
        self.misses += 1;
        match composer.compose(manifest, options) {
          Ok(config) => {
            debug!(fingerprint = %fingerprint, "cached new configuration");
            CachedConfig { fingerprint, config }
          }
          Err(err) => {
            self.entry = previous;
            return Err(err);
          }
        }
      }
    };

    Ok(&self.entry.insert(entry).config)
  }

  /// The cached configuration, if any.
  pub fn current(&self) -> Option<&BuildConfig> {
    self.entry.as_ref().map(|e| &e.config)
  }

  pub fn invalidate(&mut self) {
    self.entry = None;
  }

  pub fn hits(&self) -> u64 {
    self.hits
  }

  pub fn misses(&self) -> u64 {
    self.misses
  }
}
