//! Shared constants.

/// Length of the truncated hex digest used for [`crate::util::hash::ObjectHash`].
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Project configuration file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "extforge.toml";

/// Manifest file used when the project configuration does not name one.
pub const DEFAULT_MANIFEST_FILE: &str = "manifest.json";

/// Output directory used when the project configuration does not name one.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Directory names skipped during source discovery by default.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", "dist", ".git"];

/// Import prefix under which generated icon components are resolved.
pub const ICON_MODULE_PREFIX: &str = "~icons/";
