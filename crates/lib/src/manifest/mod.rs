//! Extension manifest model.
//!
//! A manifest is the read-only description of an extension: identity,
//! permissions, and the source files it is built from. The composer never
//! mutates it.

mod entry;
mod types;
mod validate;

pub use entry::{EntryPoints, entry_extension};
pub use types::*;
pub use validate::is_valid_version;
