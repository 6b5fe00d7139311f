//! Cache Module
//!
//! Provides namespaced in-memory caching with TTL eviction driven by a single
//! adaptive sweep timer.

mod entry;
mod namespace;
mod queue;
mod registry;
mod stats;
mod store;


use std::fmt;

use crate::error::{CacheError, Result};

// Re-export public types
pub use entry::{EntryView, Expiry, RemovalCallback, SetOptions};
pub use namespace::Namespace;
pub use registry::Registry;
pub use stats::CacheStats;
pub use store::Cache;

// == Name Normalization ==
/// Converts a namespace or key to its canonical form: `Display` output with
/// surrounding whitespace trimmed.
///
/// # Errors
/// [`CacheError::InvalidName`] if nothing is left after trimming.
pub fn normalize_name(kind: &'static str, input: impl fmt::Display) -> Result<String> {
    let raw = input.to_string();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CacheError::InvalidName { kind, input: raw });
    }
    Ok(trimmed.to_string())
}
