//! Slot Cache - An in-process namespaced cache with TTL eviction
//!
//! Values live in named namespaces ("slots"). Entries may carry a TTL; a
//! single adaptive timer per cache sweeps expired entries and hands them to
//! their removal callbacks.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats, EntryView, Namespace, RemovalCallback, SetOptions};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
