//! Error types for the slot cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the slot cache.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Namespace or key has no usable string form (empty after trimming)
    #[error("Invalid {kind} name: {input:?}")]
    InvalidName { kind: &'static str, input: String },

    /// Cycle timing configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TTL could not be represented as a duration
    #[error("Invalid ttl: {0}")]
    InvalidTtl(String),

    /// The cache was created outside of a tokio runtime
    #[error("No tokio runtime available to drive the eviction timer")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the slot cache.
pub type Result<T> = std::result::Result<T, CacheError>;
