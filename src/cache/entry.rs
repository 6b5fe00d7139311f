//! Cache Entry Module
//!
//! Defines individual cache entries, their expiry metadata and the options
//! accepted by `set`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::Namespace;
use crate::error::{CacheError, Result};

/// Callback invoked after an entry is evicted or explicitly removed.
///
/// Receives a handle to the owning namespace, the key and the last value.
pub type RemovalCallback<V> = Arc<dyn Fn(Namespace<V>, String, V) + Send + Sync>;

// == Expiry ==
/// TTL bookkeeping stamped on each `set` that carries a TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    /// When the TTL was (re)applied
    pub set_at: Instant,
    /// Requested time to live
    pub ttl: Duration,
    /// `set_at + ttl`
    pub deathtime: Instant,
}

impl Expiry {
    /// # Errors
    /// [`CacheError::InvalidTtl`] if `set_at + ttl` is past the clock's range.
    pub fn new(set_at: Instant, ttl: Duration) -> Result<Self> {
        let deathtime = set_at.checked_add(ttl).ok_or_else(|| {
            CacheError::InvalidTtl(format!("ttl of {:?} overflows the clock", ttl))
        })?;
        Ok(Self {
            set_at,
            ttl,
            deathtime,
        })
    }
}

// == Cache Entry ==
/// A stored value together with its expiry state.
///
/// Entries are mutated in place by repeated `set` calls. `version` changes
/// each time a new TTL is applied, which invalidates older TTL queue
/// references to this entry.
pub(crate) struct Entry<V> {
    pub key: String,
    pub value: V,
    pub expiry: Option<Expiry>,
    pub on_remove: Option<RemovalCallback<V>>,
    pub version: u64,
}

impl<V> Entry<V> {
    pub fn new(key: String, value: V) -> Self {
        Self {
            key,
            value,
            expiry: None,
            on_remove: None,
            version: 0,
        }
    }
}

impl<V: Clone> Entry<V> {
    pub fn view(&self) -> EntryView<V> {
        EntryView {
            key: self.key.clone(),
            value: self.value.clone(),
            ttl: self.expiry.map(|e| e.ttl),
            expires_at: self.expiry.map(|e| e.deathtime),
        }
    }
}

// == Entry View ==
/// Public snapshot of an entry, returned by `remove`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView<V> {
    pub key: String,
    pub value: V,
    /// TTL of the most recent `set` that carried one
    pub ttl: Option<Duration>,
    /// Deathtime of that TTL
    pub expires_at: Option<Instant>,
}

// == Set Options ==
/// Options accepted by `set`.
///
/// ```ignore
/// let opts = SetOptions::new()
///     .ttl(Duration::from_secs(30))
///     .on_remove(|ns, key, value| println!("{}/{} gone: {:?}", ns.name(), key, value));
/// ```
pub struct SetOptions<V> {
    pub(crate) ttl: Option<Duration>,
    pub(crate) on_remove: Option<RemovalCallback<V>>,
}

impl<V> SetOptions<V> {
    pub fn new() -> Self {
        Self {
            ttl: None,
            on_remove: None,
        }
    }

    /// Enables expiry. A zero TTL is treated as "no expiry".
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = if ttl.is_zero() { None } else { Some(ttl) };
        self
    }

    /// Enables expiry from a fractional number of seconds.
    pub fn ttl_secs(self, secs: f64) -> Result<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(CacheError::InvalidTtl(format!(
                "ttl must be a non-negative number of seconds, got {}",
                secs
            )));
        }
        let ttl =
            Duration::try_from_secs_f64(secs).map_err(|e| CacheError::InvalidTtl(e.to_string()))?;
        Ok(self.ttl(ttl))
    }

    /// Replaces any removal callback previously attached to the entry.
    pub fn on_remove<F>(mut self, callback: F) -> Self
    where
        F: Fn(Namespace<V>, String, V) + Send + Sync + 'static,
    {
        self.on_remove = Some(Arc::new(callback));
        self
    }

    /// Shares an existing callback between several entries.
    pub fn on_remove_shared(mut self, callback: RemovalCallback<V>) -> Self {
        self.on_remove = Some(callback);
        self
    }
}

impl<V> Default for SetOptions<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for SetOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetOptions")
            .field("ttl", &self.ttl)
            .field("on_remove", &self.on_remove.is_some())
            .finish()
    }
}
