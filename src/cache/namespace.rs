//! Namespace Module
//!
//! A namespace (slot) is a named partition of the cache's key space. `Slot`
//! holds the entries; `Namespace` is the public handle scoped to one slot.

use std::fmt;

use indexmap::map::Entry as MapEntry;

use crate::cache::entry::Entry;
use crate::cache::registry::Registry;
use crate::cache::{normalize_name, Cache, EntryView, SetOptions};
use crate::error::Result;

// == Slot ==
/// Entry storage for a single namespace.
pub(crate) struct Slot<V> {
    items: Registry<Entry<V>>,
}

impl<V> Slot<V> {
    pub fn new() -> Self {
        Self {
            items: Registry::new(),
        }
    }

    /// Overwrites the value of `key`, creating the entry on first use.
    ///
    /// Expiry and callback of an existing entry are left untouched.
    pub fn upsert(&mut self, key: &str, value: V) -> &mut Entry<V> {
        match self.items.entry(key) {
            MapEntry::Occupied(occupied) => {
                let entry = occupied.into_mut();
                entry.value = value;
                entry
            }
            MapEntry::Vacant(vacant) => vacant.insert(Entry::new(key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Entry<V>> {
        self.items.get(key)
    }

    /// Detaches `key` from this slot.
    pub fn take(&mut self, key: &str) -> Option<Entry<V>> {
        self.items.remove(key)
    }

    pub fn count(&self) -> usize {
        self.items.count()
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.keys()
    }
}

// == Namespace Handle ==
/// Handle to one namespace of a [`Cache`].
///
/// Cloning is cheap; all clones (and the cache itself) see the same entries.
/// Keys passed to the handle go through the same trimming and validation as
/// keys passed to the cache.
#[derive(Clone)]
pub struct Namespace<V> {
    name: String,
    cache: Cache<V>,
}

impl<V> Namespace<V>
where
    V: Clone + Send + 'static,
{
    pub(crate) fn new(name: String, cache: Cache<V>) -> Self {
        Self { name, cache }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cache this namespace belongs to.
    pub fn cache(&self) -> &Cache<V> {
        &self.cache
    }

    // == Set ==
    /// Stores `value` under `key`; see [`Cache::set`].
    pub fn set(&self, key: impl fmt::Display, value: V, options: SetOptions<V>) -> Result<()> {
        let key = normalize_name("key", key)?;
        self.cache.set_in(&self.name, key, value, options)
    }

    // == Get ==
    pub fn get(&self, key: impl fmt::Display) -> Result<Option<V>> {
        let key = normalize_name("key", key)?;
        Ok(self.cache.get_in(&self.name, &key))
    }

    /// Like [`get`](Self::get), also handing the result to `callback` before
    /// returning.
    pub fn get_with<F>(&self, key: impl fmt::Display, callback: F) -> Result<Option<V>>
    where
        F: FnOnce(Option<&V>),
    {
        let value = self.get(key)?;
        callback(value.as_ref());
        Ok(value)
    }

    // == Remove ==
    /// Removes `key`, returning what was stored; see [`Cache::remove`].
    pub fn remove(&self, key: impl fmt::Display) -> Result<Option<EntryView<V>>> {
        let key = normalize_name("key", key)?;
        Ok(self.cache.remove_in(&self.name, &key))
    }

    // == Count ==
    /// Number of live entries in this namespace.
    pub fn count(&self) -> usize {
        self.cache.count_in(&self.name)
    }

    /// Snapshot of the keys in this namespace, in creation order.
    pub fn keys(&self) -> Vec<String> {
        self.cache.keys_in(&self.name)
    }
}

impl<V> fmt::Debug for Namespace<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace").field("name", &self.name).finish()
    }
}

impl<V> PartialEq for Namespace<V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.cache.same_cache(&other.cache)
    }
}
