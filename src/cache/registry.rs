//! Registry Module
//!
//! Insertion-ordered string-keyed storage used for both the namespace
//! registry and each namespace's item registry.

use indexmap::map::Entry;
use indexmap::IndexMap;

// == Registry ==
/// Insertion-ordered map from name to value.
///
/// Iteration and [`keys`](Registry::keys) follow first-insertion order;
/// replacing an existing name keeps its position.
#[derive(Debug)]
pub struct Registry<T> {
    entries: IndexMap<String, T>,
}

impl<T> Registry<T> {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    // == Add ==
    /// Inserts or replaces the value stored under `name`.
    pub fn add(&mut self, name: String, value: T) {
        self.entries.insert(name, value);
    }

    // == Get ==
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name)
    }

    /// Map entry for in-place insert-or-update.
    pub fn entry(&mut self, name: &str) -> Entry<'_, String, T> {
        self.entries.entry(name.to_string())
    }

    /// Returns the value under `name`, inserting `make()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, name: &str, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.entries.entry(name.to_string()).or_insert_with(make)
    }

    // == Remove ==
    /// Removes `name`, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(name)
    }

    // == Keys ==
    /// Returns a snapshot of the names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Count ==
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
