//! Memoization of loaded series.
//!
//! Loaders receive a [`SeriesCache`] instead of owning a map, so callers decide
//! the lifetime and eviction of cached datasets.

use log::debug;
use std::collections::HashMap;

use crate::date_range::DateWindow;

/// A keyed store of loaded series. Holds at most one entry per key and never
/// evicts on its own.
pub trait SeriesCache<T> {
    fn get(&self, key: &str) -> Option<Vec<T>>;
    fn put(&mut self, key: String, series: Vec<T>);
    /// Remove an entry, returning whether one was present.
    fn evict(&mut self, key: &str) -> bool;
}

/// In-memory [`SeriesCache`].
#[derive(Debug, Clone)]
pub struct MemoryCache<T> {
    entries: HashMap<String, Vec<T>>,
}

impl<T> MemoryCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for MemoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SeriesCache<T> for MemoryCache<T> {
    fn get(&self, key: &str) -> Option<Vec<T>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: String, series: Vec<T>) {
        debug!("cache: storing {} points under {}", series.len(), key);
        self.entries.insert(key, series);
    }

    fn evict(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}

/// Build the cache key for a dataset: `{kind}_{source}_{start}_{end}`.
pub fn cache_key(kind: &str, source: &str, window: &DateWindow) -> String {
    format!("{}_{}_{}", kind, source, window)
}
