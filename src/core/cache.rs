//! In-memory LRU cache for shaped query results.
//!
//! The cache is a plain value constructed alongside the command context and
//! handed to whoever needs it. There is deliberately no process-wide
//! singleton: callers that want lookaside behavior hold a handle.
//!
//! Keys are canonical query strings (thresholds include floats, which rules
//! out hashing the query struct directly).

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

const DEFAULT_CAPACITY: usize = 256;

/// Thread-safe LRU cache from canonical query keys to cloned results.
pub struct ResultCache<V: Clone> {
    inner: Mutex<LruCache<String, V>>,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_CAPACITY).unwrap());
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut cache = self.inner.lock().ok()?;
        cache.get(key).cloned()
    }

    pub fn put(&self, key: String, value: V) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.put(key, value);
        }
    }

    /// Drop every cached entry. Called after explicit sync commands so
    /// stale pre-sync results are not served.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for ResultCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
