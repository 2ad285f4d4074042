//! Memoization cache for derived script structures

use moka::sync::Cache;
use std::time::Duration;

/// Entries are bounded by the number of distinct script assets seen in a
/// process lifetime; the capacity is a generous ceiling, not a tuning knob.
const MAX_ENTRIES: u64 = 1024;

/// Get-or-compute memoization over a concurrent map.
///
/// Reads are safe from any thread. Concurrent misses on the same key are
/// single-flighted: one caller runs the compute step, the others wait for
/// its result.
#[derive(Clone)]
pub struct MemoCache<K, V> {
    cache: Cache<K, V>,
}

impl<K, V> MemoCache<K, V>
where
    K: std::hash::Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(MAX_ENTRIES)
                .build(),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: K, value: V) {
        self.cache.insert(key, value);
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    /// The compute step may fail; failures are not cached. Concurrent callers
    /// missing on the same key share one compute.
    pub fn get_or_try_insert_with<F, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
        E: Clone + Send + Sync + 'static,
    {
        self.cache
            .try_get_with(key, compute)
            .map_err(|err| (*err).clone())
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
