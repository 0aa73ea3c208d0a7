use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// In-process cache with a fixed per-entry TTL.
///
/// Entries expire lazily on read. A zero TTL disables the cache entirely:
/// every `get` misses and `insert` is a no-op, so callers never branch on
/// whether caching is enabled.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Arc<DashMap<K, (V, Instant)>>,
}

impl<K, V> Clone for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            ttl: self.ttl,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        if self.ttl.is_zero() {
            return None;
        }
        // The shard guard must be dropped before `remove`, or we deadlock.
        let expired = match self.entries.get(key) {
            Some(entry) => {
                let (value, inserted_at) = entry.value();
                if inserted_at.elapsed() < self.ttl {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: K, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(key, (value, Instant::now()));
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
