//! Short-lived in-memory cache for upstream responses.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Concurrent map whose entries go stale `ttl` after insertion.
///
/// Stale entries are never returned; they are dropped lazily on lookup or in
/// bulk by [`Cache::purge_expired`].
pub struct Cache<K, V> {
    entries: DashMap<K, Stamped<V>>,
    ttl: Duration,
}

struct Stamped<V> {
    value: V,
    stored_at: Instant,
}

impl<V> Stamped<V> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        let hit = self
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.value.clone());

        if hit.is_none() {
            self.entries.remove_if(key, |_, entry| !entry.is_fresh(self.ttl));
        }
        hit
    }

    /// Store `value` under `key`. A zero TTL stores nothing.
    pub fn insert(&self, key: K, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            key,
            Stamped {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every stale entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(self.ttl));
        before.saturating_sub(self.entries.len())
    }

    /// Entry count, stale entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
