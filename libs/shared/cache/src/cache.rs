use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::clock::Clock;

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at: DateTime<Utc>,
}

/// Time-expiring read-through cache. No size bound and no LRU: entries are
/// only ever replaced wholesale by `put`.
///
/// Locks are never held across a fetch, so two concurrent misses may both
/// re-fetch; the last `put` wins.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the value only while it is younger than the TTL.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if self.is_fresh(entry) {
            Some(entry.value.clone())
        } else {
            debug!("Cache entry expired at age {:?}", self.age(entry));
            None
        }
    }

    /// Returns the value regardless of age.
    pub async fn peek(&self, key: &K) -> Option<V> {
        self.entries.read().await.get(key).map(|e| e.value.clone())
    }

    pub async fn put(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            fetched_at: self.clock.now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    fn age(&self, entry: &CacheEntry<V>) -> Option<Duration> {
        (self.clock.now() - entry.fetched_at).to_std().ok()
    }

    fn is_fresh(&self, entry: &CacheEntry<V>) -> bool {
        // A negative age (clock moved backwards) counts as fresh.
        self.age(entry).map_or(true, |age| age < self.ttl)
    }
}
