use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde_json::Value;

/// Identity of one catalog request: endpoint plus normalized parameters
///
/// Parameters are serialized sorted by key so logically identical requests
/// produce the same key regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(endpoint: &str, params: &[(&str, &str)]) -> Self {
        let mut sorted: Vec<(&str, &str)> = params.to_vec();
        sorted.sort_unstable();

        let query: Vec<String> = sorted.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        CacheKey(format!("{}?{}", endpoint, query.join("&")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

/// In-memory response cache with lazy TTL eviction
///
/// Owned by the catalog client and constructed once at client construction.
/// Entries are evicted only when found stale on access or by an explicit
/// [`MemoryCache::clear`]; there is no background sweeper and no size bound,
/// the cache lives for the lifetime of the client instance.
pub struct MemoryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached payload if the entry is still fresh
    ///
    /// A stale entry is evicted on the spot and reported as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key.as_str()) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.payload.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Stale: re-check under the write lock before evicting, another
        // caller may have refreshed the entry in between.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get(key.as_str()) {
            if entry.stored_at.elapsed() >= self.ttl {
                entries.remove(key.as_str());
                tracing::debug!(key = %key, "Evicted stale cache entry");
            }
        }
        None
    }

    /// Stores a payload under the key, stamping it with the current time
    pub fn insert(&self, key: CacheKey, payload: Value) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key.0,
            CacheEntry {
                payload,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every entry; the only eviction path besides lazy expiry
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
