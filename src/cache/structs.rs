use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-memory TTL cache for single-point prediction payloads.
/// Expired entries are dropped lazily on lookup.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Create a new cache instance
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Load a cached payload
    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    /// Save a payload, valid for the configured TTL
    pub fn insert(&self, key: String, value: Value) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn get_at(&self, key: &str, now: Instant) -> Option<Value> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if now <= entry.expires_at => {
                debug!("Prediction cache hit: {}", key);
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!("Prediction cache entry expired: {}", key);
                entries.remove(key);
                None
            }
            None => {
                debug!("Prediction cache miss: {}", key);
                None
            }
        }
    }

    pub fn insert_at(&self, key: String, value: Value, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + self.ttl,
        };
        self.lock().insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Helper Methods ---

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // entries stay consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_save_and_load() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let now = Instant::now();
        cache.insert_at("k".to_string(), json!({"rushScore": 0.5}), now);

        assert_eq!(cache.get_at("k", now), Some(json!({"rushScore": 0.5})));
        assert_eq!(cache.get_at("k", now + Duration::from_secs(300)), Some(json!({"rushScore": 0.5})));
        assert_eq!(cache.get_at("missing", now), None);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_lookup() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let now = Instant::now();
        cache.insert_at("k".to_string(), json!(1), now);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get_at("k", now + Duration::from_secs(301)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_overwrites() {
        let cache = ResponseCache::new(Duration::from_secs(5));
        let now = Instant::now();
        cache.insert_at("k".to_string(), json!(1), now);
        cache.insert_at("k".to_string(), json!(2), now);
        assert_eq!(cache.get_at("k", now), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }
}
