use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Key -> value store with per-entry expiry.
pub trait Cache<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;
    fn set(&self, key: &str, value: V, ttl: Duration);
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// In-process cache. Expiry is checked on read; expired entries are evicted then.
pub struct MemoryCache<V> {
    store: Mutex<HashMap<String, Entry<V>>>,
}

impl<V> MemoryCache<V> {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send> Cache<V> for MemoryCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match store.get(key) {
            None => return None,
            Some(entry) => Instant::now() >= entry.expires_at,
        };
        if expired {
            store.remove(key);
            return None;
        }
        store.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: V, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        store.insert(key.to_string(), Entry { value, expires_at });
    }
}

/// Cache that never holds anything. Every call goes upstream.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl<V> Cache<V> for NoCache {
    fn get(&self, _key: &str) -> Option<V> {
        None
    }

    fn set(&self, _key: &str, _value: V, _ttl: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache: MemoryCache<String> = MemoryCache::new();
        cache.set("us-regime", "payload".to_string(), Duration::from_secs(60));
        assert_eq!(cache.get("us-regime"), Some("payload".to_string()));
        assert_eq!(cache.get("eu-regime"), None);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache: MemoryCache<u32> = MemoryCache::new();
        cache.set("k", 7, Duration::ZERO);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let cache: MemoryCache<u32> = MemoryCache::new();
        cache.set("k", 1, Duration::from_secs(60));
        cache.set("k", 2, Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(2));
    }

    #[test]
    fn test_no_cache_never_hits() {
        let cache = NoCache;
        Cache::<u32>::set(&cache, "k", 1, Duration::from_secs(60));
        assert_eq!(Cache::<u32>::get(&cache, "k"), None);
    }
}
