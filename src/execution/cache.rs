//! TTL response cache.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::config::CacheConfig;

struct CacheEntry {
    value: Value,
    written_at: Instant,
}

/// In-memory store of successful response envelopes.
///
/// Entries expire `ttl` after they were written. Expiry is checked when an
/// entry is read, and every insert prunes all expired entries, so keys that
/// are never read again do not accumulate past one TTL.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    prefix: String,
}

impl ResponseCache {
    pub fn new(ttl: Duration, prefix: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl(), config.prefix.clone())
    }

    /// Deterministic key for an endpoint and its parameters.
    ///
    /// Parameter order does not matter: the pairs are sorted before hashing.
    pub fn fingerprint(&self, endpoint: &str, params: &[(String, String)]) -> String {
        let mut sorted: Vec<&(String, String)> = params.iter().collect();
        sorted.sort();

        let mut hasher = Sha256::new();
        hasher.update(endpoint.as_bytes());
        for (name, value) in sorted {
            // Separators keep ("ab","c") and ("a","bc") apart
            hasher.update([0u8]);
            hasher.update(name.as_bytes());
            hasher.update([b'=']);
            hasher.update(value.as_bytes());
        }

        let mut key = String::with_capacity(self.prefix.len() + 64);
        key.push_str(&self.prefix);
        for byte in hasher.finalize() {
            let _ = write!(&mut key, "{:02x}", byte);
        }
        key
    }

    /// Returns the cached envelope for `key` unless it has expired.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => entry.written_at.elapsed() >= self.ttl,
        };
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: String, value: Value) {
        let entry = CacheEntry {
            value,
            written_at: Instant::now(),
        };
        let mut entries = self.entries.lock().await;
        let ttl = self.ttl;
        entries.retain(|_, existing| existing.written_at.elapsed() < ttl);
        entries.insert(key, entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fingerprint_ignores_parameter_order() {
        let cache = ResponseCache::new(Duration::from_secs(60), "bing_webmaster_");
        let a = cache.fingerprint(
            "GetPageStats",
            &params(&[("siteUrl", "https://example.com/"), ("limit", "10")]),
        );
        let b = cache.fingerprint(
            "GetPageStats",
            &params(&[("limit", "10"), ("siteUrl", "https://example.com/")]),
        );
        assert_eq!(a, b);
        assert!(a.starts_with("bing_webmaster_"));
        assert_eq!(a.len(), "bing_webmaster_".len() + 64);
    }

    #[test]
    fn test_fingerprint_distinguishes_endpoints_and_values() {
        let cache = ResponseCache::new(Duration::from_secs(60), "");
        let p = params(&[("siteUrl", "https://example.com/")]);
        assert_ne!(
            cache.fingerprint("GetPageStats", &p),
            cache.fingerprint("GetQueryStats", &p)
        );
        assert_ne!(
            cache.fingerprint("GetPageStats", &params(&[("ab", "c")])),
            cache.fingerprint("GetPageStats", &params(&[("a", "bc")]))
        );
    }

    #[tokio::test]
    async fn test_get_returns_fresh_entry() {
        let cache = ResponseCache::new(Duration::from_secs(3600), "p_");
        cache.insert("p_key".to_string(), json!({"d": [1]})).await;
        assert_eq!(cache.get("p_key").await, Some(json!({"d": [1]})));
        assert_eq!(cache.get("p_other").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped_on_read() {
        let cache = ResponseCache::new(Duration::from_millis(20), "");
        cache.insert("key".to_string(), json!([])).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get("key").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_insert_prunes_expired_entries_under_other_keys() {
        let cache = ResponseCache::new(Duration::from_millis(20), "");
        cache.insert("site-a".to_string(), json!([1])).await;
        cache.insert("site-b".to_string(), json!([2])).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        cache.insert("site-c".to_string(), json!([3])).await;
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("site-c").await, Some(json!([3])));
    }

    #[tokio::test]
    async fn test_zero_ttl_never_serves() {
        let cache = ResponseCache::new(Duration::ZERO, "");
        cache.insert("key".to_string(), json!([])).await;
        assert_eq!(cache.get("key").await, None);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ResponseCache::new(Duration::from_secs(60), "");
        cache.insert("a".to_string(), json!(1)).await;
        cache.insert("b".to_string(), json!(2)).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
