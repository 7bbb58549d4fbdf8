//! Market data cache.
//!
//! moka in-memory store, bounded by entry count. Freshness is tracked per
//! entry (`expires_at`) because each data class has its own TTL; moka's own
//! time-to-live only governs how long expired entries stay around for stale
//! serving.

pub mod entry;

use std::time::Duration;

use advisor_core::config::GatewayConfig;
use advisor_core::models::DataClass;
use moka::sync::Cache;

pub use entry::CacheEntry;

/// Cache key for a provider key and data class.
pub fn cache_key(key: &str, class: DataClass) -> String {
    format!("{}:{}", class.as_str(), key.trim())
}

/// Bounded cache of upstream payloads.
pub struct MarketCache {
    cache: Cache<String, CacheEntry>,
}

impl MarketCache {
    pub fn new(config: &GatewayConfig) -> Self {
        let longest_ttl = DataClass::ALL
            .iter()
            .map(|c| config.ttl_for(*c))
            .max()
            .unwrap_or(Duration::ZERO);
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(longest_ttl + config.stale_retention())
            .build();
        Self { cache }
    }

    /// Entry for a key, fresh or not.
    pub fn get(&self, cache_key: &str) -> Option<CacheEntry> {
        self.cache.get(cache_key)
    }

    /// Entry for a key only while it is within its TTL.
    pub fn get_fresh(&self, cache_key: &str) -> Option<CacheEntry> {
        self.get(cache_key).filter(CacheEntry::is_fresh)
    }

    pub fn insert(&self, cache_key: String, entry: CacheEntry) {
        self.cache.insert(cache_key, entry);
    }

    pub fn invalidate(&self, cache_key: &str) {
        self.cache.invalidate(cache_key);
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of entries currently in the cache. Eventually consistent.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_class_scoped() {
        assert_eq!(cache_key(" AAPL ", DataClass::Quote), "quote:AAPL");
        assert_ne!(
            cache_key("AAPL", DataClass::Quote),
            cache_key("AAPL", DataClass::News)
        );
    }

    #[tokio::test]
    async fn insert_get_and_invalidate() {
        let cache = MarketCache::new(&GatewayConfig::default());
        let entry = CacheEntry::new(json!({"price": 1.0}), "p", Duration::from_secs(60));
        cache.insert("quote:X".into(), entry.clone());
        assert_eq!(cache.get_fresh("quote:X"), Some(entry));
        cache.invalidate("quote:X");
        assert_eq!(cache.get("quote:X"), None);
    }

    #[tokio::test]
    async fn clear_empties_cache() {
        let cache = MarketCache::new(&GatewayConfig::default());
        cache.insert("a".into(), CacheEntry::new(json!([]), "p", Duration::from_secs(1)));
        cache.insert("b".into(), CacheEntry::new(json!([]), "p", Duration::from_secs(1)));
        cache.clear();
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }
}
