use std::time::Duration;

use advisor_core::models::{DataClass, Fetched, Freshness};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::time::Instant;

/// A cached upstream payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub provider: String,
    pub fetched_at: DateTime<Utc>,
    /// Monotonic expiry; tokio's clock so paused-time tests can advance it.
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn new(value: Value, provider: impl Into<String>, ttl: Duration) -> Self {
        Self {
            value,
            provider: provider.into(),
            fetched_at: Utc::now(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }

    pub fn to_fetched(&self, key: &str, class: DataClass, freshness: Freshness) -> Fetched {
        Fetched {
            key: key.to_string(),
            class,
            value: Some(self.value.clone()),
            freshness,
            provider: Some(self.provider.clone()),
            fetched_at: Some(self.fetched_at),
        }
    }
}
