use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::DataClass;

/// Data provider gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub quote_ttl_secs: u64,
    pub news_ttl_secs: u64,
    pub fundamentals_ttl_secs: u64,
    /// How long expired entries are kept around for stale serving.
    pub stale_retention_secs: u64,
    /// Max cache entries (moka capacity).
    pub cache_capacity: u64,
    /// Attempts per provider before moving down the chain.
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f64,
    /// Total wall-clock budget for one `fetch`.
    pub latency_budget_ms: u64,
    /// Consecutive failures before a provider's breaker opens.
    pub breaker_failure_threshold: u32,
    pub breaker_cooldown_secs: u64,
    /// Max parallel upstream fetches in `fetch_many`.
    pub fetch_concurrency: usize,
    /// Minimum spacing between upstream calls.
    pub rate_limit_interval_ms: u64,
    /// Per-request timeout for the HTTP provider.
    pub http_timeout_secs: u64,
}

impl GatewayConfig {
    /// TTL for a data class.
    pub fn ttl_for(&self, class: DataClass) -> Duration {
        let secs = match class {
            DataClass::Quote => self.quote_ttl_secs,
            DataClass::News => self.news_ttl_secs,
            DataClass::Fundamentals => self.fundamentals_ttl_secs,
        };
        Duration::from_secs(secs)
    }

    pub fn latency_budget(&self) -> Duration {
        Duration::from_millis(self.latency_budget_ms)
    }

    pub fn stale_retention(&self) -> Duration {
        Duration::from_secs(self.stale_retention_secs)
    }

    pub fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_interval_ms)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            quote_ttl_secs: defaults::DEFAULT_QUOTE_TTL_SECS,
            news_ttl_secs: defaults::DEFAULT_NEWS_TTL_SECS,
            fundamentals_ttl_secs: defaults::DEFAULT_FUNDAMENTALS_TTL_SECS,
            stale_retention_secs: defaults::DEFAULT_STALE_RETENTION_SECS,
            cache_capacity: defaults::DEFAULT_CACHE_CAPACITY,
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: defaults::DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
            backoff_multiplier: defaults::DEFAULT_BACKOFF_MULTIPLIER,
            latency_budget_ms: defaults::DEFAULT_LATENCY_BUDGET_MS,
            breaker_failure_threshold: defaults::DEFAULT_BREAKER_FAILURE_THRESHOLD,
            breaker_cooldown_secs: defaults::DEFAULT_BREAKER_COOLDOWN_SECS,
            fetch_concurrency: defaults::DEFAULT_FETCH_CONCURRENCY,
            rate_limit_interval_ms: defaults::DEFAULT_RATE_LIMIT_INTERVAL_MS,
            http_timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}
