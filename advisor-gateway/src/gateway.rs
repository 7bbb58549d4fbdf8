//! DataGateway: cache-aside access to volatile market data.
//!
//! fetch: fresh cache hit → return. Otherwise join the single-flight for the
//! key; the leader walks the provider chain under the latency budget and
//! publishes the result to every waiter. When upstream fails (or the budget
//! or cancellation cuts it short) the last cached value is served as stale,
//! or an explicit unavailable result is returned. A `fetch_many` batch shares
//! one deadline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use advisor_core::config::GatewayConfig;
use advisor_core::models::{DataClass, DegradationEvent, Fetched, Freshness};
use advisor_core::traits::IDataProvider;
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::breaker::BreakerState;
use crate::cache::{cache_key, CacheEntry, MarketCache};
use crate::degradation::ProviderChain;
use crate::rate_limit::RateLimiter;
use crate::retry::RetryPolicy;
use crate::single_flight::{Flight, SingleFlight};

/// Point-in-time gateway counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GatewayStats {
    pub hits: u64,
    pub misses: u64,
    /// Calls that waited on another caller's in-flight fetch.
    pub coalesced: u64,
    pub upstream_calls: u64,
    pub stale_serves: u64,
    pub unavailable: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
    stale_serves: AtomicU64,
    unavailable: AtomicU64,
}

/// Why a fetch stopped waiting on upstream.
#[derive(Debug, Clone, Copy)]
enum Interrupted {
    Budget(Duration),
    Cancelled,
}

pub struct DataGateway {
    config: GatewayConfig,
    cache: MarketCache,
    chain: ProviderChain,
    flights: SingleFlight<Fetched>,
    fan_out: Semaphore,
    counters: Counters,
}

impl DataGateway {
    /// Gateway with an empty provider chain. Add providers with
    /// [`with_provider`](Self::with_provider) in priority order.
    pub fn new(config: GatewayConfig) -> Self {
        let chain = ProviderChain::new(
            RetryPolicy::from_config(&config),
            RateLimiter::new(config.rate_limit_interval()),
            config.breaker_failure_threshold,
            Duration::from_secs(config.breaker_cooldown_secs),
        );
        Self {
            cache: MarketCache::new(&config),
            fan_out: Semaphore::new(config.fetch_concurrency.max(1)),
            chain,
            flights: SingleFlight::new(),
            counters: Counters::default(),
            config,
        }
    }

    /// Append a provider to the fallback chain.
    pub fn with_provider(mut self, provider: Arc<dyn IDataProvider>) -> Self {
        self.chain.push(provider);
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.chain.provider_names()
    }

    pub fn breaker_state(&self, provider: &str) -> Option<BreakerState> {
        self.chain.breaker_state(provider)
    }

    /// Fetch one value. Never fails: check `freshness` on the result.
    pub async fn fetch(&self, key: &str, class: DataClass) -> Fetched {
        self.fetch_with_cancel(key, class, &CancellationToken::new())
            .await
    }

    /// `fetch`, cut short by `cancel` the same way as by the latency budget.
    pub async fn fetch_with_cancel(
        &self,
        key: &str,
        class: DataClass,
        cancel: &CancellationToken,
    ) -> Fetched {
        let deadline = Instant::now() + self.config.latency_budget();
        self.fetch_until(key, class, cancel, deadline, None).await
    }

    /// Fetch several keys of one class with bounded parallelism. Results are
    /// in input order.
    pub async fn fetch_many(&self, keys: &[String], class: DataClass) -> Vec<Fetched> {
        self.fetch_many_with_cancel(keys, class, &CancellationToken::new())
            .await
    }

    /// `fetch_many` under one latency budget for the whole batch. Time spent
    /// queued for a fan-out slot counts against it; keys still waiting at the
    /// deadline are served stale or unavailable.
    pub async fn fetch_many_with_cancel(
        &self,
        keys: &[String],
        class: DataClass,
        cancel: &CancellationToken,
    ) -> Vec<Fetched> {
        let deadline = Instant::now() + self.config.latency_budget();
        join_all(
            keys.iter()
                .map(|key| self.fetch_until(key, class, cancel, deadline, Some(&self.fan_out))),
        )
        .await
    }

    async fn fetch_until(
        &self,
        key: &str,
        class: DataClass,
        cancel: &CancellationToken,
        deadline: Instant,
        slots: Option<&Semaphore>,
    ) -> Fetched {
        let ck = cache_key(key, class);

        if let Some(entry) = self.cache.get_fresh(&ck) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, class = class.as_str(), hit = true, "cache lookup");
            return entry.to_fetched(key, class, Freshness::Fresh);
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key, class = class.as_str(), hit = false, "cache lookup");

        let upstream = async {
            let _permit = match slots {
                Some(slots) => slots.acquire().await.ok(),
                None => None,
            };
            self.load(key, class, &ck).await
        };
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Interrupted::Cancelled),
            r = tokio::time::timeout_at(deadline, upstream) => {
                r.map_err(|_| Interrupted::Budget(self.config.latency_budget()))
            }
        };

        match outcome {
            Ok(fetched) => fetched,
            Err(reason) => {
                let failure = match reason {
                    Interrupted::Budget(b) => format!("latency budget of {}ms exceeded", b.as_millis()),
                    Interrupted::Cancelled => "request cancelled".to_string(),
                };
                warn!(key, class = class.as_str(), %failure, "upstream wait abandoned");
                self.degrade(key, class, &ck, &failure)
            }
        }
    }

    /// Drop one cached value.
    pub fn invalidate(&self, key: &str, class: DataClass) {
        self.cache.invalidate(&cache_key(key, class));
    }

    /// Drop every cached value.
    pub fn invalidate_all(&self) {
        self.cache.clear();
        info!("gateway cache cleared");
    }

    pub fn stats(&self) -> GatewayStats {
        GatewayStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            coalesced: self.counters.coalesced.load(Ordering::Relaxed),
            upstream_calls: self.chain.upstream_calls(),
            stale_serves: self.counters.stale_serves.load(Ordering::Relaxed),
            unavailable: self.counters.unavailable.load(Ordering::Relaxed),
        }
    }

    /// Drain accumulated degradation events (fallbacks, stale serves,
    /// unavailable results).
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    /// Lead or follow the in-flight fetch for `ck`.
    async fn load(&self, key: &str, class: DataClass, ck: &str) -> Fetched {
        loop {
            match self.flights.join(ck) {
                Flight::Leader(guard) => {
                    // A previous leader may have filled the cache since our lookup.
                    if let Some(entry) = self.cache.get_fresh(ck) {
                        let fetched = entry.to_fetched(key, class, Freshness::Fresh);
                        guard.complete(fetched.clone());
                        return fetched;
                    }
                    let fetched = self.fetch_upstream(key, class, ck).await;
                    guard.complete(fetched.clone());
                    return fetched;
                }
                Flight::Follower(rx) => {
                    self.counters.coalesced.fetch_add(1, Ordering::Relaxed);
                    if let Some(fetched) = SingleFlight::wait(rx).await {
                        return fetched;
                    }
                    debug!(key, class = class.as_str(), "in-flight leader gave up, retrying");
                }
            }
        }
    }

    async fn fetch_upstream(&self, key: &str, class: DataClass, ck: &str) -> Fetched {
        match self.chain.fetch(key, class).await {
            Ok(hit) => {
                let entry = CacheEntry::new(hit.value, hit.provider, self.config.ttl_for(class));
                let fetched = entry.to_fetched(key, class, Freshness::Fresh);
                self.cache.insert(ck.to_string(), entry);
                fetched
            }
            Err(e) => self.degrade(key, class, ck, &e.to_string()),
        }
    }

    /// Serve the last cached value as stale, or an unavailable result.
    fn degrade(&self, key: &str, class: DataClass, ck: &str, failure: &str) -> Fetched {
        match self.cache.get(ck) {
            Some(entry) => {
                self.counters.stale_serves.fetch_add(1, Ordering::Relaxed);
                self.chain.record(DegradationEvent::now(
                    "gateway",
                    format!("{class} {key}: {failure}"),
                    "stale_cache",
                ));
                warn!(key, class = class.as_str(), failure, "serving stale value");
                entry.to_fetched(key, class, Freshness::Stale)
            }
            None => {
                self.counters.unavailable.fetch_add(1, Ordering::Relaxed);
                self.chain.record(DegradationEvent::now(
                    "gateway",
                    format!("{class} {key}: {failure}"),
                    "unavailable",
                ));
                warn!(key, class = class.as_str(), failure, "data unavailable");
                Fetched::unavailable(key, class)
            }
        }
    }
}
