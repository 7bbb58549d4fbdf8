//! Provider fallback chain.
//!
//! Chain: primary → fallback(s) → error. Each provider gets the retry
//! policy and its own circuit breaker; every upstream call waits on the
//! shared rate limiter. Falling back past the primary is logged as a
//! degradation event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use advisor_core::errors::{ProviderError, ProviderResult};
use advisor_core::models::{DataClass, DegradationEvent};
use advisor_core::traits::IDataProvider;
use serde_json::Value;
use tracing::{debug, warn};

use crate::breaker::{BreakerState, CircuitBreaker};
use crate::rate_limit::RateLimiter;
use crate::retry::RetryPolicy;

/// A provider entry in the fallback chain.
struct ChainEntry {
    provider: Arc<dyn IDataProvider>,
    breaker: CircuitBreaker,
}

/// Successful chain fetch.
#[derive(Debug, Clone)]
pub struct ChainFetch {
    pub value: Value,
    pub provider: String,
}

/// Ordered providers with retry, breakers, and rate limiting.
pub struct ProviderChain {
    chain: Vec<ChainEntry>,
    retry: RetryPolicy,
    limiter: RateLimiter,
    breaker_threshold: u32,
    breaker_cooldown: Duration,
    upstream_calls: AtomicU64,
    /// Accumulated degradation events, drained by observability.
    events: Mutex<Vec<DegradationEvent>>,
}

impl ProviderChain {
    pub fn new(
        retry: RetryPolicy,
        limiter: RateLimiter,
        breaker_threshold: u32,
        breaker_cooldown: Duration,
    ) -> Self {
        Self {
            chain: Vec::new(),
            retry,
            limiter,
            breaker_threshold,
            breaker_cooldown,
            upstream_calls: AtomicU64::new(0),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Arc<dyn IDataProvider>) {
        self.chain.push(ChainEntry {
            provider,
            breaker: CircuitBreaker::new(self.breaker_threshold, self.breaker_cooldown),
        });
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Provider names in chain order.
    pub fn provider_names(&self) -> Vec<String> {
        self.chain
            .iter()
            .map(|e| e.provider.name().to_string())
            .collect()
    }

    /// Breaker state of a provider, by name.
    pub fn breaker_state(&self, provider: &str) -> Option<BreakerState> {
        self.chain
            .iter()
            .find(|e| e.provider.name() == provider)
            .map(|e| e.breaker.state())
    }

    pub fn upstream_calls(&self) -> u64 {
        self.upstream_calls.load(Ordering::Relaxed)
    }

    /// Fetch from the first provider that returns complete data.
    pub async fn fetch(&self, key: &str, class: DataClass) -> ProviderResult<ChainFetch> {
        let mut last_error = None;

        for (i, entry) in self.chain.iter().enumerate() {
            let name = entry.provider.name();
            if !entry.provider.is_available() {
                last_error = Some(ProviderError::Unavailable {
                    provider: name.to_string(),
                });
                continue;
            }
            if !entry.breaker.allow() {
                debug!(provider = name, "circuit open, skipping provider");
                last_error = Some(ProviderError::CircuitOpen {
                    provider: name.to_string(),
                });
                continue;
            }

            match self.attempt(entry, key, class).await {
                Ok(value) => {
                    if i > 0 {
                        let primary_name = self
                            .chain
                            .first()
                            .map(|e| e.provider.name())
                            .unwrap_or("unknown");
                        self.record(DegradationEvent::now(
                            "gateway",
                            format!("{primary_name} failed for {class} {key}"),
                            name,
                        ));
                    }
                    return Ok(ChainFetch {
                        value,
                        provider: name.to_string(),
                    });
                }
                Err(e) => {
                    warn!(
                        provider = name,
                        key,
                        class = class.as_str(),
                        error = %e,
                        "provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ProviderError::NoProvider))
    }

    /// Up to `max_attempts` calls to one provider with backoff between them.
    async fn attempt(&self, entry: &ChainEntry, key: &str, class: DataClass) -> ProviderResult<Value> {
        let name = entry.provider.name();
        let mut last_error = None;

        for attempt in 1..=self.retry.max_attempts {
            if attempt > 1 {
                if !entry.breaker.allow() {
                    break;
                }
                let delay = self.retry.backoff(attempt - 1);
                debug!(provider = name, attempt, delay_ms = delay.as_millis() as u64, "retrying");
                tokio::time::sleep(delay).await;
            }

            self.limiter.acquire().await;
            self.upstream_calls.fetch_add(1, Ordering::Relaxed);

            let result = entry.provider.fetch(key, class).await.and_then(|value| {
                if class.is_complete(&value) {
                    Ok(value)
                } else {
                    Err(ProviderError::IncompleteData {
                        provider: name.to_string(),
                        class: class.as_str().to_string(),
                    })
                }
            });

            match result {
                Ok(value) => {
                    entry.breaker.record_success();
                    return Ok(value);
                }
                Err(e) => {
                    entry.breaker.record_failure();
                    debug!(provider = name, attempt, error = %e, "upstream attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ProviderError::CircuitOpen {
            provider: name.to_string(),
        }))
    }

    pub(crate) fn record(&self, event: DegradationEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}
