//! Pipeline counters.
//!
//! [`PipelineMetrics`] is updated from concurrent requests through `&self`;
//! [`MetricsSnapshot`] is the serializable point-in-time view.

use std::sync::atomic::{AtomicU64, Ordering};

use advisor_core::{Intent, ResponseFlag};
use serde::Serialize;

#[derive(Debug, Default)]
pub struct PipelineMetrics {
    requests_by_intent: [AtomicU64; Intent::COUNT],
    degraded: AtomicU64,
    no_sources: AtomicU64,
    low_confidence: AtomicU64,
    blocked: AtomicU64,
    modified: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_by_intent: Vec<(String, u64)>,
    pub total_requests: u64,
    pub degraded_responses: u64,
    pub no_source_responses: u64,
    pub low_confidence_routes: u64,
    pub blocked_verdicts: u64,
    pub modified_verdicts: u64,
    pub cache_hit_rate: f64,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one delivered response by its intent and flags.
    pub fn record_response(&self, intent: Intent, flags: &[ResponseFlag]) {
        self.requests_by_intent[intent.index()].fetch_add(1, Ordering::Relaxed);
        if flags.iter().any(ResponseFlag::is_degradation) {
            self.degraded.fetch_add(1, Ordering::Relaxed);
        }
        for flag in flags {
            let counter = match flag {
                ResponseFlag::NoSources => &self.no_sources,
                ResponseFlag::LowConfidence => &self.low_confidence,
                ResponseFlag::ComplianceBlocked => &self.blocked,
                ResponseFlag::ComplianceModified => &self.modified,
                _ => continue,
            };
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Replace the cache counters with the gateway's current totals.
    pub fn set_cache_counters(&self, hits: u64, misses: u64) {
        self.cache_hits.store(hits, Ordering::Relaxed);
        self.cache_misses.store(misses, Ordering::Relaxed);
    }

    pub fn requests(&self, intent: Intent) -> u64 {
        self.requests_by_intent[intent.index()].load(Ordering::Relaxed)
    }

    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let total = hits + self.cache_misses.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }
        hits as f64 / total as f64
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests_by_intent: Vec<(String, u64)> = Intent::ALL
            .iter()
            .map(|i| (i.as_str().to_string(), self.requests(*i)))
            .collect();
        MetricsSnapshot {
            total_requests: requests_by_intent.iter().map(|(_, n)| n).sum(),
            requests_by_intent,
            degraded_responses: self.degraded.load(Ordering::Relaxed),
            no_source_responses: self.no_sources.load(Ordering::Relaxed),
            low_confidence_routes: self.low_confidence.load(Ordering::Relaxed),
            blocked_verdicts: self.blocked.load(Ordering::Relaxed),
            modified_verdicts: self.modified.load(Ordering::Relaxed),
            cache_hit_rate: self.cache_hit_rate(),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        for counter in self.requests_by_intent.iter().chain([
            &self.degraded,
            &self.no_sources,
            &self.low_confidence,
            &self.blocked,
            &self.modified,
            &self.cache_hits,
            &self.cache_misses,
        ]) {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
