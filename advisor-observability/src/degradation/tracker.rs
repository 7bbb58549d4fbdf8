//! Record every degradation event: component, failure mode, fallback used,
//! timestamp, recovery status.

use advisor_core::models::DegradationEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

/// A tracked degradation event with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Degradation history for alerting and reporting.
///
/// Events older than `retention` are dropped on each `record`.
#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
    retention: chrono::Duration,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            retention: chrono::Duration::days(2),
        }
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retention(retention: chrono::Duration) -> Self {
        Self {
            events: Vec::new(),
            retention,
        }
    }

    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        let cutoff = Utc::now() - self.retention;
        self.events
            .retain(|t| t.event.timestamp > cutoff || t.recovery_status == RecoveryStatus::Active);
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark every active degradation of `component` as recovered. Returns
    /// how many were closed.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut closed = 0;
        for tracked in self.events.iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                closed += 1;
            }
        }
        closed
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events.iter().any(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        })
    }

    /// Count events in the last N seconds for a given component.
    pub fn count_recent(&self, component: &str, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// Duration a component has been continuously degraded, or None if not degraded.
    pub fn degraded_duration(&self, component: &str) -> Option<chrono::Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| {
                t.event.component == component && t.recovery_status == RecoveryStatus::Active
            })
            .map(|t| t.event.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_at(component: &str, age: chrono::Duration) -> DegradationEvent {
        DegradationEvent {
            timestamp: Utc::now() - age,
            ..DegradationEvent::now(component, "failed", "fallback")
        }
    }

    #[test]
    fn recovery_closes_all_active_events_of_component() {
        let mut t = DegradationTracker::new();
        t.record(DegradationEvent::now("gateway", "timeout", "stale_cache"));
        t.record(DegradationEvent::now("gateway", "timeout", "stale_cache"));
        t.record(DegradationEvent::now("handler:market", "error", "degraded_output"));
        assert_eq!(t.mark_recovered("gateway"), 2);
        assert!(!t.is_degraded("gateway"));
        assert!(t.is_degraded("handler:market"));
    }

    #[test]
    fn recovered_events_past_retention_are_dropped() {
        let mut t = DegradationTracker::with_retention(chrono::Duration::hours(1));
        t.record(event_at("old", chrono::Duration::hours(2)));
        t.mark_recovered("old");
        t.record(DegradationEvent::now("new", "x", "y"));
        assert_eq!(t.events().len(), 1);
        assert_eq!(t.events()[0].event.component, "new");
    }

    #[test]
    fn recent_count_respects_window() {
        let mut t = DegradationTracker::new();
        t.record(event_at("c", chrono::Duration::minutes(90)));
        t.record(event_at("c", chrono::Duration::minutes(10)));
        assert_eq!(t.count_recent("c", 3600), 1);
        assert!(t.degraded_duration("c").unwrap() >= chrono::Duration::minutes(89));
    }
}
