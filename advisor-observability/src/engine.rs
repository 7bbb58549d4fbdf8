//! [`ObservabilityEngine`]: owns pipeline metrics and the degradation
//! tracker, shared by concurrent requests.

use std::sync::Mutex;

use advisor_core::config::ObservabilityConfig;
use advisor_core::errors::{AdvisorError, AdvisorResult};
use advisor_core::models::DegradationEvent;

use crate::degradation::{evaluate_alerts, AlertPolicy, DegradationAlert, DegradationTracker};
use crate::metrics::PipelineMetrics;

#[derive(Debug)]
pub struct ObservabilityEngine {
    pub metrics: PipelineMetrics,
    degradation: Mutex<DegradationTracker>,
    policy: AlertPolicy,
}

impl ObservabilityEngine {
    pub fn new(config: &ObservabilityConfig) -> Self {
        Self {
            metrics: PipelineMetrics::new(),
            degradation: Mutex::new(DegradationTracker::new()),
            policy: AlertPolicy::from_config(config),
        }
    }

    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    /// Record a degradation event. With a poisoned tracker the event is
    /// only logged.
    pub fn record_degradation(&self, event: DegradationEvent) {
        match self.degradation.lock() {
            Ok(mut tracker) => tracker.record(event),
            Err(_) => crate::tracing_setup::events::degradation_triggered(
                &event.component,
                &event.failure,
                &event.fallback_used,
            ),
        }
    }

    pub fn record_all(&self, events: impl IntoIterator<Item = DegradationEvent>) {
        for event in events {
            self.record_degradation(event);
        }
    }

    /// Mark a component as recovered. Returns how many events were closed.
    pub fn mark_recovered(&self, component: &str) -> usize {
        self.degradation
            .lock()
            .map(|mut t| t.mark_recovered(component))
            .unwrap_or(0)
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.degradation
            .lock()
            .map(|t| t.is_degraded(component))
            .unwrap_or(false)
    }

    pub fn degradation_alerts(&self) -> Vec<DegradationAlert> {
        self.degradation
            .lock()
            .map(|t| evaluate_alerts(&t, &self.policy))
            .unwrap_or_default()
    }

    /// Copy of the degradation history.
    pub fn degradation_history(&self) -> DegradationTracker {
        self.degradation
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Metrics and active degradations as JSON.
    pub fn metrics_snapshot(&self) -> AdvisorResult<serde_json::Value> {
        let metrics = serde_json::to_value(self.metrics.snapshot()).map_err(|e| {
            AdvisorError::FatalFault {
                reason: format!("metrics serialization failed: {e}"),
            }
        })?;
        let history = self.degradation_history();
        let active: Vec<&str> = history
            .active_degradations()
            .iter()
            .map(|t| t.event.component.as_str())
            .collect();
        Ok(serde_json::json!({
            "metrics": metrics,
            "active_degradations": active,
        }))
    }
}

impl Default for ObservabilityEngine {
    fn default() -> Self {
        Self::new(&ObservabilityConfig::default())
    }
}
