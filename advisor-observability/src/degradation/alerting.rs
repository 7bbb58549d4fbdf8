//! Alert thresholds: more than `threshold` degradations of one component in
//! the window → warning; a component degraded past `critical_after` →
//! critical.

use advisor_core::config::ObservabilityConfig;
use serde::{Deserialize, Serialize};

use super::tracker::DegradationTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    None,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationAlert {
    pub level: AlertLevel,
    pub component: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertPolicy {
    pub window_secs: i64,
    pub threshold: usize,
    pub critical_after: chrono::Duration,
}

impl AlertPolicy {
    pub fn from_config(config: &ObservabilityConfig) -> Self {
        Self {
            window_secs: config.alert_window_secs,
            threshold: config.alert_threshold,
            critical_after: chrono::Duration::hours(24),
        }
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::from_config(&ObservabilityConfig::default())
    }
}

/// Evaluate alerts for every component in the tracker, one alert at most
/// per component.
pub fn evaluate_alerts(
    tracker: &DegradationTracker,
    policy: &AlertPolicy,
) -> Vec<DegradationAlert> {
    let mut alerts = Vec::new();
    let mut seen_components = std::collections::HashSet::new();

    for tracked in tracker.events() {
        let component = &tracked.event.component;
        if !seen_components.insert(component.clone()) {
            continue;
        }

        if let Some(duration) = tracker.degraded_duration(component) {
            if duration > policy.critical_after {
                alerts.push(DegradationAlert {
                    level: AlertLevel::Critical,
                    component: component.clone(),
                    message: format!(
                        "{} has been degraded for over {} hours",
                        component,
                        policy.critical_after.num_hours()
                    ),
                });
                continue;
            }
        }

        let recent_count = tracker.count_recent(component, policy.window_secs);
        if recent_count > policy.threshold {
            alerts.push(DegradationAlert {
                level: AlertLevel::Warning,
                component: component.clone(),
                message: format!(
                    "{} has {} degradation events in the last {}s",
                    component, recent_count, policy.window_secs
                ),
            });
        }
    }

    alerts
}
