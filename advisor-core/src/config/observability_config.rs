use serde::{Deserialize, Serialize};

use super::defaults;

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `ADVISOR_LOG` is unset.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
    /// Sliding window for degradation alerts.
    pub alert_window_secs: i64,
    /// Degradations of one component within the window that raise a warning.
    pub alert_threshold: usize,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
            alert_window_secs: defaults::DEFAULT_ALERT_WINDOW_SECS,
            alert_threshold: defaults::DEFAULT_ALERT_THRESHOLD,
        }
    }
}
