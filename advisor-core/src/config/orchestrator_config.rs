use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Classifications below this confidence route to the default intent.
    pub confidence_threshold: f64,
    /// Wall-clock bound on dispatch.
    pub request_timeout_ms: u64,
    /// Turns of history copied into each request context.
    pub history_window: usize,
    /// Result count handlers ask retrieval for.
    pub retrieval_k: usize,
}

impl OrchestratorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::DEFAULT_CONFIDENCE_THRESHOLD,
            request_timeout_ms: defaults::DEFAULT_REQUEST_TIMEOUT_MS,
            history_window: defaults::DEFAULT_HISTORY_WINDOW,
            retrieval_k: defaults::DEFAULT_RESULT_COUNT,
        }
    }
}
