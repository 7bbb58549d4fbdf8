use serde::{Deserialize, Serialize};

use super::defaults;

/// Conversation log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Turns kept per conversation; the oldest is evicted beyond this.
    pub max_turns: usize,
    /// Conversations idle longer than this are removed by cleanup.
    pub idle_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: defaults::DEFAULT_MAX_TURNS,
            idle_timeout_secs: defaults::DEFAULT_IDLE_TIMEOUT_SECS,
        }
    }
}
