//! ConversationLog: concurrent per-conversation history via DashMap.

use std::sync::Arc;

use advisor_core::config::SessionConfig;
use advisor_core::models::Turn;
use advisor_core::Intent;
use dashmap::DashMap;
use tracing::debug;

use crate::analytics::ConversationAnalytics;
use crate::context::{ConversationState, TurnPage};

/// Append-only, bounded conversation history keyed by conversation id.
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct ConversationLog {
    conversations: Arc<DashMap<String, ConversationState>>,
    config: SessionConfig,
}

impl ConversationLog {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            conversations: Arc::new(DashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Append a completed turn, creating the conversation on first use.
    pub fn append(
        &self,
        conversation_id: &str,
        query: &str,
        intent: Option<Intent>,
        response: &str,
    ) -> Turn {
        let mut entry = self
            .conversations
            .entry(conversation_id.to_string())
            .or_insert_with(|| ConversationState::new(conversation_id, self.config.max_turns));
        let evicted_before = entry.evicted_turns;
        let turn = entry.push(query, intent, response);
        if entry.evicted_turns > evicted_before {
            debug!(
                conversation_id,
                evicted_turns = entry.evicted_turns,
                "oldest turn evicted"
            );
        }
        turn
    }

    /// Every retained turn, oldest first. Unknown conversations are empty.
    pub fn history(&self, conversation_id: &str) -> Vec<Turn> {
        self.conversations
            .get(conversation_id)
            .map(|c| c.turns())
            .unwrap_or_default()
    }

    /// The last `n` turns, oldest first.
    pub fn recent(&self, conversation_id: &str, n: usize) -> Vec<Turn> {
        self.conversations
            .get(conversation_id)
            .map(|c| c.recent(n))
            .unwrap_or_default()
    }

    /// Newest-first pagination over retained turns.
    pub fn page(&self, conversation_id: &str, offset: usize, limit: usize) -> TurnPage {
        self.conversations
            .get(conversation_id)
            .map(|c| c.page(offset, limit))
            .unwrap_or_else(|| TurnPage {
                offset,
                ..TurnPage::default()
            })
    }

    /// Drop a conversation. Returns whether it existed.
    pub fn clear(&self, conversation_id: &str) -> bool {
        self.conversations.remove(conversation_id).is_some()
    }

    /// Snapshot of one conversation.
    pub fn get(&self, conversation_id: &str) -> Option<ConversationState> {
        self.conversations.get(conversation_id).map(|c| c.clone())
    }

    pub fn analytics(&self, conversation_id: &str) -> Option<ConversationAnalytics> {
        self.conversations
            .get(conversation_id)
            .map(|c| c.analytics.clone())
    }

    pub fn evicted_turns(&self, conversation_id: &str) -> u64 {
        self.conversations
            .get(conversation_id)
            .map(|c| c.evicted_turns)
            .unwrap_or(0)
    }

    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    pub fn conversation_ids(&self) -> Vec<String> {
        self.conversations.iter().map(|r| r.key().clone()).collect()
    }

    /// Remove conversations idle for at least `timeout`. Returns how many.
    pub fn cleanup_idle(&self, timeout: chrono::Duration) -> usize {
        crate::cleanup::cleanup_idle_conversations(self, timeout)
    }

    pub(crate) fn remove_if_idle(&self, conversation_id: &str, timeout: chrono::Duration) -> bool {
        self.conversations
            .remove_if(conversation_id, |_, c| c.idle_duration() >= timeout)
            .is_some()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
