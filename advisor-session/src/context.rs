//! ConversationState: the bounded turn ring for one conversation.

use std::collections::VecDeque;

use advisor_core::models::Turn;
use advisor_core::Intent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::ConversationAnalytics;

/// One page of turns, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnPage {
    pub turns: Vec<Turn>,
    /// Turns currently retained for the conversation.
    pub total: usize,
    pub offset: usize,
    /// More (older) turns exist past this page.
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub conversation_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Oldest first.
    turns: VecDeque<Turn>,
    max_turns: usize,
    next_seq: u64,
    /// Turns dropped to respect `max_turns`.
    pub evicted_turns: u64,
    pub analytics: ConversationAnalytics,
}

impl ConversationState {
    pub fn new(conversation_id: impl Into<String>, max_turns: usize) -> Self {
        let now = Utc::now();
        let max_turns = max_turns.max(1);
        Self {
            conversation_id: conversation_id.into(),
            created_at: now,
            last_activity: now,
            turns: VecDeque::with_capacity(max_turns.min(64)),
            max_turns,
            next_seq: 0,
            evicted_turns: 0,
            analytics: ConversationAnalytics::default(),
        }
    }

    /// Append a turn, evicting the oldest one when full.
    pub fn push(&mut self, query: &str, intent: Option<Intent>, response: &str) -> Turn {
        let now = Utc::now();
        let turn = Turn {
            seq: self.next_seq,
            query: query.to_string(),
            intent,
            response: response.to_string(),
            at: now,
        };
        self.next_seq += 1;
        while self.turns.len() >= self.max_turns {
            self.turns.pop_front();
            self.evicted_turns += 1;
        }
        self.turns.push_back(turn.clone());
        self.analytics.record(intent);
        self.last_activity = now;
        turn
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Sequence number the next turn will get.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// All retained turns, oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    /// The last `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> Vec<Turn> {
        let skip = self.turns.len().saturating_sub(n);
        self.turns.iter().skip(skip).cloned().collect()
    }

    /// `limit` turns starting `offset` turns back from the newest.
    pub fn page(&self, offset: usize, limit: usize) -> TurnPage {
        let total = self.turns.len();
        let turns: Vec<Turn> = self
            .turns
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        TurnPage {
            has_more: offset.saturating_add(turns.len()) < total,
            turns,
            total,
            offset,
        }
    }

    pub fn idle_duration(&self) -> chrono::Duration {
        Utc::now() - self.last_activity
    }
}
