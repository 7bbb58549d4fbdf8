use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::KnowledgeLevel;
use super::portfolio::Portfolio;
use crate::config::defaults;
use crate::intent::Intent;

/// Inbound request from the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    pub user_id: String,
    pub query: String,
    pub conversation_id: String,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub portfolio: Option<Portfolio>,
}

impl Request {
    pub fn new(
        user_id: impl Into<String>,
        query: impl Into<String>,
        conversation_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            query: query.into(),
            conversation_id: conversation_id.into(),
            profile: None,
            portfolio: None,
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_portfolio(mut self, portfolio: Portfolio) -> Self {
        self.portfolio = Some(portfolio);
        self
    }
}

/// User attributes that shape handler and compliance behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub knowledge_level: KnowledgeLevel,
    #[serde(default = "default_jurisdiction")]
    pub jurisdiction: String,
}

fn default_jurisdiction() -> String {
    defaults::DEFAULT_JURISDICTION.to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            knowledge_level: KnowledgeLevel::default(),
            jurisdiction: default_jurisdiction(),
        }
    }
}

/// One completed exchange in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Per-conversation sequence number, never reused.
    pub seq: u64,
    pub query: String,
    pub intent: Option<Intent>,
    pub response: String,
    pub at: DateTime<Utc>,
}

/// Everything a handler may read about the current request.
///
/// Fixed for the turn; only `history` grows, through `append_turn`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: String,
    pub user_id: String,
    pub conversation_id: String,
    pub query: String,
    pub profile: UserProfile,
    pub portfolio: Option<Portfolio>,
    pub received_at: DateTime<Utc>,
    history: Vec<Turn>,
}

impl RequestContext {
    pub fn new(request: Request, history: Vec<Turn>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            user_id: request.user_id,
            conversation_id: request.conversation_id,
            query: request.query,
            profile: request.profile.unwrap_or_default(),
            portfolio: request.portfolio,
            received_at: Utc::now(),
            history,
        }
    }

    /// Prior turns, oldest first.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Intent of the most recent prior turn, if any.
    pub fn last_intent(&self) -> Option<Intent> {
        self.history.last().and_then(|t| t.intent)
    }

    pub fn append_turn(&mut self, turn: Turn) {
        self.history.push(turn);
    }
}
