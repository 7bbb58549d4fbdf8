//! # advisor-session
//!
//! Per-conversation turn history with a fixed bound.
//! Concurrent access via `DashMap`.
//!
//! ## Modules
//!
//! - `manager`: `ConversationLog` with `DashMap` for concurrent access
//! - `context`: `ConversationState`: the bounded turn ring for one conversation
//! - `analytics`: Per-conversation intent mix
//! - `cleanup`: Idle conversation removal
//!
//! ## Eviction
//!
//! Each conversation keeps its `max_turns` most recent turns. Appending past
//! the bound drops the oldest turn and counts it in `evicted_turns`. Sequence
//! numbers keep increasing across evictions, so a turn's `seq` is never
//! reused within a conversation.

pub mod analytics;
pub mod cleanup;
pub mod context;
pub mod manager;

pub use analytics::ConversationAnalytics;
pub use cleanup::{cleanup_expired, cleanup_idle_conversations};
pub use context::{ConversationState, TurnPage};
pub use manager::ConversationLog;
