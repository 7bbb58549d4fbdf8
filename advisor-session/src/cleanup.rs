//! Conversation lifecycle: removal of conversations nobody has touched for a
//! while.

use tracing::info;

use crate::manager::ConversationLog;

/// Remove conversations idle for at least `timeout`.
///
/// The idle check and the removal happen under the same shard lock, so a
/// turn appended concurrently keeps its conversation alive.
pub fn cleanup_idle_conversations(log: &ConversationLog, timeout: chrono::Duration) -> usize {
    let mut removed = 0;
    for id in log.conversation_ids() {
        if log.remove_if_idle(&id, timeout) {
            removed += 1;
        }
    }
    if removed > 0 {
        info!(
            removed,
            remaining = log.conversation_count(),
            "idle conversations removed"
        );
    }
    removed
}

/// Cleanup with the configured idle timeout.
pub fn cleanup_expired(log: &ConversationLog) -> usize {
    let secs = i64::try_from(log.config().idle_timeout_secs).unwrap_or(i64::MAX);
    let timeout = chrono::Duration::try_seconds(secs).unwrap_or(chrono::Duration::MAX);
    cleanup_idle_conversations(log, timeout)
}
