//! Structured log events for the request pipeline.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use advisor_core::Intent;

pub fn request_received(request_id: &str, conversation_id: &str, history_turns: usize) {
    tracing::info!(
        event = "request_received",
        request_id = %request_id,
        conversation_id = %conversation_id,
        history_turns,
        "request received"
    );
}

/// Log the routing decision. `fallback` carries the reason the default
/// intent was used, if it was.
pub fn intent_classified(
    request_id: &str,
    intent: Intent,
    confidence: f64,
    fallback: Option<&str>,
) {
    tracing::info!(
        event = "intent_classified",
        request_id = %request_id,
        intent = intent.as_str(),
        confidence,
        fallback = fallback.unwrap_or(""),
        "intent classified"
    );
}

pub fn handler_failed(request_id: &str, handler: &str, error: &str) {
    tracing::warn!(
        event = "handler_failed",
        request_id = %request_id,
        handler = %handler,
        error = %error,
        "handler failed, substituting degraded output"
    );
}

pub fn compliance_applied(request_id: &str, approved: bool, modifications: usize, flags: &[&str]) {
    tracing::info!(
        event = "compliance_applied",
        request_id = %request_id,
        approved,
        modifications,
        flags = ?flags,
        "compliance verdict applied"
    );
}

pub fn response_delivered(request_id: &str, intent: Intent, degraded: bool, elapsed_ms: u64) {
    tracing::info!(
        event = "response_delivered",
        request_id = %request_id,
        intent = intent.as_str(),
        degraded,
        elapsed_ms,
        "response delivered"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
