//! Span definitions per pipeline stage: request, dispatch, compliance.

/// Create a request span.
#[macro_export]
macro_rules! request_span {
    ($request_id:expr, $conversation_id:expr) => {
        tracing::info_span!(
            "advisor.request",
            request_id = %$request_id,
            conversation_id = %$conversation_id
        )
    };
}

/// Create a dispatch span.
#[macro_export]
macro_rules! dispatch_span {
    ($intent:expr, $handler:expr) => {
        tracing::info_span!("advisor.dispatch", intent = %$intent, handler = %$handler)
    };
}

/// Create a compliance span.
#[macro_export]
macro_rules! compliance_span {
    ($jurisdiction:expr) => {
        tracing::info_span!("advisor.compliance", jurisdiction = %$jurisdiction)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REQUEST: &str = "advisor.request";
    pub const DISPATCH: &str = "advisor.dispatch";
    pub const COMPLIANCE: &str = "advisor.compliance";
}
