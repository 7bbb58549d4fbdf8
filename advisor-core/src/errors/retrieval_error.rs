/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("{search} search timed out after {timeout_ms}ms")]
    SubSearchTimedOut { search: String, timeout_ms: u64 },

    #[error("index unavailable: {reason}")]
    IndexUnavailable { reason: String },
}
