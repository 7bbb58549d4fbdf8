/// Upstream data provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("provider {provider} timed out after {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },

    #[error("provider unavailable: {provider}")]
    Unavailable { provider: String },

    #[error("request to {provider} failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("incomplete {class} data from {provider}")]
    IncompleteData { provider: String, class: String },

    #[error("circuit open for provider {provider}")]
    CircuitOpen { provider: String },

    #[error("no provider configured")]
    NoProvider,
}

pub type ProviderResult<T> = Result<T, ProviderError>;
