use super::{
    ClassificationError, ConfigError, HandlerError, IngestionError, ProviderError, RetrievalError,
};

/// Top-level error for the advisor pipeline.
///
/// Everything except `FatalFault` is recoverable: the orchestrator converts it
/// into a flagged, degraded response.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("ingestion error: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("degraded mode: {component} using {fallback}")]
    DegradedMode { component: String, fallback: String },

    #[error("fatal fault: {reason}")]
    FatalFault { reason: String },
}

impl AdvisorError {
    /// Whether this error must abort the pipeline instead of degrading.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalFault { .. })
    }
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
