/// Domain handler errors. Caught by the orchestrator and turned into a
/// degraded response.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("no handler registered for intent: {intent}")]
    NotRegistered { intent: String },

    #[error("missing input: {field}")]
    MissingInput { field: String },

    #[error("retrieval failed: {reason}")]
    Retrieval { reason: String },

    #[error("data unavailable: {reason}")]
    DataUnavailable { reason: String },

    #[error("handler cancelled")]
    Cancelled,

    #[error("handler failed: {reason}")]
    Internal { reason: String },
}

pub type HandlerResult<T> = Result<T, HandlerError>;
