mod advisor_error;
mod classification_error;
mod config_error;
mod handler_error;
mod ingestion_error;
mod provider_error;
mod retrieval_error;

pub use advisor_error::{AdvisorError, AdvisorResult};
pub use classification_error::ClassificationError;
pub use config_error::ConfigError;
pub use handler_error::{HandlerError, HandlerResult};
pub use ingestion_error::IngestionError;
pub use provider_error::{ProviderError, ProviderResult};
pub use retrieval_error::RetrievalError;
