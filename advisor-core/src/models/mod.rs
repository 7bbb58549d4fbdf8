mod degradation_event;
mod document;
mod handler_output;
mod market_data;
mod portfolio;
mod request;
mod retrieval_result;
mod verdict;

pub use degradation_event::DegradationEvent;
pub use document::{ChunkMetadata, Document, IndexedChunk, KnowledgeLevel, LexicalPostings};
pub use handler_output::{HandlerOutput, ResponseFlag, Source};
pub use market_data::{DataClass, Fetched, Freshness};
pub use portfolio::{Holding, Portfolio};
pub use request::{Request, RequestContext, Turn, UserProfile};
pub use retrieval_result::{Attribution, QueryOutcome, RetrievalResult, SearchFilter};
pub use verdict::{ComplianceFlag, Modification, Verdict};
