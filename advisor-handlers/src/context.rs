use std::sync::Arc;

use advisor_core::errors::{HandlerError, HandlerResult};
use advisor_core::models::{QueryOutcome, RequestContext, SearchFilter};
use advisor_gateway::DataGateway;
use advisor_retrieval::RetrievalEngine;
use tokio_util::sync::CancellationToken;

/// Everything a handler may use for one dispatch.
///
/// The stores are owned by the orchestrator and shared by reference count;
/// `cancel` fires when the request deadline passes or the caller gives up.
#[derive(Clone)]
pub struct DispatchContext {
    pub request: RequestContext,
    pub retrieval: Arc<RetrievalEngine>,
    pub gateway: Arc<DataGateway>,
    pub cancel: CancellationToken,
    /// Result count to ask retrieval for.
    pub k: usize,
}

impl DispatchContext {
    pub fn new(
        request: RequestContext,
        retrieval: Arc<RetrievalEngine>,
        gateway: Arc<DataGateway>,
        cancel: CancellationToken,
        k: usize,
    ) -> Self {
        Self {
            request,
            retrieval,
            gateway,
            cancel,
            k,
        }
    }

    pub fn query(&self) -> &str {
        &self.request.query
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fail fast when the request was cancelled before work started.
    pub fn ensure_active(&self) -> HandlerResult<()> {
        if self.is_cancelled() {
            return Err(HandlerError::Cancelled);
        }
        Ok(())
    }

    /// Query retrieval for `text`, bounded by the request token.
    pub async fn retrieve(
        &self,
        text: &str,
        filter: Option<&SearchFilter>,
        k: usize,
    ) -> HandlerResult<QueryOutcome> {
        self.retrieval
            .query_with_cancel(text, filter, k, &self.cancel)
            .await
            .map_err(|e| {
                if self.is_cancelled() {
                    HandlerError::Cancelled
                } else {
                    HandlerError::Retrieval {
                        reason: e.to_string(),
                    }
                }
            })
    }
}
