//! Orchestrator: the per-request state machine.
//!
//! Received → Classified → Dispatched → Assembled → Complianced → Delivered.
//! A failed or timed-out dispatch moves to Errored and resumes at assembly
//! with a degraded output, so the compliance gate runs on every path.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use advisor_compliance::ComplianceGate;
use advisor_core::config::{AdvisorConfig, OrchestratorConfig};
use advisor_core::errors::{AdvisorResult, HandlerError};
use advisor_core::models::{DegradationEvent, Request, RequestContext, ResponseFlag};
use advisor_core::traits::IComplianceReviewer;
use advisor_core::{HandlerOutput, Intent, Verdict};
use advisor_gateway::DataGateway;
use advisor_handlers::{DispatchContext, IHandler};
use advisor_observability::tracing_setup::events;
use advisor_observability::{compliance_span, dispatch_span, request_span, ObservabilityEngine};
use advisor_retrieval::RetrievalEngine;
use advisor_session::ConversationLog;
use futures::FutureExt;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

use crate::classifier::{Classification, IntentClassifier};
use crate::envelope::ResponseEnvelope;
use crate::state::{PipelineState, PipelineTrace};
use crate::table::HandlerTable;

/// Why dispatch produced no usable handler output.
#[derive(Debug)]
enum DispatchFailure {
    Handler(HandlerError),
    Timeout(Duration),
    Cancelled,
}

impl DispatchFailure {
    fn flag(&self) -> ResponseFlag {
        match self {
            Self::Handler(HandlerError::Cancelled) | Self::Cancelled => ResponseFlag::Cancelled,
            Self::Handler(_) => ResponseFlag::HandlerError,
            Self::Timeout(_) => ResponseFlag::Timeout,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Handler(e) => e.to_string(),
            Self::Timeout(t) => format!("request timeout of {}ms exceeded", t.as_millis()),
            Self::Cancelled => "request cancelled".to_string(),
        }
    }
}

/// Routes requests to handlers and gates every response.
///
/// Owns the stores handlers read from; they are shared with handlers through
/// each [`DispatchContext`].
pub struct Orchestrator {
    config: OrchestratorConfig,
    classifier: IntentClassifier,
    handlers: HandlerTable,
    retrieval: Arc<RetrievalEngine>,
    gateway: Arc<DataGateway>,
    gate: Arc<dyn IComplianceReviewer>,
    log: Arc<ConversationLog>,
    observability: Arc<ObservabilityEngine>,
}

impl Orchestrator {
    /// Create an orchestrator with the built-in handlers, an empty index and
    /// a gateway with no providers.
    pub fn new(config: &AdvisorConfig) -> Self {
        Self {
            classifier: IntentClassifier::new(config.orchestrator.confidence_threshold),
            handlers: HandlerTable::with_defaults(),
            retrieval: Arc::new(RetrievalEngine::new(config.retrieval.clone())),
            gateway: Arc::new(DataGateway::new(config.gateway.clone())),
            gate: Arc::new(ComplianceGate::new(config.compliance.clone())),
            log: Arc::new(ConversationLog::new(config.session.clone())),
            observability: Arc::new(ObservabilityEngine::new(&config.observability)),
            config: config.orchestrator.clone(),
        }
    }

    /// Validate `config`, then build as [`new`](Self::new).
    pub fn from_config(config: &AdvisorConfig) -> AdvisorResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn with_retrieval(mut self, retrieval: Arc<RetrievalEngine>) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn with_gateway(mut self, gateway: Arc<DataGateway>) -> Self {
        self.gateway = gateway;
        self
    }

    /// Register `handler` for its intent, replacing the existing one.
    pub fn with_handler(mut self, handler: Arc<dyn IHandler>) -> Self {
        self.handlers.register(handler);
        self
    }

    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn with_gate(mut self, gate: Arc<dyn IComplianceReviewer>) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_log(mut self, log: Arc<ConversationLog>) -> Self {
        self.log = log;
        self
    }

    pub fn with_observability(mut self, observability: Arc<ObservabilityEngine>) -> Self {
        self.observability = observability;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn retrieval(&self) -> &Arc<RetrievalEngine> {
        &self.retrieval
    }

    pub fn gateway(&self) -> &Arc<DataGateway> {
        &self.gateway
    }

    pub fn log(&self) -> &Arc<ConversationLog> {
        &self.log
    }

    pub fn observability(&self) -> &Arc<ObservabilityEngine> {
        &self.observability
    }

    /// Classify a query against a conversation's recent history without
    /// dispatching.
    pub fn classify(&self, query: &str, conversation_id: &str) -> Classification {
        let history = self.log.recent(conversation_id, self.config.history_window);
        self.classifier.classify(query, &history)
    }

    /// Process one request to a gated response.
    pub async fn process(&self, request: Request) -> AdvisorResult<ResponseEnvelope> {
        self.process_with_cancel(request, CancellationToken::new())
            .await
    }

    /// `process`, with dispatch abandoned when `cancel` fires. A cancelled
    /// request still yields a gated, degraded envelope.
    ///
    /// Errors only on a fatal internal fault.
    pub async fn process_with_cancel(
        &self,
        request: Request,
        cancel: CancellationToken,
    ) -> AdvisorResult<ResponseEnvelope> {
        let history = self
            .log
            .recent(&request.conversation_id, self.config.history_window);
        let ctx = RequestContext::new(request, history);
        let span = request_span!(ctx.request_id, ctx.conversation_id);
        self.run(ctx, cancel).instrument(span).await
    }

    async fn run(
        &self,
        ctx: RequestContext,
        cancel: CancellationToken,
    ) -> AdvisorResult<ResponseEnvelope> {
        let started = Instant::now();
        let mut trace = PipelineTrace::new();
        events::request_received(&ctx.request_id, &ctx.conversation_id, ctx.history().len());

        // Classify.
        let classification = self.classifier.classify(&ctx.query, ctx.history());
        let fallback = classification.fallback.as_ref().map(|e| e.to_string());
        events::intent_classified(
            &ctx.request_id,
            classification.intent,
            classification.confidence,
            fallback.as_deref(),
        );
        step(&mut trace, PipelineState::Classified);

        // A poisoned index cannot be degraded around.
        self.retrieval.snapshot()?;

        // Dispatch.
        let intent = classification.intent;
        let mut output = match self.dispatch(intent, &ctx, &cancel).await {
            Ok(output) => {
                step(&mut trace, PipelineState::Dispatched);
                output
            }
            Err(degraded) => {
                step(&mut trace, PipelineState::Errored);
                degraded
            }
        };
        if classification.is_fallback() {
            output.flag(ResponseFlag::LowConfidence);
        }

        // Assemble.
        step(&mut trace, PipelineState::Assembled);
        let HandlerOutput {
            text,
            payload,
            sources,
            confidence,
            mut flags,
        } = output;
        debug!(
            sources = sources.len(),
            flags = flags.len(),
            has_payload = payload.is_some(),
            "response assembled"
        );

        // Gate.
        let verdict = self.gate(&ctx, intent, &text);
        if verdict.is_modified() {
            flags.push(ResponseFlag::ComplianceModified);
        }
        if !verdict.approved {
            flags.push(ResponseFlag::ComplianceBlocked);
        }
        flags.extend(verdict.flags.iter().copied().map(ResponseFlag::Compliance));
        step(&mut trace, PipelineState::Complianced);

        // Deliver.
        self.log
            .append(&ctx.conversation_id, &ctx.query, Some(intent), &verdict.text);
        self.observability.record_all(self.gateway.drain_events());
        self.observability.metrics.record_response(intent, &flags);
        let stats = self.gateway.stats();
        self.observability
            .metrics
            .set_cache_counters(stats.hits, stats.misses);

        let degraded = flags.iter().any(|f| f.is_degradation());
        step(&mut trace, PipelineState::Delivered);
        events::response_delivered(
            &ctx.request_id,
            intent,
            degraded,
            started.elapsed().as_millis() as u64,
        );

        Ok(ResponseEnvelope {
            request_id: ctx.request_id,
            conversation_id: ctx.conversation_id,
            text: verdict.text.clone(),
            payload,
            sources,
            flags,
            intent,
            confidence,
            verdict,
            trace,
        })
    }

    /// Run the handler for `intent` under the request timeout and `cancel`.
    /// On failure returns the degraded substitute as `Err`.
    async fn dispatch(
        &self,
        intent: Intent,
        request: &RequestContext,
        cancel: &CancellationToken,
    ) -> Result<HandlerOutput, HandlerOutput> {
        let handler = match self.handlers.get(intent) {
            Ok(h) => Arc::clone(h),
            Err(e) => {
                return Err(self.degrade(request, intent.as_str(), DispatchFailure::Handler(e)));
            }
        };

        let child = cancel.child_token();
        let dispatch_ctx = DispatchContext::new(
            request.clone(),
            Arc::clone(&self.retrieval),
            Arc::clone(&self.gateway),
            child.clone(),
            self.config.retrieval_k,
        );
        let timeout = self.config.request_timeout();
        let span = dispatch_span!(intent.as_str(), handler.name());
        // A panic inside the handler is contained here and degraded like any
        // other handler error.
        let handled = AssertUnwindSafe(handler.handle(&dispatch_ctx)).catch_unwind();

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DispatchFailure::Cancelled),
            r = tokio::time::timeout(timeout, handled).instrument(span) => {
                match r {
                    Ok(Ok(Ok(output))) => Ok(output),
                    Ok(Ok(Err(e))) => Err(DispatchFailure::Handler(e)),
                    Ok(Err(panic)) => Err(DispatchFailure::Handler(HandlerError::Internal {
                        reason: format!("handler panicked: {}", panic_message(&*panic)),
                    })),
                    Err(_) => Err(DispatchFailure::Timeout(timeout)),
                }
            }
        };
        // Stop any sub-call the handler left running.
        child.cancel();

        match outcome {
            Ok(output) => {
                let component = handler_component(handler.name());
                if self.observability.mark_recovered(&component) > 0 {
                    info!(component = %component, "handler recovered");
                }
                Ok(output)
            }
            Err(failure) => Err(self.degrade(request, handler.name(), failure)),
        }
    }

    fn degrade(
        &self,
        request: &RequestContext,
        handler: &str,
        failure: DispatchFailure,
    ) -> HandlerOutput {
        let reason = failure.describe();
        events::handler_failed(&request.request_id, handler, &reason);
        self.observability.record_degradation(DegradationEvent::now(
            handler_component(handler),
            reason,
            "degraded_output",
        ));
        HandlerOutput::degraded(failure.flag())
    }

    fn gate(&self, request: &RequestContext, intent: Intent, text: &str) -> Verdict {
        let jurisdiction = request.profile.jurisdiction.as_str();
        let verdict = compliance_span!(jurisdiction)
            .in_scope(|| self.gate.review(text, jurisdiction, Some(intent)));
        let flags: Vec<&str> = verdict.flags.iter().map(|f| f.as_str()).collect();
        events::compliance_applied(
            &request.request_id,
            verdict.approved,
            verdict.modifications.len(),
            &flags,
        );
        verdict
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

fn handler_component(handler: &str) -> String {
    format!("handler:{handler}")
}

/// Advance the trace; an illegal move is logged and left as `Errored`.
fn step(trace: &mut PipelineTrace, next: PipelineState) {
    if let Err(e) = trace.advance(next) {
        warn!(error = %e, "pipeline transition rejected");
    }
}
