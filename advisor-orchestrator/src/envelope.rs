//! The response handed back to the presentation layer.

use advisor_core::models::{ResponseFlag, Source};
use advisor_core::{Intent, Verdict};
use serde::Serialize;

use crate::state::PipelineTrace;

/// Final, gated response for one request.
///
/// `text` is always the compliance verdict's text, never the raw handler
/// output.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub request_id: String,
    pub conversation_id: String,
    pub text: String,
    /// Handler-specific structured data, if the handler produced any.
    pub payload: Option<serde_json::Value>,
    pub sources: Vec<Source>,
    pub flags: Vec<ResponseFlag>,
    pub intent: Intent,
    pub confidence: f64,
    pub verdict: Verdict,
    pub trace: PipelineTrace,
}

impl ResponseEnvelope {
    pub fn has_flag(&self, flag: ResponseFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Whether any degradation flag is set.
    pub fn is_degraded(&self) -> bool {
        self.flags.iter().any(|f| f.is_degradation())
    }

    /// Flag labels, in the order they were raised.
    pub fn flag_labels(&self) -> Vec<&'static str> {
        self.flags.iter().map(|f| f.as_str()).collect()
    }
}
