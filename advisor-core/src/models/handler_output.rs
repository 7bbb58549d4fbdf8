use serde::{Deserialize, Serialize};

use super::retrieval_result::Attribution;
use super::verdict::ComplianceFlag;

/// Condition markers carried on handler outputs and final responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFlag {
    /// Retrieval found no eligible content.
    NoSources,
    /// A retrieval sub-search timed out; results may be incomplete.
    PartialRetrieval,
    /// Served from cache past its TTL.
    DataStale,
    /// Upstream data could not be obtained and no cache existed.
    DataUnavailable,
    /// Classification confidence fell below the threshold.
    LowConfidence,
    /// The handler failed and a generic output was substituted.
    HandlerError,
    /// The request deadline expired before the handler finished.
    Timeout,
    /// The caller cancelled the request.
    Cancelled,
    /// The compliance gate changed the text.
    ComplianceModified,
    /// The compliance gate suppressed blocking content.
    ComplianceBlocked,
    /// A category raised by the compliance gate.
    Compliance(ComplianceFlag),
}

impl ResponseFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSources => "no_sources",
            Self::PartialRetrieval => "partial_retrieval",
            Self::DataStale => "data_stale",
            Self::DataUnavailable => "data_unavailable",
            Self::LowConfidence => "low_confidence",
            Self::HandlerError => "handler_error",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::ComplianceModified => "compliance_modified",
            Self::ComplianceBlocked => "compliance_blocked",
            Self::Compliance(flag) => flag.as_str(),
        }
    }

    /// Flags that mark a response as degraded.
    pub fn is_degradation(&self) -> bool {
        matches!(
            self,
            Self::HandlerError
                | Self::Timeout
                | Self::Cancelled
                | Self::DataUnavailable
                | Self::DataStale
                | Self::PartialRetrieval
        )
    }
}

/// A cited source in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub document_id: Option<String>,
    pub url: Option<String>,
    pub offset: Option<usize>,
    pub score: Option<f64>,
}

impl Source {
    /// A source without a document behind it, e.g. a market data feed.
    pub fn named(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            document_id: None,
            url: None,
            offset: None,
            score: None,
        }
    }

    pub fn from_attribution(attribution: &Attribution, score: f64) -> Self {
        Self {
            title: attribution.title.clone(),
            document_id: Some(attribution.document_id.clone()),
            url: attribution.url.clone(),
            offset: Some(attribution.offset),
            score: Some(score),
        }
    }
}

/// What a domain handler produces for one dispatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandlerOutput {
    pub text: String,
    /// Handler-specific structured data.
    pub payload: Option<serde_json::Value>,
    pub sources: Vec<Source>,
    /// Handler's own confidence in [0, 1].
    pub confidence: f64,
    pub flags: Vec<ResponseFlag>,
}

impl HandlerOutput {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    /// Add a flag once.
    pub fn flag(&mut self, flag: ResponseFlag) {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
    }

    pub fn has_flag(&self, flag: ResponseFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Generic substitute used when a handler fails or times out.
    pub fn degraded(flag: ResponseFlag) -> Self {
        let mut out = Self::new(
            "I'm sorry, I couldn't complete that request right now. Please try again in a moment.",
            0.0,
        );
        out.flag(flag);
        out
    }
}
