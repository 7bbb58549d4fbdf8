use serde::{Deserialize, Serialize};

use super::document::{ChunkMetadata, KnowledgeLevel};

/// Citation data for a retrieved chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub document_id: String,
    pub title: String,
    /// Byte offset of the chunk within its document.
    pub offset: usize,
    pub chunk_id: String,
    pub url: Option<String>,
}

/// A ranked hit. Scores are normalized to [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub chunk_id: String,
    pub text: String,
    pub lexical_score: f64,
    pub vector_score: f64,
    pub fused_score: f64,
    /// Insertion sequence of the chunk.
    pub seq: u64,
    pub attribution: Attribution,
}

/// Restricts candidate chunks before any scoring happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub level: Option<KnowledgeLevel>,
    pub topic: Option<String>,
    pub jurisdiction: Option<String>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: KnowledgeLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.topic.is_none() && self.jurisdiction.is_none()
    }

    /// Whether a chunk is eligible. A set criterion requires the chunk to
    /// carry a matching value; chunks without one are excluded.
    pub fn matches(&self, meta: &ChunkMetadata) -> bool {
        if let Some(level) = self.level {
            if meta.level != Some(level) {
                return false;
            }
        }
        if let Some(topic) = &self.topic {
            if !meta.topics.iter().any(|t| t.eq_ignore_ascii_case(topic)) {
                return false;
            }
        }
        if let Some(jurisdiction) = &self.jurisdiction {
            match &meta.jurisdiction {
                Some(j) if j.eq_ignore_ascii_case(jurisdiction) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Result of a hybrid query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub results: Vec<RetrievalResult>,
    /// Corpus or post-filter candidate set was empty, or nothing scored.
    pub no_sources: bool,
    /// One of the sub-searches timed out or failed.
    pub partial: bool,
}

impl QueryOutcome {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            no_sources: true,
            partial: false,
        }
    }
}
