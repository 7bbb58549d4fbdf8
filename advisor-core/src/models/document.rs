use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Audience level of a piece of content or of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl KnowledgeLevel {
    pub const ALL: [KnowledgeLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a profile label. `expert` maps to `Advanced`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" | "expert" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl Default for KnowledgeLevel {
    fn default() -> Self {
        Self::Beginner
    }
}

impl fmt::Display for KnowledgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document handed to ingestion. Text is already extracted plain text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub level: Option<KnowledgeLevel>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_level(mut self, level: KnowledgeLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Source metadata copied onto every chunk of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub document_id: String,
    pub title: String,
    pub level: Option<KnowledgeLevel>,
    pub topics: Vec<String>,
    pub jurisdiction: Option<String>,
    pub url: Option<String>,
}

/// Per-chunk lexical posting data: term frequencies and token length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalPostings {
    pub term_freqs: HashMap<String, u32>,
    pub length: usize,
}

/// An immutable chunk in the retrieval index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    /// `{document_id}#{ordinal}`.
    pub id: String,
    /// Global insertion order. Used as the final ranking tie-break.
    pub seq: u64,
    pub text: String,
    /// Byte offset of `text` within the parent document.
    pub offset: usize,
    pub metadata: ChunkMetadata,
    /// blake3 hash of the parent document's text.
    pub content_hash: String,
    pub postings: LexicalPostings,
    pub embedding: Vec<f32>,
}
