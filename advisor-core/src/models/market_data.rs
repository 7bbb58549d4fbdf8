use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of volatile external data. Each class has its own TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataClass {
    Quote,
    News,
    Fundamentals,
}

impl DataClass {
    pub const ALL: [DataClass; 3] = [Self::Quote, Self::News, Self::Fundamentals];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::News => "news",
            Self::Fundamentals => "fundamentals",
        }
    }

    /// Whether a provider payload carries everything this class needs.
    ///
    /// Quotes need a numeric `price`, news must be an array, fundamentals a
    /// non-empty object.
    pub fn is_complete(self, value: &serde_json::Value) -> bool {
        match self {
            Self::Quote => value
                .get("price")
                .map(serde_json::Value::is_number)
                .unwrap_or(false),
            Self::News => value.is_array(),
            Self::Fundamentals => value.as_object().map(|o| !o.is_empty()).unwrap_or(false),
        }
    }
}

impl fmt::Display for DataClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How current a fetched value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Within TTL, from cache or a fresh upstream call.
    Fresh,
    /// Past TTL, served because upstream failed.
    Stale,
    /// Upstream failed and nothing was cached.
    Unavailable,
}

/// Result of a gateway fetch. Always well-formed; check `freshness`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fetched {
    pub key: String,
    pub class: DataClass,
    pub value: Option<serde_json::Value>,
    pub freshness: Freshness,
    /// Provider that produced the value.
    pub provider: Option<String>,
    /// When the value was obtained from upstream.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Fetched {
    pub fn unavailable(key: impl Into<String>, class: DataClass) -> Self {
        Self {
            key: key.into(),
            class,
            value: None,
            freshness: Freshness::Unavailable,
            provider: None,
            fetched_at: None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.freshness == Freshness::Fresh
    }

    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }

    pub fn is_unavailable(&self) -> bool {
        self.freshness == Freshness::Unavailable
    }
}
