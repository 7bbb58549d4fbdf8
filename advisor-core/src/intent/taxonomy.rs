use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of request intents. Each maps to exactly one domain handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Educational questions about financial concepts.
    Tutor,
    /// Analysis of the user's holdings.
    Portfolio,
    /// Quotes, news, and market conditions.
    Market,
}

impl Intent {
    /// Total number of intent types.
    pub const COUNT: usize = 3;

    /// All variants in tie-break order.
    pub const ALL: [Intent; 3] = [Self::Tutor, Self::Portfolio, Self::Market];

    /// Intent used when classification is inconclusive.
    pub const DEFAULT: Intent = Self::Tutor;

    /// Stable index into per-intent tables.
    pub fn index(self) -> usize {
        match self {
            Self::Tutor => 0,
            Self::Portfolio => 1,
            Self::Market => 2,
        }
    }

    /// Lowercase label used in logs, metrics, and disclaimers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tutor => "tutor",
            Self::Portfolio => "portfolio",
            Self::Market => "market",
        }
    }

    /// Parse a label produced by `as_str`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
