use serde::Serialize;

/// A single symbol moving more than this many percent sets the tone.
pub const SINGLE_MOVE_PCT: f64 = 2.0;
/// Share of advancing symbols above which the market reads positive.
pub const BREADTH_POSITIVE: f64 = 0.7;
/// Share of advancing symbols below which the market reads negative.
pub const BREADTH_NEGATIVE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

/// Tone and headline insight for one symbol's move.
pub fn single(symbol: &str, change_percent: f64) -> (Sentiment, String) {
    if change_percent > SINGLE_MOVE_PCT {
        (
            Sentiment::Positive,
            format!("{symbol} is up {change_percent:.1}% today"),
        )
    } else if change_percent < -SINGLE_MOVE_PCT {
        (
            Sentiment::Negative,
            format!("{symbol} is down {:.1}% today", change_percent.abs()),
        )
    } else {
        (
            Sentiment::Neutral,
            format!("{symbol} is relatively stable today"),
        )
    }
}

/// Tone from the share of symbols that advanced. `None` with no data.
pub fn breadth(changes: &[f64]) -> Option<(Sentiment, String)> {
    if changes.is_empty() {
        return None;
    }
    let up = changes.iter().filter(|c| **c > 0.0).count() as f64 / changes.len() as f64;
    Some(if up > BREADTH_POSITIVE {
        (Sentiment::Positive, "Most tracked symbols are up today".to_string())
    } else if up < BREADTH_NEGATIVE {
        (Sentiment::Negative, "Most tracked symbols are down today".to_string())
    } else {
        (Sentiment::Neutral, "Market is mixed today".to_string())
    })
}
