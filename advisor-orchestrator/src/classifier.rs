//! Intent classification by keyword matching.
//!
//! Score per intent = keyword hits (substring match on the lowercased
//! query); known ticker symbols count as market hits. Confidence = best
//! score / query word count, clamped to [0, 1]. Ties go to the intent of the
//! most recent turn, then to `Intent::ALL` order.

use advisor_core::errors::ClassificationError;
use advisor_core::models::Turn;
use advisor_core::Intent;
use advisor_handlers::market::symbols::symbol_hits;
use serde::Serialize;

/// Keyword patterns mapped to intents.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Tutor,
        &[
            "explain",
            "what is",
            "how does",
            "learn",
            "teach",
            "concept",
            "definition",
            "meaning",
            "tutorial",
            "guide",
            "help me understand",
        ],
    ),
    (
        Intent::Portfolio,
        &[
            "portfolio",
            "analyze",
            "holdings",
            "performance",
            "allocation",
            "rebalance",
            "risk",
            "diversification",
            "sharpe",
            "volatility",
            "drawdown",
            "returns",
            "metrics",
        ],
    ),
    (
        Intent::Market,
        &[
            "market",
            "price",
            "quote",
            "news",
            "update",
            "trend",
            "forecast",
            "analysis",
            "sector",
            "index",
            "stocks",
            "trading",
            "volatility",
        ],
    ),
];

/// Outcome of classifying one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Intent to dispatch to.
    pub intent: Intent,
    pub confidence: f64,
    /// Raw keyword score per intent, indexed by `Intent::index`.
    pub scores: [usize; Intent::COUNT],
    /// Why the default intent was used instead of the best match.
    #[serde(skip)]
    pub fallback: Option<ClassificationError>,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    threshold: f64,
}

impl IntentClassifier {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Keyword score per intent.
    pub fn scores(query: &str) -> [usize; Intent::COUNT] {
        let query_lower = query.to_lowercase();
        let mut scores = [0usize; Intent::COUNT];
        for &(intent, keywords) in INTENT_KEYWORDS {
            scores[intent.index()] = keywords
                .iter()
                .filter(|kw| query_lower.contains(**kw))
                .count();
        }
        scores[Intent::Market.index()] += symbol_hits(query);
        scores
    }

    /// Classify `query` given prior turns, oldest first. Never fails: empty
    /// and low-confidence queries route to `Intent::DEFAULT` with the reason
    /// in `fallback`.
    pub fn classify(&self, query: &str, history: &[Turn]) -> Classification {
        let words = query.split_whitespace().count();
        if words == 0 {
            return Classification {
                intent: Intent::DEFAULT,
                confidence: 0.0,
                scores: [0; Intent::COUNT],
                fallback: Some(ClassificationError::EmptyQuery),
            };
        }

        let scores = Self::scores(query);
        let best = scores.iter().copied().max().unwrap_or(0);
        let tied: Vec<Intent> = Intent::ALL
            .into_iter()
            .filter(|i| scores[i.index()] == best)
            .collect();
        let previous = history.iter().rev().find_map(|t| t.intent);
        let winner = match previous {
            Some(p) if tied.contains(&p) => p,
            _ => tied.first().copied().unwrap_or(Intent::DEFAULT),
        };

        let confidence = (best as f64 / words as f64).clamp(0.0, 1.0);
        if best == 0 || confidence < self.threshold {
            return Classification {
                intent: Intent::DEFAULT,
                confidence,
                scores,
                fallback: Some(ClassificationError::LowConfidence {
                    confidence,
                    threshold: self.threshold,
                }),
            };
        }

        Classification {
            intent: winner,
            confidence,
            scores,
            fallback: None,
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(advisor_core::config::defaults::DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn turn(intent: Intent) -> Turn {
        Turn {
            seq: 0,
            query: String::new(),
            intent: Some(intent),
            response: String::new(),
            at: Utc::now(),
        }
    }

    #[test]
    fn keyword_hits_pick_intent() {
        let c = IntentClassifier::default().classify("Analyze my portfolio allocation", &[]);
        assert_eq!(c.intent, Intent::Portfolio);
        assert_eq!(c.scores[Intent::Portfolio.index()], 3);
        assert!((c.confidence - 0.75).abs() < 1e-12);
        assert!(!c.is_fallback());
    }

    #[test]
    fn ticker_symbols_count_for_market() {
        let c = IntentClassifier::default().classify("What is the current price of AAPL?", &[]);
        assert_eq!(c.intent, Intent::Market);
        assert_eq!(c.scores[Intent::Market.index()], 2);
    }

    #[test]
    fn tie_prefers_previous_turn_intent() {
        let classifier = IntentClassifier::default();
        // "what is" (tutor) vs "sharpe" (portfolio)
        let query = "what is sharpe";
        assert_eq!(classifier.classify(query, &[]).intent, Intent::Tutor);
        let history = [turn(Intent::Market), turn(Intent::Portfolio)];
        assert_eq!(classifier.classify(query, &history).intent, Intent::Portfolio);
    }

    #[test]
    fn previous_intent_outside_tie_is_ignored() {
        let c = IntentClassifier::default().classify("explain bonds", &[turn(Intent::Market)]);
        assert_eq!(c.intent, Intent::Tutor);
    }

    #[test]
    fn empty_query_falls_back() {
        let c = IntentClassifier::default().classify("   ", &[]);
        assert_eq!(c.intent, Intent::DEFAULT);
        assert_eq!(c.fallback, Some(ClassificationError::EmptyQuery));
    }

    #[test]
    fn below_threshold_routes_default() {
        // one market hit over twelve words
        let query = "I was wondering whether you could tell me something about the market";
        let c = IntentClassifier::new(0.1).classify(query, &[]);
        assert!(c.confidence < 0.1);
        assert_eq!(c.intent, Intent::DEFAULT);
        assert!(matches!(c.fallback, Some(ClassificationError::LowConfidence { .. })));

        let c = IntentClassifier::new(0.05).classify(query, &[]);
        assert_eq!(c.intent, Intent::Market);
    }
}
