//! Per-conversation analytics: intent distribution across every turn ever
//! appended, evicted ones included.

use serde::{Deserialize, Serialize};

use advisor_core::Intent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationAnalytics {
    /// Turn count per intent, indexed by `Intent::index`.
    pub intent_counts: [u64; Intent::COUNT],
    /// Turns whose intent was not recorded.
    pub unclassified: u64,
}

impl ConversationAnalytics {
    pub fn record(&mut self, intent: Option<Intent>) {
        match intent {
            Some(i) => self.intent_counts[i.index()] += 1,
            None => self.unclassified += 1,
        }
    }

    pub fn count(&self, intent: Intent) -> u64 {
        self.intent_counts[intent.index()]
    }

    pub fn total(&self) -> u64 {
        self.intent_counts.iter().sum::<u64>() + self.unclassified
    }

    /// Most frequent intent. Ties resolve in `Intent::ALL` order.
    pub fn dominant_intent(&self) -> Option<Intent> {
        let mut best: Option<(Intent, u64)> = None;
        for intent in Intent::ALL {
            let n = self.count(intent);
            if n > 0 && best.map(|(_, b)| n > b).unwrap_or(true) {
                best = Some((intent, n));
            }
        }
        best.map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_dominant_intent() {
        let mut a = ConversationAnalytics::default();
        a.record(Some(Intent::Market));
        a.record(Some(Intent::Tutor));
        a.record(Some(Intent::Market));
        a.record(None);
        assert_eq!(a.count(Intent::Market), 2);
        assert_eq!(a.total(), 4);
        assert_eq!(a.dominant_intent(), Some(Intent::Market));
    }

    #[test]
    fn ties_prefer_tutor_then_portfolio() {
        let mut a = ConversationAnalytics::default();
        a.record(Some(Intent::Portfolio));
        a.record(Some(Intent::Tutor));
        assert_eq!(a.dominant_intent(), Some(Intent::Tutor));
        assert_eq!(ConversationAnalytics::default().dominant_intent(), None);
    }
}
