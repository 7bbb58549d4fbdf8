//! Blocking categories. Matches are suppressed outright.

use regex::Regex;
use std::sync::LazyLock;

use advisor_core::models::ComplianceFlag;

use super::{Action, CompliancePattern, REMOVED_MARKER};

macro_rules! blocking_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Prohibited phrases ─────────────────────────────────────────────────────
blocking_pattern!(RE_GUARANTEED_RETURNS, r"(?i)\bguaranteed\s+returns?\b");
blocking_pattern!(RE_RISK_FREE, r"(?i)\brisk[-\s]free\b");
blocking_pattern!(RE_SURE_THING, r"(?i)\bsure\s+thing\b");
blocking_pattern!(RE_CANT_LOSE, r"(?i)\bcan(?:'|’|no)?t\s+lose\b");
blocking_pattern!(RE_GUARANTEED_PROFIT, r"(?i)\bguaranteed\s+profits?\b");
blocking_pattern!(RE_GUARANTEED_INCOME, r"(?i)\bguaranteed\s+income\b");
blocking_pattern!(RE_NO_RISK, r"(?i)\bno\s+risk\b");
blocking_pattern!(RE_SAFE_BET, r"(?i)\bsafe\s+bet\b");

// ── Return promises: a promise verb followed closely by a percentage ───────
blocking_pattern!(
    RE_RETURN_PROMISE,
    r"(?i)\b(?:guaranteed?|guarantees|promised?|promises|ensures?)\b[^.!?\n%\[\]]{0,40}?\d+(?:\.\d+)?\s?%"
);

pub fn all_patterns() -> Vec<CompliancePattern> {
    let suppress = |name: &'static str, regex: &'static LazyLock<Option<Regex>>| CompliancePattern {
        name,
        regex,
        flag: ComplianceFlag::ProhibitedContent,
        action: Action::Replace(REMOVED_MARKER),
        priority: 1.0,
    };
    vec![
        suppress("guaranteed_returns", &RE_GUARANTEED_RETURNS),
        suppress("risk_free", &RE_RISK_FREE),
        suppress("sure_thing", &RE_SURE_THING),
        suppress("cant_lose", &RE_CANT_LOSE),
        suppress("guaranteed_profit", &RE_GUARANTEED_PROFIT),
        suppress("guaranteed_income", &RE_GUARANTEED_INCOME),
        suppress("no_risk", &RE_NO_RISK),
        suppress("safe_bet", &RE_SAFE_BET),
        CompliancePattern {
            name: "return_promise",
            regex: &RE_RETURN_PROMISE,
            flag: ComplianceFlag::ReturnPromise,
            action: Action::Replace(REMOVED_MARKER),
            priority: 1.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(re: &LazyLock<Option<Regex>>, text: &str) -> bool {
        re.as_ref().map(|r| r.is_match(text)).unwrap_or(false)
    }

    #[test]
    fn return_promise_allows_words_before_percentage() {
        assert!(hits(&RE_RETURN_PROMISE, "guaranteed to return 12%"));
        assert!(hits(&RE_RETURN_PROMISE, "We promise 8.5 % a year"));
        assert!(hits(&RE_RETURN_PROMISE, "this will ensure 10% growth"));
    }

    #[test]
    fn return_promise_does_not_cross_sentences() {
        assert!(!hits(&RE_RETURN_PROMISE, "Nothing is guaranteed. Stocks fell 12%."));
    }

    #[test]
    fn phrases_are_case_insensitive() {
        assert!(hits(&RE_RISK_FREE, "A Risk-Free trade"));
        assert!(hits(&RE_CANT_LOSE, "you can't lose"));
        assert!(hits(&RE_CANT_LOSE, "you cannot lose"));
        assert!(hits(&RE_NO_RISK, "NO RISK"));
    }

    #[test]
    fn phrases_respect_word_boundaries() {
        assert!(!hits(&RE_NO_RISK, "casino risk"));
        assert!(!hits(&RE_SAFE_BET, "safe betting"));
    }
}
