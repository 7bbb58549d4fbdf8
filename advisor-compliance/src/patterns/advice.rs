//! Non-blocking categories: directive advice is softened, recommendations and
//! pressure language are flagged for disclaimers but left in place.

use regex::Regex;
use std::sync::LazyLock;

use advisor_core::models::ComplianceFlag;

use super::{Action, CompliancePattern};

macro_rules! advice_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Personalized advice (softened) ─────────────────────────────────────────
advice_pattern!(RE_YOU_SHOULD, r"(?i)\byou\s+should\b");
advice_pattern!(RE_YOU_MUST, r"(?i)\byou\s+must\b");
advice_pattern!(RE_YOU_NEED_TO, r"(?i)\byou\s+need\s+to\b");
advice_pattern!(RE_I_RECOMMEND_YOU, r"(?i)\bi\s+recommend\s+you\b");
advice_pattern!(RE_YOU_OUGHT_TO, r"(?i)\byou\s+ought\s+to\b");
advice_pattern!(RE_YOU_WOULD_BE_WISE_TO, r"(?i)\byou\s+would\s+be\s+wise\s+to\b");
advice_pattern!(RE_YOU_WOULD_BENEFIT_FROM, r"(?i)\byou\s+would\s+benefit\s+from\b");

// ── Investment recommendations ─────────────────────────────────────────────
advice_pattern!(
    RE_RECOMMENDATION,
    r"(?i)\b(?:buy|sell|invest\s+in|purchase|avoid)\s+\w+"
);

// ── Time pressure ──────────────────────────────────────────────────────────
advice_pattern!(
    RE_TIME_SENSITIVE,
    r"(?i)\b(?:today\s+only|limited\s+time|act\s+now|immediate\s+action|urgent|time[-\s]sensitive|expires\s+soon)\b"
);

/// Directive phrase → educational phrasing.
pub const SOFTENINGS: &[(&str, &str)] = &[
    ("you should", "one might consider"),
    ("you must", "it's important to understand that"),
    ("you need to", "it's worth noting that"),
    ("i recommend you", "research suggests that"),
    ("you ought to", "it may be beneficial to"),
    ("you would be wise to", "it's worth considering that"),
    ("you would benefit from", "one might benefit from"),
];

pub fn all_patterns() -> Vec<CompliancePattern> {
    let soften = |name: &'static str,
                  regex: &'static LazyLock<Option<Regex>>,
                  replacement: &'static str| CompliancePattern {
        name,
        regex,
        flag: ComplianceFlag::PersonalizedAdvice,
        action: Action::Replace(replacement),
        priority: 0.5,
    };
    vec![
        soften("you_should", &RE_YOU_SHOULD, SOFTENINGS[0].1),
        soften("you_must", &RE_YOU_MUST, SOFTENINGS[1].1),
        soften("you_need_to", &RE_YOU_NEED_TO, SOFTENINGS[2].1),
        soften("i_recommend_you", &RE_I_RECOMMEND_YOU, SOFTENINGS[3].1),
        soften("you_ought_to", &RE_YOU_OUGHT_TO, SOFTENINGS[4].1),
        soften("you_would_be_wise_to", &RE_YOU_WOULD_BE_WISE_TO, SOFTENINGS[5].1),
        soften("you_would_benefit_from", &RE_YOU_WOULD_BENEFIT_FROM, SOFTENINGS[6].1),
        CompliancePattern {
            name: "recommendation",
            regex: &RE_RECOMMENDATION,
            flag: ComplianceFlag::InvestmentRecommendation,
            action: Action::FlagOnly,
            priority: 0.2,
        },
        CompliancePattern {
            name: "time_sensitive",
            regex: &RE_TIME_SENSITIVE,
            flag: ComplianceFlag::TimeSensitive,
            action: Action::FlagOnly,
            priority: 0.2,
        },
    ]
}
