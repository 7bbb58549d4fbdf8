//! Metadata enrichment for documents that arrive without a title or topics.

use regex::Regex;
use std::sync::LazyLock;

static RE_HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*$").ok());

/// Finance topics recognized in content, in reporting order.
pub const TOPIC_KEYWORDS: &[&str] = &[
    "portfolio",
    "risk",
    "return",
    "diversification",
    "volatility",
    "sharpe ratio",
    "beta",
    "alpha",
    "correlation",
    "covariance",
    "efficient frontier",
    "capm",
    "arbitrage",
    "options",
    "derivatives",
    "bonds",
    "stocks",
    "etfs",
    "mutual funds",
    "rebalancing",
];

/// Title from the first top-level `# ` heading line.
pub fn extract_title(text: &str) -> Option<String> {
    let re = RE_HEADING.as_ref()?;
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Known topics mentioned in the text, capped at `max`.
pub fn extract_topics(text: &str, max: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .take(max)
        .map(|kw| kw.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_first_heading() {
        let text = "intro line\n# Understanding Bonds\nbody\n# Second";
        assert_eq!(extract_title(text).as_deref(), Some("Understanding Bonds"));
    }

    #[test]
    fn subheadings_are_not_titles() {
        assert_eq!(extract_title("## Not a title\nbody"), None);
    }

    #[test]
    fn topics_are_capped() {
        let text = "portfolio risk return diversification volatility beta alpha";
        assert_eq!(extract_topics(text, 3), vec!["portfolio", "risk", "return"]);
    }

    #[test]
    fn multiword_topics_match() {
        let topics = extract_topics("The Efficient Frontier and the Sharpe Ratio", 10);
        assert!(topics.contains(&"efficient frontier".to_string()));
        assert!(topics.contains(&"sharpe ratio".to_string()));
    }
}
