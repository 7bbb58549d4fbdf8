//! Level-aware phrasing for tutoring answers.
//!
//! Every choice is a pure function of the query and level, so the same
//! question at the same level always reads the same way.

use advisor_core::models::KnowledgeLevel;

use crate::format::{pick, title_case};

pub const NO_CONTENT_MESSAGE: &str = "I'd be happy to help you learn about that topic! \
However, I don't have specific content about it in my knowledge base. \
Could you rephrase your question or ask about a related concept?";

pub const CLARIFYING_QUESTIONS: [&str; 3] = [
    "What specific aspect of finance would you like to learn about?",
    "Are you looking for beginner, intermediate, or advanced content?",
    "What's your current experience level with investing?",
];

/// Terms reported as concepts covered, in reporting order.
pub const FINANCIAL_TERMS: &[&str] = &[
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
    "capital asset pricing model",
    "arbitrage",
    "bond",
    "coupon",
    "rebalancing",
    "options",
];

pub const MAX_CONCEPTS: usize = 5;
pub const FOLLOW_UP_COUNT: usize = 2;

fn openers(level: KnowledgeLevel) -> &'static [&'static str] {
    match level {
        KnowledgeLevel::Beginner => &[
            "Great question! Let me help you understand this step by step.",
            "That's an excellent starting point for learning about finance!",
            "I'm excited to help you learn about this important concept!",
        ],
        KnowledgeLevel::Intermediate => &[
            "Interesting question! Let's dive deeper into this concept.",
            "That shows good understanding! Let me build on what you know.",
            "Great question! This is a key concept in financial analysis.",
        ],
        KnowledgeLevel::Advanced => &[
            "Excellent question! This is a sophisticated concept that requires careful analysis.",
            "That's a nuanced question that touches on advanced financial theory.",
            "Great question! Let's explore the complexities of this topic.",
        ],
    }
}

fn follow_up_pool(level: KnowledgeLevel) -> &'static [&'static str] {
    match level {
        KnowledgeLevel::Beginner => &[
            "What do you think are the main benefits of this approach?",
            "How might this concept apply to your personal finances?",
            "What questions do you have about this topic?",
            "Would you like to see a practical example?",
        ],
        KnowledgeLevel::Intermediate => &[
            "How does this relate to other financial concepts you know?",
            "What are the potential risks and limitations?",
            "How would you apply this in a real-world scenario?",
            "What factors would you consider when implementing this?",
        ],
        KnowledgeLevel::Advanced => &[
            "What are the mathematical foundations of this concept?",
            "How does this relate to modern portfolio theory?",
            "What are the empirical studies that support this?",
            "How would you model this quantitatively?",
        ],
    }
}

/// Opening sentence for an answer.
pub fn opener(query: &str, level: KnowledgeLevel) -> &'static str {
    let table = openers(level);
    table[pick(query, table.len())]
}

/// Two consecutive follow-ups from the level's pool.
pub fn follow_ups(query: &str, level: KnowledgeLevel) -> Vec<String> {
    let pool = follow_up_pool(level);
    let start = pick(query, pool.len());
    (0..FOLLOW_UP_COUNT.min(pool.len()))
        .map(|i| pool[(start + i) % pool.len()].to_string())
        .collect()
}

/// Known finance terms mentioned in `content`, title-cased.
pub fn concepts(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    FINANCIAL_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .take(MAX_CONCEPTS)
        .map(|term| title_case(term))
        .collect()
}

pub fn learning_objectives(concepts: &[String]) -> Vec<String> {
    let subject = concepts.first().map(String::as_str).unwrap_or("the topic");
    let mut objectives = vec![
        format!("Understand the concept of {subject}"),
        "Apply the knowledge to real-world scenarios".to_string(),
        "Identify key factors and considerations".to_string(),
    ];
    if let [first, second, ..] = concepts {
        objectives.push(format!("Recognize the relationship between {first} and {second}"));
    }
    objectives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opener_comes_from_level_table() {
        let line = opener("what is a bond", KnowledgeLevel::Advanced);
        assert!(openers(KnowledgeLevel::Advanced).contains(&line));
    }

    #[test]
    fn follow_ups_are_distinct_and_deterministic() {
        let a = follow_ups("explain beta", KnowledgeLevel::Intermediate);
        assert_eq!(a.len(), 2);
        assert_ne!(a[0], a[1]);
        assert_eq!(a, follow_ups("explain beta", KnowledgeLevel::Intermediate));
    }

    #[test]
    fn concepts_are_capped_and_title_cased() {
        let text = "Portfolio risk and return, diversification, volatility and the Sharpe ratio";
        let found = concepts(text);
        assert_eq!(found.len(), MAX_CONCEPTS);
        assert_eq!(found[0], "Portfolio");
        assert!(!found.contains(&"Sharpe Ratio".to_string()));
    }

    #[test]
    fn objectives_mention_relationship_with_two_concepts() {
        let objectives = learning_objectives(&["Risk".to_string(), "Return".to_string()]);
        assert_eq!(objectives.len(), 4);
        assert_eq!(objectives[0], "Understand the concept of Risk");
        assert_eq!(objectives[3], "Recognize the relationship between Risk and Return");

        let objectives = learning_objectives(&[]);
        assert_eq!(objectives[0], "Understand the concept of the topic");
        assert_eq!(objectives.len(), 3);
    }
}
