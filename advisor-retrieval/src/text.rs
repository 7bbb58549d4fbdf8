//! Shared tokenization. Lexical postings, query terms, and the hashed
//! embedder all go through `tokenize` so they agree on what a term is.

use std::collections::HashMap;

/// Split into lowercase alphanumeric terms of at least two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.chars().count() >= 2)
        .map(|s| s.to_lowercase())
        .collect()
}

/// Term frequency map for a piece of text.
pub fn term_frequencies(tokens: &[String]) -> HashMap<String, u32> {
    let mut tf: HashMap<String, u32> = HashMap::new();
    for tok in tokens {
        *tf.entry(tok.clone()).or_default() += 1;
    }
    tf
}

/// Distinct terms in first-seen order.
pub fn distinct_terms(tokens: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokens
        .iter()
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}

/// Tokens joined by single spaces, for phrase containment checks.
pub fn normalized_phrase(tokens: &[String]) -> String {
    tokens.join(" ")
}
