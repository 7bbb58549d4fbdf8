pub mod advice;
pub mod prohibited;
pub mod protected;

use advisor_core::models::ComplianceFlag;
use regex::Regex;
use std::sync::LazyLock;

/// Replacement for suppressed content.
pub const REMOVED_MARKER: &str = "[content removed for compliance]";

/// What the gate does with a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Rewrite the matched span.
    Replace(&'static str),
    /// Raise the flag, leave the text.
    FlagOnly,
}

/// A compiled, built-in compliance pattern.
pub struct CompliancePattern {
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub flag: ComplianceFlag,
    pub action: Action,
    /// Wins equal-length overlaps.
    pub priority: f64,
}

/// A blocking phrase added through configuration.
#[derive(Debug, Clone)]
pub struct CustomPhrase {
    pub phrase: String,
    pub regex: Regex,
}

impl CustomPhrase {
    /// Case-insensitive, word-bounded where the phrase starts or ends with a
    /// word character.
    pub fn compile(phrase: &str) -> Result<Self, regex::Error> {
        let trimmed = phrase.trim();
        let word = |c: Option<char>| c.map(|c| c.is_alphanumeric() || c == '_').unwrap_or(false);
        let mut pattern = String::from("(?i)");
        if word(trimmed.chars().next()) {
            pattern.push_str(r"\b");
        }
        pattern.push_str(&regex::escape(trimmed));
        if word(trimmed.chars().last()) {
            pattern.push_str(r"\b");
        }
        Ok(Self {
            phrase: trimmed.to_string(),
            regex: Regex::new(&pattern)?,
        })
    }
}

/// Pattern match before protected-span filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatch {
    pub flag: ComplianceFlag,
    pub pattern_name: String,
    /// `None` for flag-only categories.
    pub replacement: Option<String>,
    pub start: usize,
    pub end: usize,
    pub priority: f64,
}

/// Built-in patterns in scan order: blocking first, then advice.
pub fn builtin_patterns() -> Vec<CompliancePattern> {
    let mut all = prohibited::all_patterns();
    all.extend(advice::all_patterns());
    all
}

/// Run every pattern against `text`. Matches are sorted by start position
/// (descending) and may overlap.
pub fn scan_all(text: &str, custom: &[CustomPhrase]) -> Vec<RawMatch> {
    let mut matches = Vec::new();

    for pat in builtin_patterns() {
        let Some(re) = pat.regex.as_ref() else { continue };
        for m in re.find_iter(text) {
            let replacement = match pat.action {
                Action::Replace(with) => Some(match_case(m.as_str(), with)),
                Action::FlagOnly => None,
            };
            matches.push(RawMatch {
                flag: pat.flag,
                pattern_name: pat.name.to_string(),
                replacement,
                start: m.start(),
                end: m.end(),
                priority: pat.priority,
            });
        }
    }

    for custom in custom {
        for m in custom.regex.find_iter(text) {
            matches.push(RawMatch {
                flag: ComplianceFlag::ProhibitedContent,
                pattern_name: format!("custom:{}", custom.phrase),
                replacement: Some(REMOVED_MARKER.to_string()),
                start: m.start(),
                end: m.end(),
                priority: 1.0,
            });
        }
    }

    matches.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));
    matches
}

/// Matches that rewrite text, without overlaps, sorted by start descending.
pub fn edits(matches: &[RawMatch]) -> Vec<RawMatch> {
    let mut edits: Vec<RawMatch> = matches
        .iter()
        .filter(|m| m.replacement.is_some())
        .cloned()
        .collect();
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));
    dedup_overlapping(&mut edits);
    edits
}

/// Remove overlapping matches, keeping the longer one, or the
/// higher-priority one if lengths are equal.
fn dedup_overlapping(matches: &mut Vec<RawMatch>) {
    let mut i = 0;
    while i + 1 < matches.len() {
        let current = &matches[i];
        let next = &matches[i + 1];

        // Sorted desc by start, so next.start <= current.start.
        if next.end > current.start {
            let current_len = current.end - current.start;
            let next_len = next.end - next.start;
            if next_len > current_len
                || (next_len == current_len && next.priority > current.priority)
            {
                matches.remove(i);
            } else {
                matches.remove(i + 1);
            }
        } else {
            i += 1;
        }
    }
}

/// Capitalize `replacement` when `original` starts with an uppercase letter.
fn match_case(original: &str, replacement: &str) -> String {
    let upper = original.chars().next().map(char::is_uppercase).unwrap_or(false);
    if !upper || replacement.starts_with('[') {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_patterns_compile() {
        for pat in builtin_patterns() {
            assert!(pat.regex.is_some(), "pattern '{}' failed to compile", pat.name);
        }
    }

    #[test]
    fn overlapping_edits_keep_the_longer_match() {
        let text = "guaranteed returns of 8% a year";
        let all = scan_all(text, &[]);
        let flags: Vec<_> = all.iter().map(|m| m.flag).collect();
        assert!(flags.contains(&ComplianceFlag::ProhibitedContent));
        assert!(flags.contains(&ComplianceFlag::ReturnPromise));

        let kept = edits(&all);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].flag, ComplianceFlag::ReturnPromise);
        assert_eq!(&text[kept[0].start..kept[0].end], "guaranteed returns of 8%");
    }

    #[test]
    fn softening_preserves_leading_capital() {
        let all = scan_all("You should read more.", &[]);
        let soft = all
            .iter()
            .find(|m| m.flag == ComplianceFlag::PersonalizedAdvice)
            .unwrap();
        assert_eq!(soft.replacement.as_deref(), Some("One might consider"));
    }

    #[test]
    fn custom_phrase_is_escaped_and_bounded() {
        let custom = CustomPhrase::compile("double your money").unwrap();
        assert!(custom.regex.is_match("Double Your Money fast"));
        assert!(!custom.regex.is_match("double your moneybags"));
        let dotted = CustomPhrase::compile("10x.").unwrap();
        assert!(!dotted.regex.is_match("10xa"));
    }
}
