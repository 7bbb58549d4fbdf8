//! Spans the gate never rewrites and never flags: source attributions,
//! numeric citations, earlier suppression markers, and a trailing sources
//! list.

use regex::Regex;
use std::sync::LazyLock;

static RE_SOURCE_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[Source:[^\]\n]*\]").ok());
static RE_CITATION: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[\d+\]").ok());
static RE_REMOVED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[content removed for compliance\]").ok());
static RE_SOURCES_HEADING: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:#+[ \t]*|\*\*)?sources:(?:\*\*)?").ok()
});
static RE_LIST_ITEM: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:[-*][ \t]|\[\d+\][ \t]|\d+\.[ \t])").ok());

/// Protected byte ranges of `text`, unordered.
pub fn spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    for re in [&RE_SOURCE_MARKER, &RE_CITATION, &RE_REMOVED] {
        if let Some(re) = re.as_ref() {
            spans.extend(re.find_iter(text).map(|m| (m.start(), m.end())));
        }
    }
    if let Some(start) = sources_section_start(text) {
        spans.push((start, text.len()));
    }
    spans
}

/// Start of the last `Sources:` heading, if it opens a trailing list.
///
/// The heading must stand on its own line, and every non-empty line after
/// it must be a list item or a numbered citation (`- `, `* `, `[n] `,
/// `n. `). A heading with inline text or followed by prose protects nothing
/// beyond the markers inside it.
pub fn sources_section_start(text: &str) -> Option<usize> {
    let heading = RE_SOURCES_HEADING.as_ref()?.find_iter(text).last()?;
    let list_item = RE_LIST_ITEM.as_ref()?;
    let rest = &text[heading.end()..];
    let (inline, after_heading) = rest.split_once('\n').unwrap_or((rest, ""));
    if !inline.trim().is_empty() {
        return None;
    }
    after_heading
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .all(|line| list_item.is_match(line))
        .then_some(heading.start())
}

/// Whether `[start, end)` touches any protected span.
pub fn overlaps(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| start < e && s < end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_markers_and_citations_are_protected() {
        let text = "Bonds pay coupons [1]. [Source: Guaranteed Returns Explained]";
        let spans = spans(text);
        let marker = text.find("[Source:").unwrap();
        assert!(overlaps(&spans, marker + 10, marker + 20));
        let cite = text.find("[1]").unwrap();
        assert!(overlaps(&spans, cite, cite + 1));
        assert!(!overlaps(&spans, 0, 5));
    }

    #[test]
    fn trailing_sources_section_runs_to_end() {
        let text = "Body text.\n\nSources:\n- Sure Thing Strategies\n";
        let start = sources_section_start(text).unwrap();
        assert_eq!(&text[start..start + 8], "Sources:");
        assert!(overlaps(&spans(text), text.len() - 3, text.len() - 1));
    }

    #[test]
    fn sources_heading_followed_by_prose_is_not_a_section() {
        let text = "Sources: see our notes.\nThis fund is a sure thing.";
        assert!(sources_section_start(text).is_none());
        let guaranteed = text.find("sure thing").unwrap();
        assert!(!overlaps(&spans(text), guaranteed, guaranteed + 10));

        let mixed = "Intro.\nSources:\n- A\nAct now, it is a sure thing.";
        assert!(sources_section_start(mixed).is_none());
        assert!(sources_section_start("Sources: a sure thing").is_none());
    }

    #[test]
    fn numbered_and_bracketed_citations_keep_the_section() {
        let text = "Body.\n\n## Sources:\n1. First\n\n[2] Second\n* Third\n";
        assert!(sources_section_start(text).is_some());
    }

    #[test]
    fn bold_sources_heading_is_recognized() {
        assert!(sources_section_start("x\n**Sources:**\n- a").is_some());
        assert!(sources_section_start("Open sources: many").is_none());
    }
}
