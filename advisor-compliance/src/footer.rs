//! The disclaimer footer appended to reviewed text.
//!
//! ```text
//! <body>
//!
//! **Important Disclaimers:**
//! - ...
//!
//! **Risk Warnings:**
//! - ...
//! ```
//!
//! A footer already present in the input is parsed back and merged, so a
//! second review renders exactly the same footer.

pub const DISCLAIMERS_HEADER: &str = "**Important Disclaimers:**";
pub const WARNINGS_HEADER: &str = "**Risk Warnings:**";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footer {
    pub disclaimers: Vec<String>,
    pub risk_warnings: Vec<String>,
}

impl Footer {
    pub fn is_empty(&self) -> bool {
        self.disclaimers.is_empty() && self.risk_warnings.is_empty()
    }
}

/// Split `text` into its body (trailing whitespace trimmed) and the footer,
/// if any.
///
/// The footer is the trailing run of header, `- ` item and blank lines,
/// starting at its first header. Header lines earlier in the text stay in
/// the body.
pub fn split(text: &str) -> (&str, Option<Footer>) {
    let Some(start) = footer_start(text) else {
        return (text.trim_end(), None);
    };
    (text[..start].trim_end(), Some(parse(&text[start..])))
}

fn footer_start(text: &str) -> Option<usize> {
    let mut start = None;
    let mut end = text.len();
    for line in text.split_inclusive('\n').rev() {
        end -= line.len();
        let trimmed = line.trim();
        if is_header(trimmed) {
            start = Some(end);
        } else if !(trimmed.is_empty() || trimmed.starts_with("- ")) {
            break;
        }
    }
    start
}

fn is_header(line: &str) -> bool {
    line == DISCLAIMERS_HEADER || line == WARNINGS_HEADER
}

#[derive(Clone, Copy)]
enum Section {
    Disclaimers,
    Warnings,
}

fn parse(footer: &str) -> Footer {
    let mut out = Footer::default();
    let mut section = None;
    for line in footer.lines() {
        let trimmed = line.trim();
        if trimmed == DISCLAIMERS_HEADER {
            section = Some(Section::Disclaimers);
            continue;
        }
        if trimmed == WARNINGS_HEADER {
            section = Some(Section::Warnings);
            continue;
        }
        let Some(item) = trimmed.strip_prefix("- ") else { continue };
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let list = match section {
            Some(Section::Disclaimers) => &mut out.disclaimers,
            Some(Section::Warnings) => &mut out.risk_warnings,
            None => continue,
        };
        if !list.iter().any(|existing| existing == item) {
            list.push(item.to_string());
        }
    }
    out
}

/// Render `body` followed by the footer. Empty sections are omitted.
pub fn render(body: &str, footer: &Footer) -> String {
    let mut out = body.trim_end().to_string();
    for (header, items) in [
        (DISCLAIMERS_HEADER, &footer.disclaimers),
        (WARNINGS_HEADER, &footer.risk_warnings),
    ] {
        if items.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(header);
        for item in items {
            out.push_str("\n- ");
            out.push_str(item);
        }
    }
    out
}

/// Union of `existing` and `fresh`, ordered by `rank`. Equal ranks keep the
/// existing footer's order, then the order of `fresh`.
pub fn merge(existing: &[String], fresh: &[String], rank: impl Fn(&str) -> usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + fresh.len());
    for item in existing.iter().chain(fresh) {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged.sort_by_key(|item| rank(item));
    merged
}
