//! Sentence-aware word-window chunking.
//!
//! Windows hold at most `size` words and consecutive windows share at most
//! `overlap` words. A window that stops short of the document end is pulled
//! back to the last sentence terminator in its second half, if there is one.
//! Chunk text is always an exact slice of the source.

/// A chunk's location in its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Byte offset of the first word.
    pub offset: usize,
    /// Byte offset one past the last word.
    pub end: usize,
    /// Index of the first word.
    pub first_word: usize,
    /// Index one past the last word.
    pub last_word: usize,
}

impl ChunkSpan {
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.offset..self.end]
    }

    pub fn word_count(&self) -> usize {
        self.last_word - self.first_word
    }
}

/// Byte ranges of whitespace-separated words.
pub fn word_bounds(text: &str) -> Vec<(usize, usize)> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, text.len()));
    }
    words
}

fn ends_sentence(word: &str) -> bool {
    word.trim_end_matches(['"', '\'', ')', ']'])
        .ends_with(['.', '!', '?'])
}

/// Split `text` into overlapping windows. `overlap` must be smaller than `size`.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<ChunkSpan> {
    let words = word_bounds(text);
    let n = words.len();
    if n == 0 || size == 0 {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut start = 0usize;
    loop {
        let mut end = (start + size).min(n);
        if end < n {
            let earliest = start + size / 2 + 1;
            if let Some(cut) = (earliest..=end)
                .rev()
                .find(|&i| i > start && ends_sentence(&text[words[i - 1].0..words[i - 1].1]))
            {
                end = cut;
            }
        }

        spans.push(ChunkSpan {
            offset: words[start].0,
            end: words[end - 1].1,
            first_word: start,
            last_word: end,
        });

        if end >= n {
            break;
        }
        start = end.saturating_sub(overlap).max(start + 1);
    }
    spans
}
