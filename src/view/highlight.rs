//! Search-term highlighting.

use ratatui::style::Style;
use ratatui::text::Span;

/// Byte ranges of non-overlapping, ASCII case-insensitive matches of `term`.
pub fn match_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    if term.is_empty() {
        return Vec::new();
    }
    // ASCII lowercasing keeps byte offsets valid in the original string.
    let haystack = text.to_ascii_lowercase();
    let needle = term.to_ascii_lowercase();

    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        ranges.push((start, end));
        from = end;
    }
    ranges
}

/// Split `text` into spans, marking matches of `term` with `highlight`.
pub fn highlight(text: &str, term: Option<&str>, base: Style, highlight: Style) -> Vec<Span<'static>> {
    let ranges = term.map(|t| match_ranges(text, t)).unwrap_or_default();
    if ranges.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let mut spans = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for (start, end) in ranges {
        if start > cursor {
            spans.push(Span::styled(text[cursor..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), base.patch(highlight)));
        cursor = end;
    }
    if cursor < text.len() {
        spans.push(Span::styled(text[cursor..].to_string(), base));
    }
    spans
}
