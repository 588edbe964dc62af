//! Measuring and hard-wrapping styled text.
//!
//! The list reads row heights back from what it laid out, so the wrapping
//! used for measuring and for drawing must be the same function. Wrapping is
//! by display width, character by character, preserving span styles.

use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthChar;

/// Display width of the widest line.
pub fn natural_width(text: &Text<'_>) -> u16 {
    let widest = text.lines.iter().map(Line::width).max().unwrap_or(0);
    u16::try_from(widest).unwrap_or(u16::MAX)
}

/// Split one line into lines no wider than `width`.
///
/// A character wider than `width` gets a line of its own. An empty line stays
/// one empty line. With `width == 0` every input line maps to one empty line.
pub fn wrap_line(line: &Line<'_>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width);
    if width == 0 {
        return vec![Line::default()];
    }

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;

    for span in &line.spans {
        let style = line.style.patch(span.style);
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used > 0 && used + w > width {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
            }
            current.push(ch);
            used += w;
        }
        if !current.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut current), style));
        }
    }

    if !spans.is_empty() || lines.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Wrap every line of `text` to `width`.
pub fn wrap_text(text: &Text<'_>, width: u16) -> Vec<Line<'static>> {
    if text.lines.is_empty() {
        return Vec::new();
    }
    text.lines
        .iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Cut a line to `width`, ending in `…` when something was dropped.
pub fn truncate_line(line: &Line<'_>, width: u16) -> Line<'static> {
    let width = usize::from(width);
    if line.width() <= width {
        return Line::from(
            line.spans
                .iter()
                .map(|s| Span::styled(s.content.to_string(), line.style.patch(s.style)))
                .collect::<Vec<_>>(),
        );
    }
    if width == 0 {
        return Line::default();
    }

    let budget = width - 1;
    let mut used = 0usize;
    let mut spans = Vec::new();
    let mut last_style = line.style;
    'outer: for span in &line.spans {
        let style = line.style.patch(span.style);
        last_style = style;
        let mut content = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                if !content.is_empty() {
                    spans.push(Span::styled(content, style));
                }
                break 'outer;
            }
            content.push(ch);
            used += w;
        }
        if !content.is_empty() {
            spans.push(Span::styled(content, style));
        }
    }
    spans.push(Span::styled("…", last_style));
    Line::from(spans)
}
