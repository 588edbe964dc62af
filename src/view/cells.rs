//! Cell renderers: what each column shows for a breadcrumb.
//!
//! The list widget only knows the [`CellProvider`] trait. [`BreadcrumbCells`]
//! is the provider for [`Breadcrumb`] rows and dispatches per column through a
//! fixed table indexed by [`Column::index`].

use super::highlight::highlight;
use super::styles::ListStyles;
use super::time_format::format_time;
use crate::model::{Breadcrumb, BreadcrumbType};
use crate::view_state::time_mode::DisplayTimeMode;
use crate::view_state::types::{BreadcrumbRow, Column, COLUMN_COUNT};
use chrono::{DateTime, Utc};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use serde_json::{Map, Value};

/// Shown in the Category column when a breadcrumb has none.
pub const GENERIC_CATEGORY: &str = "generic";

/// Data keys folded into the HTTP summary line.
const HTTP_SUMMARY_KEYS: [&str; 3] = ["method", "url", "status_code"];

/// Everything a cell renderer may depend on besides the row itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContext<'a> {
    /// Term to highlight, if searching.
    pub search_term: Option<&'a str>,
    /// How the Time column is displayed.
    pub time_mode: DisplayTimeMode,
    /// Origin of relative times.
    pub reference_time: Option<DateTime<Utc>>,
    /// Organization the trail belongs to.
    pub org_id: Option<&'a str>,
    /// True for the final row of the trail.
    pub is_last: bool,
}

/// How a column handles content wider than its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOverflow {
    /// Wrap onto more lines; the row grows.
    Wrap,
    /// Stay on one line and end in an ellipsis.
    Truncate,
}

/// Renders the content of list cells.
///
/// Implementations must be pure: the same row, column and context give the
/// same text, or measured heights stop matching what is drawn.
pub trait CellProvider<T> {
    /// Content of one cell.
    fn render_cell(&self, row: &BreadcrumbRow<T>, column: Column, ctx: &CellContext<'_>) -> Text<'static>;

    /// Overflow rule of a column.
    fn overflow(&self, _column: Column) -> CellOverflow {
        CellOverflow::Wrap
    }

    /// Style applied under every cell of a row.
    fn row_style(&self, _row: &BreadcrumbRow<T>, _ctx: &CellContext<'_>) -> Style {
        Style::default()
    }
}

type CellRenderer = fn(&BreadcrumbCells, &Breadcrumb, &CellContext<'_>) -> Text<'static>;

/// Cell renderers for [`Breadcrumb`] rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreadcrumbCells {
    styles: ListStyles,
}

impl BreadcrumbCells {
    const RENDERERS: [CellRenderer; COLUMN_COUNT] = [
        BreadcrumbCells::type_cell,
        BreadcrumbCells::category_cell,
        BreadcrumbCells::description_cell,
        BreadcrumbCells::level_cell,
        BreadcrumbCells::time_cell,
    ];

    const OVERFLOW: [CellOverflow; COLUMN_COUNT] = [
        CellOverflow::Wrap,
        CellOverflow::Truncate,
        CellOverflow::Wrap,
        CellOverflow::Wrap,
        CellOverflow::Wrap,
    ];

    /// Provider drawing with `styles`.
    pub fn new(styles: ListStyles) -> Self {
        Self { styles }
    }

    fn type_cell(&self, crumb: &Breadcrumb, _ctx: &CellContext<'_>) -> Text<'static> {
        Text::from(Span::styled(icon(crumb.kind), self.styles.type_style(crumb.kind)))
    }

    fn category_cell(&self, crumb: &Breadcrumb, ctx: &CellContext<'_>) -> Text<'static> {
        let title = crumb.category.as_deref().unwrap_or(GENERIC_CATEGORY);
        Text::from(Line::from(highlight(
            title,
            ctx.search_term,
            self.styles.category,
            self.styles.search_match,
        )))
    }

    fn description_cell(&self, crumb: &Breadcrumb, ctx: &CellContext<'_>) -> Text<'static> {
        let styles = &self.styles;
        let mut lines = Vec::new();
        let is_http = crumb.kind == BreadcrumbType::Http;

        if is_http {
            if let Some(summary) = crumb.data.as_ref().and_then(http_summary) {
                lines.push(Line::from(highlight(
                    &summary,
                    ctx.search_term,
                    styles.description,
                    styles.search_match,
                )));
            }
        }

        if let Some(message) = &crumb.message {
            lines.extend(message.lines().map(|l| {
                Line::from(highlight(l, ctx.search_term, styles.description, styles.search_match))
            }));
        }

        for (key, value) in crumb.data.iter().flatten() {
            if is_http && HTTP_SUMMARY_KEYS.contains(&key.as_str()) {
                continue;
            }
            let mut spans = vec![Span::styled(format!("{key}: "), styles.data_key)];
            spans.extend(highlight(
                &display_value(value),
                ctx.search_term,
                styles.description,
                styles.search_match,
            ));
            lines.push(Line::from(spans));
        }

        if let (Some(org), Some(event_id)) = (ctx.org_id, crumb.event_id.as_deref()) {
            lines.push(Line::from(Span::styled(
                format!("event {org}/{event_id}"),
                styles.data_key,
            )));
        }

        Text::from(lines)
    }

    fn level_cell(&self, crumb: &Breadcrumb, ctx: &CellContext<'_>) -> Text<'static> {
        Text::from(Line::from(highlight(
            crumb.level.as_str(),
            ctx.search_term,
            self.styles.level_style(crumb.level),
            self.styles.search_match,
        )))
    }

    fn time_cell(&self, crumb: &Breadcrumb, ctx: &CellContext<'_>) -> Text<'static> {
        let text = format_time(crumb.timestamp, ctx.time_mode, ctx.reference_time);
        Text::from(Line::from(highlight(
            &text,
            ctx.search_term,
            self.styles.time,
            self.styles.search_match,
        )))
    }
}

impl CellProvider<Breadcrumb> for BreadcrumbCells {
    fn render_cell(
        &self,
        row: &BreadcrumbRow<Breadcrumb>,
        column: Column,
        ctx: &CellContext<'_>,
    ) -> Text<'static> {
        Self::RENDERERS[column.index()](self, row.data(), ctx)
    }

    fn overflow(&self, column: Column) -> CellOverflow {
        Self::OVERFLOW[column.index()]
    }

    fn row_style(&self, row: &BreadcrumbRow<Breadcrumb>, ctx: &CellContext<'_>) -> Style {
        let mut style = Style::default();
        if row.data().kind.is_error() {
            style = style.patch(self.styles.error_row());
        }
        if ctx.is_last {
            style = style.patch(self.styles.last_row);
        }
        style
    }
}

/// Glyph shown in the Type column.
pub fn icon(kind: BreadcrumbType) -> &'static str {
    match kind {
        BreadcrumbType::Default => "•",
        BreadcrumbType::Http => "⇄",
        BreadcrumbType::Navigation => "→",
        BreadcrumbType::Error | BreadcrumbType::Exception => "✗",
        BreadcrumbType::Warning => "!",
        BreadcrumbType::Debug => "⚙",
        BreadcrumbType::Info => "i",
        BreadcrumbType::User => "☺",
        BreadcrumbType::Ui => "▣",
        BreadcrumbType::Query => "≡",
        BreadcrumbType::System => "◆",
        BreadcrumbType::Session => "◷",
        BreadcrumbType::Transaction => "⟳",
        BreadcrumbType::Unknown => "?",
    }
}

/// `METHOD url [status]` for HTTP breadcrumbs, from whichever parts exist.
fn http_summary(data: &Map<String, Value>) -> Option<String> {
    let method = data.get("method").and_then(Value::as_str);
    let url = data.get("url").and_then(Value::as_str);
    if method.is_none() && url.is_none() {
        return None;
    }
    let mut parts: Vec<String> = [method, url].into_iter().flatten().map(str::to_string).collect();
    if let Some(status) = data.get("status_code").filter(|v| !v.is_null()) {
        parts.push(format!("[{}]", display_value(status)));
    }
    Some(parts.join(" "))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
