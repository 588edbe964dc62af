//! Breadcrumb list widget.
//!
//! Paints one [`ListFrame`] into a buffer and reports what it laid out as a
//! [`MountedBody`]. The unwindowed pass sizes columns like a grid over every
//! row; the windowed pass draws only the render window at frozen widths.

use super::cells::{CellContext, CellOverflow, CellProvider};
use super::constants::{CELL_GUTTER, TIME_HEADER_ICON};
use super::styles::ListStyles;
use super::text_layout::{natural_width, truncate_line, wrap_text};
use crate::view_state::columns::{column_offsets, resolve_tracks, spec, HEADER_HEIGHT};
use crate::view_state::controller::{FrameBody, ListFrame, WindowedBody};
use crate::view_state::mounted::{MountKind, MountedBody, MountedCell, MountedRow};
use crate::view_state::time_mode::DisplayTimeMode;
use crate::view_state::types::{BreadcrumbRow, Column, RowIndex, COLUMN_COUNT};
use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget};

/// Data passed through to every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListProps<'a> {
    /// Organization of the trail.
    pub org_id: Option<&'a str>,
    /// Term to highlight.
    pub search_term: Option<&'a str>,
    /// Origin of relative times.
    pub reference_time: Option<DateTime<Utc>>,
}

impl<'a> ListProps<'a> {
    /// Context for one row.
    pub fn cell_context(&self, time_mode: DisplayTimeMode, is_last: bool) -> CellContext<'a> {
        CellContext {
            search_term: self.search_term,
            time_mode,
            reference_time: self.reference_time,
            org_id: self.org_id,
            is_last,
        }
    }
}

/// Content of one row wrapped to its tracks.
struct LaidOutRow {
    lines: [Vec<Line<'static>>; COLUMN_COUNT],
    style: Style,
}

impl LaidOutRow {
    fn content_height(&self, column: Column) -> u16 {
        u16::try_from(self.lines[column.index()].len()).unwrap_or(u16::MAX)
    }

    fn height(&self) -> u16 {
        Column::ALL
            .into_iter()
            .map(|c| self.content_height(c))
            .max()
            .unwrap_or(0)
            .max(1)
    }

    fn mounted_cells(&self, offsets: &[u16; COLUMN_COUNT], widths: &[u16; COLUMN_COUNT]) -> [MountedCell; COLUMN_COUNT] {
        Column::ALL.map(|c| MountedCell {
            x: offsets[c.index()],
            width: widths[c.index()],
            content_height: self.content_height(c),
        })
    }
}

/// Paint a list frame into `area` and report what was laid out.
///
/// The list takes at most `frame.height` lines of `area`: one header line,
/// the rest body.
pub fn render_list<T, P>(
    frame: &ListFrame,
    rows: &[BreadcrumbRow<T>],
    props: &ListProps<'_>,
    provider: &P,
    styles: &ListStyles,
    area: Rect,
    buf: &mut Buffer,
) -> MountedBody
where
    P: CellProvider<T>,
{
    let area = Rect {
        height: area.height.min(frame.height),
        ..area
    };
    let cells_for = |index: usize, row: &BreadcrumbRow<T>| {
        let ctx = props.cell_context(frame.time_mode, index + 1 == rows.len());
        (Column::ALL.map(|c| provider.render_cell(row, c, &ctx)), provider.row_style(row, &ctx))
    };
    let headers = Column::ALL.map(|c| header_text(c, styles));
    let overflow = Column::ALL.map(|c| provider.overflow(c));

    let (kind, widths, mounted_rows) = match &frame.body {
        FrameBody::Unwindowed { row_count } => {
            let texts: Vec<_> = rows
                .iter()
                .take(*row_count)
                .enumerate()
                .map(|(i, row)| cells_for(i, row))
                .collect();

            let mut natural = headers.each_ref().map(natural_width);
            for (cells, _) in &texts {
                for (width, text) in natural.iter_mut().zip(cells.iter()) {
                    *width = (*width).max(natural_width(text));
                }
            }
            let widths = resolve_tracks(natural.map(|w| w.saturating_add(CELL_GUTTER)), area.width);
            let offsets = column_offsets(&widths);

            let mut top = 0usize;
            let mut mounted = Vec::with_capacity(texts.len());
            for (i, (cells, style)) in texts.iter().enumerate() {
                let laid_out = lay_out_row(cells, *style, &overflow, &widths);
                paint_row(buf, body_area(area), top as i64, laid_out.height(), &offsets, &widths, &laid_out);
                mounted.push(MountedRow {
                    index: RowIndex::new(i),
                    top,
                    cells: laid_out.mounted_cells(&offsets, &widths),
                });
                top += usize::from(laid_out.height());
            }
            (MountKind::Unwindowed, widths, mounted)
        }
        FrameBody::Windowed(body) => {
            let offsets = column_offsets(&body.widths);
            let mut mounted = Vec::with_capacity(body.placements.len());
            for placement in &body.placements {
                let i = placement.index.get();
                let Some(row) = rows.get(i) else {
                    continue;
                };
                let (cells, style) = cells_for(i, row);
                let laid_out = lay_out_row(&cells, style, &overflow, &body.widths);
                let top = placement.top as i64 - body.viewport.scroll_offset as i64;
                paint_row(buf, body_area(area), top, placement.height, &offsets, &body.widths, &laid_out);
                mounted.push(MountedRow {
                    index: placement.index,
                    top: placement.top,
                    cells: laid_out.mounted_cells(&offsets, &body.widths),
                });
            }
            render_scrollbar(body, styles, body_area(area), buf);
            (MountKind::Windowed, body.widths, mounted)
        }
    };

    let offsets = column_offsets(&widths);
    let header = paint_header(buf, area, &headers, &offsets, &widths);

    MountedBody {
        generation: frame.generation,
        kind,
        area,
        header,
        rows: mounted_rows,
    }
}

/// Uppercase header title; the Time header carries the switch icon.
pub fn header_title(column: Column) -> String {
    let title = spec(column).title.to_uppercase();
    if column == Column::Time {
        format!("{TIME_HEADER_ICON} {title}")
    } else {
        title
    }
}

fn header_text(column: Column, styles: &ListStyles) -> Text<'static> {
    Text::from(Span::styled(header_title(column), styles.header))
}

fn body_area(area: Rect) -> Rect {
    let header = HEADER_HEIGHT.min(area.height);
    Rect {
        y: area.y + header,
        height: area.height - header,
        ..area
    }
}

fn lay_out_row(
    cells: &[Text<'static>; COLUMN_COUNT],
    style: Style,
    overflow: &[CellOverflow; COLUMN_COUNT],
    widths: &[u16; COLUMN_COUNT],
) -> LaidOutRow {
    let lines = Column::ALL.map(|c| {
        let i = c.index();
        lay_out_cell(&cells[i], overflow[i], widths[i])
    });
    LaidOutRow { lines, style }
}

fn lay_out_cell(text: &Text<'_>, overflow: CellOverflow, track: u16) -> Vec<Line<'static>> {
    let width = track.saturating_sub(CELL_GUTTER);
    match overflow {
        CellOverflow::Wrap => wrap_text(text, width),
        CellOverflow::Truncate => text
            .lines
            .first()
            .map(|line| vec![truncate_line(line, width)])
            .unwrap_or_default(),
    }
}

/// Paint `height` lines of a row whose top edge is `top` lines below the top
/// of `body`. Lines outside `body` are clipped.
fn paint_row(
    buf: &mut Buffer,
    body: Rect,
    top: i64,
    height: u16,
    offsets: &[u16; COLUMN_COUNT],
    widths: &[u16; COLUMN_COUNT],
    row: &LaidOutRow,
) {
    let row_width: u16 = widths.iter().fold(0u16, |acc, w| acc.saturating_add(*w));
    for dy in 0..height {
        let y = top + i64::from(dy);
        if y < 0 || y >= i64::from(body.height) {
            continue;
        }
        // 0 <= y < body.height
        let y = body.y + y as u16;
        buf.set_style(Rect::new(body.x, y, row_width.min(body.width), 1), row.style);
        for column in Column::ALL {
            let i = column.index();
            let Some(line) = row.lines[i].get(usize::from(dy)) else {
                continue;
            };
            if offsets[i] >= body.width {
                continue;
            }
            let max_width = widths[i]
                .saturating_sub(CELL_GUTTER)
                .min(body.width - offsets[i]);
            buf.set_line(body.x + offsets[i], y, line, max_width);
        }
    }
}

fn paint_header(
    buf: &mut Buffer,
    area: Rect,
    headers: &[Text<'static>; COLUMN_COUNT],
    offsets: &[u16; COLUMN_COUNT],
    widths: &[u16; COLUMN_COUNT],
) -> [MountedCell; COLUMN_COUNT] {
    Column::ALL.map(|column| {
        let i = column.index();
        let lines = lay_out_cell(&headers[i], CellOverflow::Truncate, widths[i]);
        if area.height >= HEADER_HEIGHT && offsets[i] < area.width {
            if let Some(line) = lines.first() {
                let max_width = widths[i]
                    .saturating_sub(CELL_GUTTER)
                    .min(area.width - offsets[i]);
                buf.set_line(area.x + offsets[i], area.y, line, max_width);
            }
        }
        MountedCell {
            x: offsets[i],
            width: widths[i],
            content_height: HEADER_HEIGHT,
        }
    })
}

fn render_scrollbar(body: &WindowedBody, styles: &ListStyles, area: Rect, buf: &mut Buffer) {
    if body.total_height <= body.viewport.height || area.height == 0 {
        return;
    }
    let mut state = ScrollbarState::new(body.total_height.saturating_sub(body.viewport.height))
        .position(body.viewport.scroll_offset);
    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .style(styles.scrollbar)
        .render(area, buf, &mut state);
}
