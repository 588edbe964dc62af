//! What the list view actually laid out during the last paint.
//!
//! A cell's real width and height are only known after it has been rendered,
//! so the view reports them back in a [`MountedBody`] and the controller reads
//! it during `commit`. This is the only channel from rendering back into the
//! layout state.

use super::types::{Column, RowIndex, COLUMN_COUNT};
use ratatui::layout::Rect;

/// Whether the mounted body came from the full pass or the windowed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKind {
    /// Every row laid out on a shared grid.
    Unwindowed,
    /// Only the rows of the render window, at frozen column widths.
    Windowed,
}

/// Geometry of one rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MountedCell {
    /// Offset of the cell from the left edge of the list.
    pub x: u16,
    /// Rendered width.
    pub width: u16,
    /// Lines the content occupies at this width.
    pub content_height: u16,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedRow {
    /// Row position in the data set.
    pub index: RowIndex,
    /// Offset of the row's top edge from the start of the body.
    pub top: usize,
    /// Cells in column order.
    pub cells: [MountedCell; COLUMN_COUNT],
}

impl MountedRow {
    /// Tallest cell content of the row.
    pub fn content_height(&self) -> u16 {
        self.cells.iter().map(|c| c.content_height).max().unwrap_or(0)
    }

    /// Cell for a column.
    pub fn cell(&self, column: Column) -> &MountedCell {
        &self.cells[column.index()]
    }
}

/// Everything one paint of the list produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedBody {
    /// Render generation the paint was made for.
    pub generation: u64,
    /// Full or windowed pass.
    pub kind: MountKind,
    /// Screen area the list was painted into.
    pub area: Rect,
    /// Header cells in column order.
    pub header: [MountedCell; COLUMN_COUNT],
    /// Rendered rows in index order.
    pub rows: Vec<MountedRow>,
}

impl MountedBody {
    /// Total height of the mounted rows.
    pub fn body_height(&self) -> usize {
        self.rows
            .iter()
            .map(|r| usize::from(r.content_height().max(1)))
            .sum()
    }

    /// Indices of the mounted rows.
    pub fn row_indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.index.get()).collect()
    }

    /// Header column under a screen position, if the position is on the header line.
    pub fn header_hit(&self, x: u16, y: u16) -> Option<Column> {
        if y != self.area.y || x < self.area.x || x >= self.area.right() {
            return None;
        }
        let rel = x - self.area.x;
        Column::ALL.into_iter().find(|c| {
            let cell = &self.header[c.index()];
            rel >= cell.x && rel < cell.x.saturating_add(cell.width)
        })
    }
}
