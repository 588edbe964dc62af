//! First-paint column width discovery.
//!
//! Rows are rendered independently once the list is windowed, so columns only
//! line up if every row uses the same widths. The probe reads those widths
//! back from a full, unwindowed paint and they stay frozen until the next
//! invalidation.

use super::mounted::{MountKind, MountedBody};
use super::types::COLUMN_COUNT;
use tracing::debug;

/// Rows sampled by default.
pub const PROBE_SAMPLE_ROWS: usize = 5;

/// Added to each sampled width. The last two columns get +1 and +2 to absorb
/// border and rounding loss at the right edge of the viewport.
pub const EDGE_CORRECTIONS: [u16; COLUMN_COUNT] = [0, 0, 0, 1, 2];

/// Widths and body height learned from an unwindowed paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// Frozen width per column.
    pub widths: [u16; COLUMN_COUNT],
    /// Height of the whole unwindowed body.
    pub body_height: usize,
}

/// Reads column widths from the first rows of a mounted body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidthProbe {
    sample_rows: usize,
}

impl Default for ColumnWidthProbe {
    fn default() -> Self {
        Self::new(PROBE_SAMPLE_ROWS)
    }
}

impl ColumnWidthProbe {
    /// Probe sampling at most `sample_rows` rows (at least one).
    pub fn new(sample_rows: usize) -> Self {
        Self {
            sample_rows: sample_rows.max(1),
        }
    }

    /// Measure column widths.
    ///
    /// Returns `None`, without side effects, when nothing is mounted, when
    /// the mounted body is windowed, or when it has no rows. The caller keeps
    /// rendering unwindowed and tries again after the next paint.
    pub fn probe(&self, mounted: Option<&MountedBody>) -> Option<ProbeResult> {
        let Some(body) = mounted else {
            debug!("column probe skipped: nothing mounted");
            return None;
        };
        if body.kind != MountKind::Unwindowed || body.rows.is_empty() {
            return None;
        }

        let mut widths = [0u16; COLUMN_COUNT];
        for row in body.rows.iter().take(self.sample_rows) {
            for (width, cell) in widths.iter_mut().zip(row.cells.iter()) {
                *width = (*width).max(cell.width);
            }
        }
        for (width, correction) in widths.iter_mut().zip(EDGE_CORRECTIONS) {
            *width = width.saturating_add(correction);
        }

        let result = ProbeResult {
            widths,
            body_height: body.body_height(),
        };
        debug!(
            widths = ?result.widths,
            body_height = result.body_height,
            sampled = body.rows.len().min(self.sample_rows),
            "column widths probed"
        );
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::mounted::{MountedCell, MountedRow};
    use crate::view_state::types::RowIndex;
    use ratatui::layout::Rect;

    fn row(index: usize, widths: [u16; COLUMN_COUNT]) -> MountedRow {
        let mut cells = [MountedCell::default(); COLUMN_COUNT];
        let mut x = 0;
        for (i, w) in widths.iter().enumerate() {
            cells[i] = MountedCell {
                x,
                width: *w,
                content_height: 1,
            };
            x += w;
        }
        MountedRow {
            index: RowIndex::new(index),
            top: index,
            cells,
        }
    }

    fn body(kind: MountKind, rows: Vec<MountedRow>) -> MountedBody {
        MountedBody {
            generation: 0,
            kind,
            area: Rect::new(0, 0, 80, 20),
            header: [MountedCell::default(); COLUMN_COUNT],
            rows,
        }
    }

    #[test]
    fn not_mounted_is_a_no_op() {
        assert_eq!(ColumnWidthProbe::default().probe(None), None);
    }

    #[test]
    fn windowed_body_is_not_probed() {
        let mounted = body(MountKind::Windowed, vec![row(0, [4, 10, 40, 6, 10])]);
        assert_eq!(ColumnWidthProbe::default().probe(Some(&mounted)), None);
    }

    #[test]
    fn empty_body_is_not_probed() {
        let mounted = body(MountKind::Unwindowed, Vec::new());
        assert_eq!(ColumnWidthProbe::default().probe(Some(&mounted)), None);
    }

    #[test]
    fn last_two_columns_get_edge_corrections() {
        let mounted = body(MountKind::Unwindowed, vec![row(0, [4, 10, 40, 6, 10])]);
        let result = ColumnWidthProbe::default().probe(Some(&mounted)).unwrap();
        assert_eq!(result.widths, [4, 10, 40, 7, 12]);
        assert_eq!(result.body_height, 1);
    }

    #[test]
    fn only_the_first_sample_rows_are_read() {
        let mut rows: Vec<_> = (0..5).map(|i| row(i, [4, 10, 40, 6, 10])).collect();
        rows.push(row(5, [9, 99, 99, 99, 99]));
        let mounted = body(MountKind::Unwindowed, rows);
        let result = ColumnWidthProbe::default().probe(Some(&mounted)).unwrap();
        assert_eq!(result.widths, [4, 10, 40, 7, 12]);
        assert_eq!(result.body_height, 6);
    }

    #[test]
    fn fewer_rows_than_sample_still_freeze_widths() {
        let mounted = body(
            MountKind::Unwindowed,
            vec![row(0, [4, 10, 40, 6, 10]), row(1, [5, 10, 40, 6, 10])],
        );
        let result = ColumnWidthProbe::default().probe(Some(&mounted)).unwrap();
        assert_eq!(result.widths[0], 5);
    }
}
