//! Fixed column table: titles, minimum widths and grid track sizing.
//!
//! Per-column behavior is looked up by `Column::index()` instead of being
//! matched on at every call site.

use super::types::{Column, COLUMN_COUNT};

/// Lines taken by the column header above the body.
pub const HEADER_HEIGHT: u16 = 1;

/// How a column track is sized during the unwindowed (measuring) layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSizing {
    /// As wide as the widest cell in the column.
    MaxContent,
    /// Share of the space left over by the `MaxContent` tracks.
    Flex {
        /// Relative weight among flexible tracks.
        fr: u16,
    },
}

/// Static description of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Which column this describes.
    pub column: Column,
    /// Header title.
    pub title: &'static str,
    /// Minimum track width in cells.
    pub min_width: u16,
    /// Track sizing rule.
    pub track: TrackSizing,
}

/// Column table in display order.
pub const COLUMN_SPECS: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec {
        column: Column::Type,
        title: "Type",
        min_width: 4,
        track: TrackSizing::MaxContent,
    },
    ColumnSpec {
        column: Column::Category,
        title: "Category",
        min_width: 10,
        track: TrackSizing::Flex { fr: 1 },
    },
    ColumnSpec {
        column: Column::Description,
        title: "Description",
        min_width: 12,
        track: TrackSizing::Flex { fr: 6 },
    },
    ColumnSpec {
        column: Column::Level,
        title: "Level",
        min_width: 5,
        track: TrackSizing::MaxContent,
    },
    ColumnSpec {
        column: Column::Time,
        title: "Time",
        min_width: 8,
        track: TrackSizing::MaxContent,
    },
];

/// Spec for a column.
pub fn spec(column: Column) -> &'static ColumnSpec {
    &COLUMN_SPECS[column.index()]
}

/// Resolve track widths the way a grid layout would.
///
/// `natural` holds the widest content of each column (header included).
/// Content tracks take `max(natural, min)`; flexible tracks split what is
/// left of `container_width` by weight and never drop below their minimum.
/// When the content does not fit, tracks keep their minimums and the row
/// overflows the container.
pub fn resolve_tracks(natural: [u16; COLUMN_COUNT], container_width: u16) -> [u16; COLUMN_COUNT] {
    let mut widths = [0u16; COLUMN_COUNT];
    let mut fixed: u32 = 0;
    let mut total_fr: u32 = 0;

    for spec in &COLUMN_SPECS {
        let i = spec.column.index();
        match spec.track {
            TrackSizing::MaxContent => {
                widths[i] = natural[i].max(spec.min_width);
                fixed += u32::from(widths[i]);
            }
            TrackSizing::Flex { fr } => total_fr += u32::from(fr),
        }
    }

    let free = u32::from(container_width).saturating_sub(fixed);
    let mut remaining = free;
    let flex_specs: Vec<&ColumnSpec> = COLUMN_SPECS
        .iter()
        .filter(|s| matches!(s.track, TrackSizing::Flex { .. }))
        .collect();

    for (n, spec) in flex_specs.iter().enumerate() {
        let TrackSizing::Flex { fr } = spec.track else {
            continue;
        };
        // Last flexible track absorbs the rounding remainder.
        let share = if n + 1 == flex_specs.len() {
            remaining
        } else if total_fr == 0 {
            0
        } else {
            free * u32::from(fr) / total_fr
        };
        remaining = remaining.saturating_sub(share);
        let share = u16::try_from(share).unwrap_or(u16::MAX);
        widths[spec.column.index()] = share.max(spec.min_width);
    }

    widths
}

/// Shrink frozen widths so the row fits `container_width`.
///
/// Overflow is taken from the flexible tracks, last one first, down to their
/// minimums. Content tracks keep their width. The result depends only on the
/// inputs, so every row fitted with the same arguments stays aligned.
pub fn fit_to_width(widths: [u16; COLUMN_COUNT], container_width: u16) -> [u16; COLUMN_COUNT] {
    let mut fitted = widths;
    let total: u32 = fitted.iter().map(|w| u32::from(*w)).sum();
    let mut excess = total.saturating_sub(u32::from(container_width));

    for spec in COLUMN_SPECS.iter().rev() {
        if excess == 0 {
            break;
        }
        if !matches!(spec.track, TrackSizing::Flex { .. }) {
            continue;
        }
        let width = &mut fitted[spec.column.index()];
        let spare = u32::from(width.saturating_sub(spec.min_width));
        let take = spare.min(excess);
        // take <= spare <= u16::MAX
        *width -= take as u16;
        excess -= take;
    }
    fitted
}

/// X offsets of each column given resolved widths.
pub fn column_offsets(widths: &[u16; COLUMN_COUNT]) -> [u16; COLUMN_COUNT] {
    let mut offsets = [0u16; COLUMN_COUNT];
    let mut x = 0u16;
    for (i, width) in widths.iter().enumerate() {
        offsets[i] = x;
        x = x.saturating_add(*width);
    }
    offsets
}
