//! Core view-state newtypes and the row wrapper.

/// Number of logical columns in a breadcrumb list.
pub const COLUMN_COUNT: usize = 5;

/// Logical column of the breadcrumb list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// Type icon.
    Type = 0,
    /// Category label.
    Category = 1,
    /// Description / data payload.
    Description = 2,
    /// Severity level.
    Level = 3,
    /// Timestamp (absolute or relative).
    Time = 4,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Type,
        Column::Category,
        Column::Description,
        Column::Level,
        Column::Time,
    ];

    /// Position of this column in per-column tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Row position within the list. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RowIndex(usize);

impl RowIndex {
    /// Create a new RowIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }
}

/// Stable identifier of a breadcrumb row, used for keying and change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(u64);

impl RowId {
    /// Create a new RowId.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// One entry of the list: identity, position and opaque payload.
///
/// The core never looks inside `data`; it only compares rows for equality
/// to detect a changed data set.
#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbRow<T> {
    id: RowId,
    position: usize,
    data: T,
}

impl<T> BreadcrumbRow<T> {
    /// Create a row.
    pub fn new(id: RowId, position: usize, data: T) -> Self {
        Self { id, position, data }
    }

    /// Wrap payloads in insertion order, using the position as id.
    pub fn sequence(items: impl IntoIterator<Item = T>) -> Vec<Self> {
        items
            .into_iter()
            .enumerate()
            .map(|(position, data)| Self::new(RowId::new(position as u64), position, data))
            .collect()
    }

    /// Row identifier.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Ordinal position in the trail.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Opaque payload.
    pub fn data(&self) -> &T {
        &self.data
    }
}

/// Size of the area the list may occupy, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerSize {
    /// Width in columns.
    pub width: u16,
    /// Height in lines (header included).
    pub height: u16,
}

impl ContainerSize {
    /// Create a container size.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Scroll offset and visible height of the list body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportState {
    /// Offset of the top visible line from the start of the body.
    pub scroll_offset: usize,
    /// Number of body lines visible at once.
    pub height: usize,
}

impl ViewportState {
    /// Create a viewport state.
    pub fn new(scroll_offset: usize, height: usize) -> Self {
        Self {
            scroll_offset,
            height,
        }
    }

    /// One past the last visible line.
    pub fn bottom(&self) -> usize {
        self.scroll_offset.saturating_add(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_indices_follow_display_order() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
        }
        assert_eq!(Column::ALL.len(), COLUMN_COUNT);
    }

    #[test]
    fn sequence_assigns_positions_and_ids() {
        let rows = BreadcrumbRow::sequence(["a", "b", "c"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].position(), 2);
        assert_eq!(rows[2].id(), RowId::new(2));
        assert_eq!(*rows[1].data(), "b");
    }

    #[test]
    fn rows_compare_deeply() {
        let a = BreadcrumbRow::new(RowId::new(1), 0, "x".to_string());
        let b = BreadcrumbRow::new(RowId::new(1), 0, "x".to_string());
        let c = BreadcrumbRow::new(RowId::new(1), 0, "y".to_string());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn viewport_bottom_is_exclusive() {
        let viewport = ViewportState::new(10, 5);
        assert_eq!(viewport.bottom(), 15);
    }
}
