//! Measured cell heights, keyed by (row index, column).
//!
//! Storage is an arena of fixed-width slots indexed by row position; rows never
//! hold references into the cache. Entries appear lazily the first time a cell
//! is measured and are only ever dropped all at once by [`HeightCache::clear_all`].

use super::types::{Column, RowIndex, COLUMN_COUNT};

/// Cache lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightEntry {
    /// Height read back from a rendered cell.
    Measured(u16),
    /// Nothing measured yet; carries the default height.
    Unmeasured(u16),
}

impl HeightEntry {
    /// Height regardless of provenance.
    pub fn height(self) -> u16 {
        match self {
            HeightEntry::Measured(h) | HeightEntry::Unmeasured(h) => h,
        }
    }

    /// True if the height came from a measurement.
    pub fn is_measured(self) -> bool {
        matches!(self, HeightEntry::Measured(_))
    }
}

/// Per-list cell height cache.
#[derive(Debug, Clone)]
pub struct HeightCache {
    default_height: u16,
    slots: Vec<[Option<u16>; COLUMN_COUNT]>,
}

impl HeightCache {
    /// Create an empty cache.
    ///
    /// `default_height` is returned for unmeasured cells and is also the
    /// minimum height reported for a row.
    pub fn new(default_height: u16) -> Self {
        Self {
            default_height,
            slots: Vec::new(),
        }
    }

    /// Height returned for unmeasured cells.
    pub fn default_height(&self) -> u16 {
        self.default_height
    }

    /// Cached height of a cell, or the default.
    pub fn get(&self, row: RowIndex, column: Column) -> u16 {
        self.entry(row, column).height()
    }

    /// Cached height of a cell with its provenance.
    pub fn entry(&self, row: RowIndex, column: Column) -> HeightEntry {
        match self
            .slots
            .get(row.get())
            .and_then(|slot| slot[column.index()])
        {
            Some(h) => HeightEntry::Measured(h),
            None => HeightEntry::Unmeasured(self.default_height),
        }
    }

    /// Record a measured height. Returns `true` if the stored value changed.
    pub fn set(&mut self, row: RowIndex, column: Column, height: u16) -> bool {
        let r = row.get();
        if r >= self.slots.len() {
            self.slots.resize(r + 1, [None; COLUMN_COUNT]);
        }
        let slot = &mut self.slots[r][column.index()];
        if *slot == Some(height) {
            return false;
        }
        *slot = Some(height);
        true
    }

    /// True if every cell of the row has been measured.
    pub fn is_row_measured(&self, row: RowIndex) -> bool {
        self.slots
            .get(row.get())
            .is_some_and(|slot| slot.iter().all(Option::is_some))
    }

    /// Height of a whole row: its tallest cell, never below the default.
    /// A row with any unmeasured cell reports the default.
    pub fn row_height(&self, row: RowIndex) -> u16 {
        if !self.is_row_measured(row) {
            return self.default_height;
        }
        self.slots[row.get()]
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(self.default_height)
            .max(self.default_height)
    }

    /// Number of measured cells.
    pub fn measured_cells(&self) -> usize {
        self.slots
            .iter()
            .map(|slot| slot.iter().filter(|h| h.is_some()).count())
            .sum()
    }

    /// Forget every measurement.
    pub fn clear_all(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(i: usize) -> RowIndex {
        RowIndex::new(i)
    }

    #[test]
    fn unmeasured_cells_return_default() {
        let cache = HeightCache::new(2);
        assert_eq!(cache.get(row(0), Column::Type), 2);
        assert_eq!(cache.entry(row(99), Column::Time), HeightEntry::Unmeasured(2));
    }

    #[test]
    fn set_then_get_returns_measurement() {
        let mut cache = HeightCache::new(1);
        assert!(cache.set(row(3), Column::Description, 4));
        assert_eq!(cache.entry(row(3), Column::Description), HeightEntry::Measured(4));
        assert_eq!(cache.get(row(3), Column::Category), 1);
        assert!(!cache.entry(row(3), Column::Category).is_measured());
    }

    #[test]
    fn set_is_idempotent() {
        let mut cache = HeightCache::new(1);
        assert!(cache.set(row(0), Column::Level, 3));
        assert!(!cache.set(row(0), Column::Level, 3));
        assert_eq!(cache.measured_cells(), 1);
    }

    #[test]
    fn row_height_is_tallest_cell_once_complete() {
        let mut cache = HeightCache::new(1);
        for column in Column::ALL {
            cache.set(row(0), column, 1);
        }
        cache.set(row(0), Column::Description, 6);
        assert!(cache.is_row_measured(row(0)));
        assert_eq!(cache.row_height(row(0)), 6);
    }

    #[test]
    fn partial_row_reports_default() {
        let mut cache = HeightCache::new(1);
        cache.set(row(0), Column::Description, 6);
        assert!(!cache.is_row_measured(row(0)));
        assert_eq!(cache.row_height(row(0)), 1);
    }

    #[test]
    fn row_height_never_below_default() {
        let mut cache = HeightCache::new(3);
        for column in Column::ALL {
            cache.set(row(0), column, 1);
        }
        assert_eq!(cache.row_height(row(0)), 3);
    }

    #[test]
    fn clear_all_forgets_everything() {
        let mut cache = HeightCache::new(1);
        for i in 0..10 {
            for column in Column::ALL {
                cache.set(row(i), column, 5);
            }
        }
        cache.clear_all();
        assert_eq!(cache.measured_cells(), 0);
        for i in 0..10 {
            for column in Column::ALL {
                assert_eq!(cache.entry(row(i), column), HeightEntry::Unmeasured(1));
            }
        }
    }
}
