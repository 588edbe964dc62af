//! HeightIndex - row offsets as prefix sums over a Fenwick tree.
//!
//! Maps between row indices and vertical offsets in the list body. A single
//! row's height change moves every row below it, so offsets are never stored
//! directly; they are prefix sums answered in O(log n).
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `prefix_sum` / `start_of`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `reset`: O(n log n)

/// Prefix-sum index over row heights.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree backing storage, exactly `len` slots.
    tree: Vec<isize>,
    /// Plain copy of each row's height, for delta computation.
    heights: Vec<u16>,
}

impl HeightIndex {
    /// Create an index of `len` rows, all `height` tall.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crumbtrail::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::uniform(4, 3);
    /// assert_eq!(index.total(), 12);
    /// assert_eq!(index.start_of(2), 6);
    /// ```
    pub fn uniform(len: usize, height: u16) -> Self {
        let mut index = Self::default();
        index.reset(len, height);
        index
    }

    /// Rebuild for `len` rows of `height` each, discarding previous heights.
    pub fn reset(&mut self, len: usize, height: u16) {
        self.tree.clear();
        self.tree.resize(len, 0);
        self.heights.clear();
        self.heights.resize(len, height);
        if height == 0 {
            return;
        }
        for i in 0..len {
            fenwick::array::update(&mut self.tree, i, height as isize);
        }
    }

    /// Set the height of row `index`. Returns `true` if it changed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, height: u16) -> bool {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        let delta = height as isize - self.heights[index] as isize;
        if delta == 0 {
            return false;
        }
        self.heights[index] = height;
        fenwick::array::update(&mut self.tree, index, delta);
        true
    }

    /// Height of row `index`.
    pub fn height(&self, index: usize) -> Option<u16> {
        self.heights.get(index).copied()
    }

    /// Cumulative height of rows `0..=index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn prefix_sum(&self, index: usize) -> usize {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// Offset of the top edge of row `index`. `start_of(len())` is the total.
    pub fn start_of(&self, index: usize) -> usize {
        if index == 0 || self.is_empty() {
            0
        } else {
            self.prefix_sum(index.min(self.len()) - 1)
        }
    }

    /// Row containing vertical offset `value`: the first index whose
    /// `prefix_sum` exceeds it.
    ///
    /// Returns `None` when `value >= total()` or the index is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crumbtrail::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::uniform(3, 1);
    /// index.set(0, 10); // [0..10)
    /// index.set(1, 20); // [10..30)
    /// index.set(2, 15); // [30..45)
    ///
    /// assert_eq!(index.lower_bound(0), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(44), Some(2));
    /// assert_eq!(index.lower_bound(45), None);
    /// ```
    pub fn lower_bound(&self, value: usize) -> Option<usize> {
        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len()).then_some(left)
    }

    /// Total height of all rows.
    pub fn total(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True if the index holds no rows.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn from_heights(heights: &[u16]) -> HeightIndex {
        let mut index = HeightIndex::uniform(heights.len(), 0);
        for (i, h) in heights.iter().enumerate() {
            index.set(i, *h);
        }
        index
    }

    #[test]
    fn empty_index() {
        let index = HeightIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.total(), 0);
        assert_eq!(index.start_of(0), 0);
        assert_eq!(index.lower_bound(0), None);
    }

    #[test]
    fn uniform_rows_have_linear_offsets() {
        let index = HeightIndex::uniform(200, 1);
        assert_eq!(index.total(), 200);
        assert_eq!(index.start_of(50), 50);
        assert_eq!(index.lower_bound(50), Some(50));
    }

    #[test]
    fn set_shifts_every_row_below() {
        let mut index = from_heights(&[3, 4, 5]);
        assert!(index.set(1, 10));
        assert_eq!(index.start_of(1), 3);
        assert_eq!(index.start_of(2), 13);
        assert_eq!(index.total(), 18);
    }

    #[test]
    fn set_same_height_reports_no_change() {
        let mut index = from_heights(&[3, 4, 5]);
        assert!(!index.set(1, 4));
        assert_eq!(index.total(), 12);
    }

    #[test]
    fn lower_bound_on_boundaries() {
        let index = from_heights(&[5, 5, 5]);
        assert_eq!(index.lower_bound(4), Some(0));
        assert_eq!(index.lower_bound(5), Some(1));
        assert_eq!(index.lower_bound(10), Some(2));
        assert_eq!(index.lower_bound(15), None);
    }

    #[test]
    fn reset_discards_previous_heights() {
        let mut index = from_heights(&[7, 9, 11, 13]);
        index.reset(6, 2);
        assert_eq!(index.len(), 6);
        assert_eq!(index.total(), 12);
        for i in 0..6 {
            assert_eq!(index.height(i), Some(2));
            assert_eq!(index.start_of(i), i * 2);
        }
    }

    proptest! {
        #[test]
        fn prop_start_of_is_sum_of_preceding(heights in prop::collection::vec(0u16..=50, 1..60)) {
            let index = from_heights(&heights);
            let mut expected = 0usize;
            for (i, h) in heights.iter().enumerate() {
                prop_assert_eq!(index.start_of(i), expected);
                expected += *h as usize;
            }
            prop_assert_eq!(index.total(), expected);
        }

        #[test]
        fn prop_lower_bound_row_contains_offset(
            heights in prop::collection::vec(1u16..=20, 1..60),
            probe in 0usize..2000,
        ) {
            let index = from_heights(&heights);
            match index.lower_bound(probe) {
                Some(row) => {
                    prop_assert!(index.start_of(row) <= probe);
                    prop_assert!(probe < index.start_of(row) + heights[row] as usize);
                }
                None => prop_assert!(probe >= index.total()),
            }
        }
    }
}
