//! Windowing: which rows must be rendered for a given viewport.

use super::height_index::HeightIndex;
use super::types::{RowIndex, ViewportState};
use std::ops::Range;

/// Rows rendered on each side of the visible ones by default.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Visible rows plus the overscanned range actually rendered.
///
/// # Invariants
/// - `start <= first_visible <= last_visible < end <= row_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderWindow {
    /// First row with any line inside the viewport.
    pub first_visible: usize,
    /// Last row with any line inside the viewport (inclusive).
    pub last_visible: usize,
    /// First rendered row.
    pub start: usize,
    /// One past the last rendered row.
    pub end: usize,
}

impl RenderWindow {
    /// Rendered row indices.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of rendered rows.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether a row is rendered.
    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }
}

/// Where a rendered row sits in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPlacement {
    /// Row position.
    pub index: RowIndex,
    /// Offset of the row's top edge from the start of the body.
    pub top: usize,
    /// Height the row is laid out with (cached or default).
    pub height: u16,
}

/// Pure function of the height index and the latest viewport state, so
/// scroll events can be applied in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualizationEngine {
    overscan: usize,
}

impl Default for VirtualizationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_OVERSCAN)
    }
}

impl VirtualizationEngine {
    /// Engine rendering `overscan` extra rows beyond each viewport edge.
    pub fn new(overscan: usize) -> Self {
        Self { overscan }
    }

    /// Compute the render window. `None` when there are no rows.
    ///
    /// A scroll offset past the end resolves to the last row.
    pub fn window(&self, index: &HeightIndex, viewport: ViewportState) -> Option<RenderWindow> {
        let count = index.len();
        if count == 0 {
            return None;
        }
        let last = count - 1;

        let first_visible = index.lower_bound(viewport.scroll_offset).unwrap_or(last);
        let last_visible = if viewport.height == 0 {
            first_visible
        } else {
            index
                .lower_bound(viewport.bottom() - 1)
                .unwrap_or(last)
                .max(first_visible)
        };

        Some(RenderWindow {
            first_visible,
            last_visible,
            start: first_visible.saturating_sub(self.overscan),
            end: last_visible.saturating_add(self.overscan).min(last) + 1,
        })
    }

    /// Placement of every row in the window.
    pub fn placements(&self, index: &HeightIndex, window: &RenderWindow) -> Vec<RowPlacement> {
        window
            .indices()
            .map(|i| RowPlacement {
                index: RowIndex::new(i),
                top: index.start_of(i),
                height: index.height(i).unwrap_or(0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_list_has_no_window() {
        let engine = VirtualizationEngine::default();
        assert_eq!(engine.window(&HeightIndex::default(), ViewportState::new(0, 10)), None);
    }

    #[test]
    fn two_hundred_rows_overscan_three() {
        let engine = VirtualizationEngine::new(3);
        let index = HeightIndex::uniform(200, 1);
        let window = engine.window(&index, ViewportState::new(50, 11)).unwrap();
        assert_eq!(window.first_visible, 50);
        assert_eq!(window.last_visible, 60);
        assert_eq!(window.indices(), 47..64);
    }

    #[test]
    fn window_clamps_at_top() {
        let engine = VirtualizationEngine::new(3);
        let index = HeightIndex::uniform(20, 1);
        let window = engine.window(&index, ViewportState::new(0, 5)).unwrap();
        assert_eq!(window.indices(), 0..8);
    }

    #[test]
    fn window_clamps_at_bottom() {
        let engine = VirtualizationEngine::new(3);
        let index = HeightIndex::uniform(20, 1);
        let window = engine.window(&index, ViewportState::new(15, 5)).unwrap();
        assert_eq!(window.last_visible, 19);
        assert_eq!(window.indices(), 12..20);
    }

    #[test]
    fn tall_rows_shrink_the_window() {
        let engine = VirtualizationEngine::new(1);
        let mut index = HeightIndex::uniform(10, 1);
        index.set(2, 8);
        // rows: 0:[0,1) 1:[1,2) 2:[2,10) 3:[10,11)
        let window = engine.window(&index, ViewportState::new(3, 5)).unwrap();
        assert_eq!((window.first_visible, window.last_visible), (2, 2));
        assert_eq!(window.indices(), 1..4);
    }

    #[test]
    fn placements_follow_offsets() {
        let engine = VirtualizationEngine::new(0);
        let mut index = HeightIndex::uniform(5, 1);
        index.set(1, 3);
        let window = engine.window(&index, ViewportState::new(0, 5)).unwrap();
        let placements = engine.placements(&index, &window);
        let tops: Vec<_> = placements.iter().map(|p| p.top).collect();
        assert_eq!(tops, vec![0, 1, 4]);
        assert_eq!(placements[1].height, 3);
    }

    proptest! {
        #[test]
        fn prop_window_is_visible_range_plus_overscan(
            heights in prop::collection::vec(1u16..=6, 1..120),
            scroll in 0usize..400,
            viewport_height in 1usize..40,
            overscan in 0usize..6,
        ) {
            let mut index = HeightIndex::uniform(heights.len(), 1);
            for (i, h) in heights.iter().enumerate() {
                index.set(i, *h);
            }
            let engine = VirtualizationEngine::new(overscan);
            let viewport = ViewportState::new(scroll, viewport_height);
            let window = engine.window(&index, viewport).unwrap();

            // Brute force the rows intersecting the viewport.
            let visible: Vec<usize> = (0..heights.len())
                .filter(|&i| {
                    let top = index.start_of(i);
                    let bottom = top + heights[i] as usize;
                    top < viewport.bottom() && bottom > scroll
                })
                .collect();

            let (first, last) = match (visible.first(), visible.last()) {
                (Some(f), Some(l)) => (*f, *l),
                _ => (heights.len() - 1, heights.len() - 1),
            };
            prop_assert_eq!(window.first_visible, first);
            prop_assert_eq!(window.last_visible, last);
            prop_assert_eq!(window.start, first.saturating_sub(overscan));
            prop_assert_eq!(window.end, (last + overscan).min(heights.len() - 1) + 1);
            prop_assert!(window.len() <= (last - first + 1) + 2 * overscan);
        }
    }
}
