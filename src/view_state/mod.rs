//! View-state layer - virtualization and dynamic layout of the breadcrumb list
//!
//! Nothing in here draws. The view asks the [`controller::ListController`]
//! what to paint, paints it, and reports back what it laid out.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (Column, RowIndex, RowId, BreadcrumbRow, ContainerSize, ViewportState)
//! - `columns`: Fixed column table and grid track sizing
//! - `height_cache`: HeightCache - measured cell heights with bulk invalidation
//! - `height_index`: HeightIndex - O(log n) row offsets via Fenwick tree
//! - `mounted`: MountedBody - read-back of what the view laid out
//! - `column_probe`: ColumnWidthProbe - first-paint column width discovery
//! - `virtualization`: VirtualizationEngine - render window with overscan
//! - `time_mode`: DisplayTimeMode and its toggle
//! - `controller`: ListController - the Unmeasured/Measuring/Virtualized state machine

pub mod column_probe;
pub mod columns;
pub mod controller;
pub mod height_cache;
pub mod height_index;
pub mod mounted;
pub mod time_mode;
pub mod types;
pub mod virtualization;

pub use controller::{CommitOutcome, FrameBody, ListController, ListFrame, ListMode, ListOptions};
pub use time_mode::DisplayTimeMode;
pub use types::{BreadcrumbRow, Column, ContainerSize, RowId, RowIndex, ViewportState};
