//! ListController - owner of all layout state of one breadcrumb list.
//!
//! # Lifecycle
//!
//! ```text
//! Unmeasured --render--> Measuring --commit(unwindowed)--> Virtualized
//!                            ^                                  |
//!                            +---- rows / time mode / width ----+
//! ```
//!
//! A render produces a [`ListFrame`] describing what the view must paint. The
//! view paints it, reports what it laid out as a [`MountedBody`], and hands
//! that to [`ListController::commit`]. Measurements only ever flow back in
//! through `commit`.

use super::column_probe::{ColumnWidthProbe, PROBE_SAMPLE_ROWS};
use super::columns::{fit_to_width, HEADER_HEIGHT};
use super::height_cache::HeightCache;
use super::height_index::HeightIndex;
use super::mounted::{MountKind, MountedBody};
use super::time_mode::{DisplayTimeMode, TimeModeToggle};
use super::types::{BreadcrumbRow, Column, ContainerSize, RowIndex, ViewportState, COLUMN_COUNT};
use super::virtualization::{RenderWindow, RowPlacement, VirtualizationEngine, DEFAULT_OVERSCAN};
use tracing::debug;

/// Default height of a row that has not been measured yet.
pub const DEFAULT_ROW_HEIGHT: u16 = 1;

/// Tallest the list may grow before it scrolls internally.
pub const MAX_LIST_HEIGHT: u16 = 500;

/// Tunables of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Rows rendered beyond each viewport edge.
    pub overscan: usize,
    /// Height assumed for unmeasured rows; also the minimum row height.
    pub default_row_height: u16,
    /// Upper bound of the list height, header included.
    pub max_list_height: u16,
    /// Rows read by the column width probe.
    pub probe_sample_rows: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            overscan: DEFAULT_OVERSCAN,
            default_row_height: DEFAULT_ROW_HEIGHT,
            max_list_height: MAX_LIST_HEIGHT,
            probe_sample_rows: PROBE_SAMPLE_ROWS,
        }
    }
}

/// Layout phase of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Nothing rendered yet.
    #[default]
    Unmeasured,
    /// Rendering every row so column widths can be probed.
    Measuring,
    /// Rendering only the window, at frozen column widths.
    Virtualized,
}

/// Windowed layout of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowedBody {
    /// Column widths every rendered row must use.
    pub widths: [u16; COLUMN_COUNT],
    /// Scroll offset and visible height.
    pub viewport: ViewportState,
    /// Rows to render.
    pub window: RenderWindow,
    /// Offset and height of each row in `window`.
    pub placements: Vec<RowPlacement>,
    /// Total scrollable height of the body.
    pub total_height: usize,
}

/// What the body of a frame looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBody {
    /// Lay out every row on a shared grid.
    Unwindowed {
        /// Number of rows to lay out.
        row_count: usize,
    },
    /// Lay out the render window only.
    Windowed(WindowedBody),
}

/// Result of [`ListController::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFrame {
    /// Tag the view copies into its [`MountedBody`].
    pub generation: u64,
    /// Time mode every time cell must use.
    pub time_mode: DisplayTimeMode,
    /// Height of the list region, header included.
    pub height: u16,
    /// Body layout.
    pub body: FrameBody,
}

impl ListFrame {
    /// True for the windowed pass.
    pub fn is_windowed(&self) -> bool {
        matches!(self.body, FrameBody::Windowed(_))
    }
}

/// What [`ListController::commit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing was mounted.
    NotMounted,
    /// The mounted body belongs to an older generation or phase.
    Stale,
    /// Still measuring; probing needs a mounted row.
    Deferred,
    /// Column widths were frozen and the list switched to windowed mode.
    Probed,
    /// Heights were recorded; `changed_rows` rows changed height.
    Measured {
        /// Rows whose laid-out height moved.
        changed_rows: usize,
    },
}

impl CommitOutcome {
    /// Whether the view must render again to reflect the new layout.
    pub fn needs_redraw(self) -> bool {
        match self {
            CommitOutcome::Probed => true,
            CommitOutcome::Measured { changed_rows } => changed_rows > 0,
            _ => false,
        }
    }
}

/// Layout state machine of one list.
///
/// Rows are held as an owned snapshot so the next `render` can tell a new
/// data set from the same one by deep comparison.
#[derive(Debug, Clone)]
pub struct ListController<T> {
    options: ListOptions,
    mode: ListMode,
    rows: Vec<BreadcrumbRow<T>>,
    time_mode: TimeModeToggle,
    container_width: Option<u16>,
    heights: HeightCache,
    index: HeightIndex,
    widths: Option<[u16; COLUMN_COUNT]>,
    probed_body_height: Option<usize>,
    measured: bool,
    scroll_offset: usize,
    stick_to_bottom: bool,
    viewport_height: usize,
    list_height: u16,
    generation: u64,
    probe: ColumnWidthProbe,
    engine: VirtualizationEngine,
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self::new(ListOptions::default())
    }
}

impl<T> ListController<T> {
    /// Create a controller in the `Unmeasured` state.
    pub fn new(options: ListOptions) -> Self {
        let default_row_height = options.default_row_height.max(1);
        Self {
            options: ListOptions {
                default_row_height,
                ..options
            },
            mode: ListMode::Unmeasured,
            rows: Vec::new(),
            time_mode: TimeModeToggle::default(),
            container_width: None,
            heights: HeightCache::new(default_row_height),
            index: HeightIndex::default(),
            widths: None,
            probed_body_height: None,
            measured: false,
            scroll_offset: 0,
            stick_to_bottom: false,
            viewport_height: 0,
            list_height: 0,
            generation: 0,
            probe: ColumnWidthProbe::new(options.probe_sample_rows),
            engine: VirtualizationEngine::new(options.overscan),
        }
    }

    // === Accessors ===

    /// Options the controller was built with.
    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Current layout phase.
    pub fn mode(&self) -> ListMode {
        self.mode
    }

    /// Current time display mode.
    pub fn time_mode(&self) -> DisplayTimeMode {
        self.time_mode.mode()
    }

    /// Read-only view of the height cache.
    pub fn height_cache(&self) -> &HeightCache {
        &self.heights
    }

    /// Frozen column widths, once probed.
    pub fn column_widths(&self) -> Option<[u16; COLUMN_COUNT]> {
        self.widths
    }

    /// Body height of the unwindowed pass the widths were probed from.
    pub fn probed_body_height(&self) -> Option<usize> {
        self.probed_body_height
    }

    /// Scroll offset and visible body height.
    pub fn viewport(&self) -> ViewportState {
        ViewportState::new(self.scroll_offset, self.viewport_height)
    }

    /// Total scrollable height: measured rows plus the default for the rest.
    pub fn total_height(&self) -> usize {
        self.index.total()
    }

    /// Rows of the current data set.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Current render generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // === Commit ===

    /// Post-paint measurement step.
    ///
    /// In `Measuring` an unwindowed body is probed for column widths. In
    /// `Virtualized` a windowed body's cell heights are recorded. Anything
    /// else is ignored.
    pub fn commit(&mut self, mounted: Option<&MountedBody>) -> CommitOutcome {
        let Some(body) = mounted else {
            return CommitOutcome::NotMounted;
        };
        if body.generation != self.generation {
            debug!(
                mounted = body.generation,
                current = self.generation,
                "ignoring stale mounted body"
            );
            return CommitOutcome::Stale;
        }

        match (self.mode, body.kind) {
            (ListMode::Measuring, MountKind::Unwindowed) => self.commit_probe(body),
            (ListMode::Virtualized, MountKind::Windowed) => self.commit_heights(body),
            _ => CommitOutcome::Stale,
        }
    }

    fn commit_probe(&mut self, body: &MountedBody) -> CommitOutcome {
        let Some(result) = self.probe.probe(Some(body)) else {
            return CommitOutcome::Deferred;
        };
        self.widths = Some(result.widths);
        self.probed_body_height = Some(result.body_height);
        self.mode = ListMode::Virtualized;
        debug!(rows = self.rows.len(), "list virtualized");
        CommitOutcome::Probed
    }

    fn commit_heights(&mut self, body: &MountedBody) -> CommitOutcome {
        let mut changed_rows = 0;
        for row in &body.rows {
            let i = row.index.get();
            if i >= self.index.len() {
                continue;
            }
            for column in Column::ALL {
                self.heights
                    .set(row.index, column, row.cell(column).content_height);
            }
            if self.index.set(i, self.heights.row_height(row.index)) {
                changed_rows += 1;
            }
        }
        self.measured = true;
        if changed_rows > 0 {
            self.clamp_scroll();
            debug!(
                changed_rows,
                total_height = self.index.total(),
                "row heights measured"
            );
        }
        CommitOutcome::Measured { changed_rows }
    }

    // === Time format ===

    /// Flip the time display mode for every row and invalidate the layout.
    /// Returns the new mode.
    pub fn on_switch_time_format(&mut self) -> DisplayTimeMode {
        let mode = self.time_mode.toggle();
        self.invalidate("time format switched");
        mode
    }

    // === Scrolling ===

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.index.total().saturating_sub(self.viewport_height)
    }

    /// Scroll to an absolute body offset, clamped.
    pub fn scroll_to(&mut self, offset: usize) {
        self.stick_to_bottom = false;
        self.scroll_offset = offset.min(self.max_scroll());
    }

    /// Scroll by a signed number of lines, clamped.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta.unsigned_abs())
        };
        self.scroll_to(target);
    }

    /// Scroll to the first row.
    pub fn scroll_to_top(&mut self) {
        self.stick_to_bottom = false;
        self.scroll_offset = 0;
    }

    /// Scroll so the last row is at the bottom of the viewport.
    ///
    /// The list stays pinned there while rows near the end get measured,
    /// until any other scroll operation.
    pub fn scroll_to_bottom(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_offset = self.max_scroll();
    }

    /// Scroll up one viewport.
    pub fn page_up(&mut self) {
        self.scroll_by(-(self.page_size() as isize));
    }

    /// Scroll down one viewport.
    pub fn page_down(&mut self) {
        self.scroll_by(self.page_size() as isize);
    }

    fn page_size(&self) -> usize {
        self.viewport_height.max(1)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = if self.stick_to_bottom {
            self.max_scroll()
        } else {
            self.scroll_offset.min(self.max_scroll())
        };
    }

    /// Body lines the list wants: the probed grid until rows are measured,
    /// then the height index.
    fn content_height(&self) -> Option<usize> {
        match self.mode {
            ListMode::Virtualized if self.measured => Some(self.index.total()),
            ListMode::Virtualized => self.probed_body_height,
            _ => None,
        }
    }

    fn invalidate(&mut self, reason: &'static str) {
        self.heights.clear_all();
        self.index.reset(self.rows.len(), self.options.default_row_height);
        self.widths = None;
        self.probed_body_height = None;
        self.measured = false;
        self.generation = self.generation.wrapping_add(1);
        self.mode = ListMode::Measuring;
        self.clamp_scroll();
        debug!(
            reason,
            rows = self.rows.len(),
            generation = self.generation,
            "list layout invalidated"
        );
    }
}

impl<T: Clone + PartialEq> ListController<T> {
    // === Render ===

    /// Describe what the view must paint for this render cycle.
    ///
    /// The list grows with its content up to the container height and
    /// `max_list_height`; only then does the body scroll.
    ///
    /// A row set that differs from the previous one (deep comparison), a
    /// different time mode, or a different container width drops every
    /// measurement and restarts from the unwindowed pass.
    pub fn render(
        &mut self,
        rows: &[BreadcrumbRow<T>],
        time_mode: DisplayTimeMode,
        container: ContainerSize,
    ) -> ListFrame {
        self.sync(rows, time_mode, container);

        let mut list_height = container.height.min(self.options.max_list_height);
        if let Some(content) = self.content_height() {
            let wanted = u16::try_from(content)
                .unwrap_or(u16::MAX)
                .saturating_add(HEADER_HEIGHT);
            list_height = list_height.min(wanted);
        }
        self.list_height = list_height;
        self.viewport_height = usize::from(self.list_height.saturating_sub(HEADER_HEIGHT));
        self.clamp_scroll();

        let body = match (self.mode, self.widths) {
            (ListMode::Virtualized, Some(widths)) if !self.rows.is_empty() => {
                self.windowed_body(widths, container.width)
            }
            _ => None,
        }
        .map(FrameBody::Windowed)
        .unwrap_or(FrameBody::Unwindowed {
            row_count: self.rows.len(),
        });

        ListFrame {
            generation: self.generation,
            time_mode: self.time_mode.mode(),
            height: self.list_height,
            body,
        }
    }

    fn sync(&mut self, rows: &[BreadcrumbRow<T>], time_mode: DisplayTimeMode, container: ContainerSize) {
        let mut reason = None;
        if self.mode == ListMode::Unmeasured {
            reason = Some("first render");
        }
        if self.rows.as_slice() != rows {
            self.rows = rows.to_vec();
            reason = Some("rows changed");
        }
        if self.time_mode.set(time_mode) {
            reason = Some("time mode changed");
        }
        if self.container_width.replace(container.width) != Some(container.width)
            && reason.is_none()
        {
            reason = Some("container width changed");
        }
        if let Some(reason) = reason {
            self.invalidate(reason);
        }
    }

    fn windowed_body(&self, widths: [u16; COLUMN_COUNT], container_width: u16) -> Option<WindowedBody> {
        let viewport = self.viewport();
        let window = self.engine.window(&self.index, viewport)?;
        let placements = self.engine.placements(&self.index, &window);
        Some(WindowedBody {
            widths: fit_to_width(widths, container_width),
            viewport,
            window,
            placements,
            total_height: self.index.total(),
        })
    }

    /// Height of a row as currently laid out.
    pub fn row_height(&self, row: RowIndex) -> u16 {
        self.index
            .height(row.get())
            .unwrap_or(self.options.default_row_height)
    }
}
