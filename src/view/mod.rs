//! TUI rendering and event handling (impure shell).

pub mod cells;
pub mod constants;
pub mod highlight;
pub mod list;
pub mod styles;
pub mod text_layout;
pub mod time_format;

pub use cells::{BreadcrumbCells, CellContext, CellOverflow, CellProvider};
pub use list::{render_list, ListProps};
pub use styles::{ColorConfig, ListStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, Breadcrumb, KeyAction};
use crate::source::{InputSource, LoadedTrail};
use crate::view_state::mounted::MountedBody;
use crate::view_state::{
    BreadcrumbRow, Column, ContainerSize, DisplayTimeMode, ListController, ListOptions,
};
use chrono::{DateTime, Utc};
use constants::{MAX_SETTLE_PASSES, STATUS_BAR_HEIGHT, WHEEL_SCROLL_LINES};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Settings carried from the command line into the TUI.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Term highlighted in every cell.
    pub search: Option<String>,
    /// Organization of the trail; enables event references.
    pub org_id: Option<String>,
    /// Origin of relative times. Defaults to the last breadcrumb's timestamp.
    pub reference_time: Option<DateTime<Utc>>,
    /// Start with relative times.
    pub relative_time: bool,
    /// Disable colors.
    pub no_color: bool,
    /// List tunables.
    pub list_options: ListOptions,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    controller: ListController<Breadcrumb>,
    rows: Vec<BreadcrumbRow<Breadcrumb>>,
    skipped: usize,
    input_source: InputSource,
    key_bindings: KeyBindings,
    cells: BreadcrumbCells,
    styles: ListStyles,
    time_mode: DisplayTimeMode,
    search_term: Option<String>,
    org_id: Option<String>,
    /// Reference time pinned on the command line.
    pinned_reference: Option<DateTime<Utc>>,
    /// Reference time in effect for the loaded trail.
    reference_time: Option<DateTime<Utc>>,
    /// Last painted list (for header click detection)
    last_mounted: Option<MountedBody>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Load the trail, then put the terminal in raw mode with alternate screen.
    pub fn new(mut input_source: InputSource, args: CliArgs) -> Result<Self, TuiError> {
        // Load before touching the terminal so input errors print normally.
        let trail = input_source.load()?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, input_source, trail, args))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Esc or Ctrl+C). Redraws only after input
    /// or a resize.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    // Width changes are picked up by the controller on render.
                    debug!(width, height, "terminal resized");
                }
                _ => continue,
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app around an existing terminal and an already loaded trail.
    pub fn with_terminal(
        terminal: Terminal<B>,
        input_source: InputSource,
        trail: LoadedTrail,
        args: CliArgs,
    ) -> Self {
        let styles = ListStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
        let mut app = Self {
            terminal,
            controller: ListController::new(args.list_options),
            rows: Vec::new(),
            skipped: 0,
            input_source,
            key_bindings: KeyBindings::default(),
            cells: BreadcrumbCells::new(styles),
            styles,
            time_mode: DisplayTimeMode::from_relative(args.relative_time),
            search_term: args.search.filter(|s| !s.is_empty()),
            org_id: args.org_id,
            pinned_reference: args.reference_time,
            reference_time: None,
            last_mounted: None,
        };
        app.set_trail(trail);
        app
    }

    /// Layout controller of the list.
    pub fn controller(&self) -> &ListController<Breadcrumb> {
        &self.controller
    }

    /// Time mode the list is rendered with.
    pub fn time_mode(&self) -> DisplayTimeMode {
        self.time_mode
    }

    /// The terminal the app draws on.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Loaded rows.
    pub fn rows(&self) -> &[BreadcrumbRow<Breadcrumb>] {
        &self.rows
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "key action");

        match action {
            KeyAction::ScrollUp => self.controller.scroll_by(-1),
            KeyAction::ScrollDown => self.controller.scroll_by(1),
            KeyAction::PageUp => self.controller.page_up(),
            KeyAction::PageDown => self.controller.page_down(),
            KeyAction::ScrollToTop => self.controller.scroll_to_top(),
            KeyAction::ScrollToBottom => self.controller.scroll_to_bottom(),
            KeyAction::SwitchTimeFormat => self.switch_time_format(),
            KeyAction::Reload => {
                if let Err(e) = self.reload() {
                    warn!(error = %e, "reload failed");
                }
            }
            KeyAction::Quit => return true,
        }
        false
    }

    /// Handle a mouse event: wheel scrolls, a click on the Time header
    /// switches the time format.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.controller.scroll_by(WHEEL_SCROLL_LINES),
            MouseEventKind::ScrollUp => self.controller.scroll_by(-WHEEL_SCROLL_LINES),
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .last_mounted
                    .as_ref()
                    .and_then(|m| m.header_hit(mouse.column, mouse.row));
                if hit == Some(Column::Time) {
                    self.switch_time_format();
                }
            }
            _ => {}
        }
    }

    /// Re-read the input source. Stdin is read once, so this only does
    /// something for files.
    pub fn reload(&mut self) -> Result<(), TuiError> {
        if !self.input_source.is_reloadable() {
            debug!("reload skipped: input cannot be re-read");
            return Ok(());
        }
        let trail = self.input_source.load()?;
        self.set_trail(trail);
        Ok(())
    }

    /// Render the current frame
    ///
    /// Settles the list layout off-screen first, then paints it together
    /// with the status bar.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let (list_area, status_area) = split_screen(Rect::new(0, 0, size.width, size.height));
        self.settle(list_area);

        let frame = self
            .controller
            .render(&self.rows, self.time_mode, container(list_area));
        let props = ListProps {
            org_id: self.org_id.as_deref(),
            search_term: self.search_term.as_deref(),
            reference_time: self.reference_time,
        };
        let status = self.status_line();
        let rows = &self.rows;
        let cells = &self.cells;
        let styles = &self.styles;

        let mut mounted = None;
        self.terminal.draw(|f| {
            mounted = Some(render_list(
                &frame,
                rows,
                &props,
                cells,
                styles,
                list_area,
                f.buffer_mut(),
            ));
            f.render_widget(Paragraph::new(status), status_area);
        })?;

        let outcome = self.controller.commit(mounted.as_ref());
        if outcome.needs_redraw() {
            debug!(?outcome, "layout still settling after paint");
        }
        self.last_mounted = mounted;
        Ok(())
    }

    /// Run render and commit off-screen until the layout stops changing.
    fn settle(&mut self, area: Rect) {
        for pass in 0..MAX_SETTLE_PASSES {
            let frame = self
                .controller
                .render(&self.rows, self.time_mode, container(area));
            let mut scratch = Buffer::empty(area);
            let mounted = render_list(
                &frame,
                &self.rows,
                &self.props(),
                &self.cells,
                &self.styles,
                area,
                &mut scratch,
            );
            let outcome = self.controller.commit(Some(&mounted));
            if !outcome.needs_redraw() {
                debug!(pass, ?outcome, "layout settled");
                break;
            }
        }
    }

    fn props(&self) -> ListProps<'_> {
        ListProps {
            org_id: self.org_id.as_deref(),
            search_term: self.search_term.as_deref(),
            reference_time: self.reference_time,
        }
    }

    fn switch_time_format(&mut self) {
        self.time_mode = self.controller.on_switch_time_format();
        info!(mode = ?self.time_mode, "time format switched");
    }

    fn set_trail(&mut self, trail: LoadedTrail) {
        self.rows = trail.rows;
        self.skipped = trail.errors.len();
        self.reference_time = self
            .pinned_reference
            .or_else(|| self.rows.iter().rev().find_map(|r| r.data().timestamp));
    }

    fn status_line(&self) -> Line<'static> {
        let style = self.styles.header_hint;
        let mut text = format!(" {} breadcrumbs", self.rows.len());
        if self.skipped > 0 {
            text.push_str(&format!(" · {} skipped", self.skipped));
        }
        if let Some(term) = &self.search_term {
            text.push_str(&format!(" · search: {term}"));
        }
        text.push_str(&format!(
            " · t: {} · r: reload · q: quit",
            self.time_mode.switch_hint()
        ));
        Line::from(Span::styled(text, style))
    }
}

/// Split the screen into the list area and the status bar.
fn split_screen(screen: Rect) -> (Rect, Rect) {
    let status_height = STATUS_BAR_HEIGHT.min(screen.height);
    let list = Rect {
        height: screen.height - status_height,
        ..screen
    };
    let status = Rect {
        y: screen.y + list.height,
        height: status_height,
        ..screen
    };
    (list, status)
}

fn container(area: Rect) -> ContainerSize {
    ContainerSize::new(area.width, area.height)
}

/// Initialize and run the TUI application with input source and args
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(input_source: InputSource, args: CliArgs) -> Result<(), TuiError> {
    let mut app = TuiApp::new(input_source, args)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
