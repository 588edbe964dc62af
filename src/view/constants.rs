//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for layout-related numeric values.

/// Height of the status bar in lines.
///
/// Single line at the bottom of the screen with counts and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Blank cells at the right edge of every list cell.
///
/// Cell content is wrapped to the track width minus this gutter.
pub const CELL_GUTTER: u16 = 1;

/// Icon drawn before the Time header title; clicking the header toggles
/// the time mode.
pub const TIME_HEADER_ICON: &str = "⇄";

/// Off-screen layout passes allowed per draw before painting.
///
/// One pass probes column widths, the next records row heights at those
/// widths, the last confirms nothing moved. Anything still unsettled is
/// picked up by the next draw.
pub const MAX_SETTLE_PASSES: usize = 3;

/// Lines scrolled per mouse wheel notch.
pub const WHEEL_SCROLL_LINES: isize = 3;
