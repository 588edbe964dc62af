//! Absolute / relative display mode of the Time column.

/// How timestamps are displayed. Shared by every row of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayTimeMode {
    /// Wall-clock time of the breadcrumb.
    #[default]
    Absolute,
    /// Offset from the reference time (usually the error event).
    Relative,
}

impl DisplayTimeMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            DisplayTimeMode::Absolute => DisplayTimeMode::Relative,
            DisplayTimeMode::Relative => DisplayTimeMode::Absolute,
        }
    }

    /// Mode from a "show relative time" flag.
    pub fn from_relative(relative: bool) -> Self {
        if relative {
            DisplayTimeMode::Relative
        } else {
            DisplayTimeMode::Absolute
        }
    }

    /// Hint shown next to the Time header describing what a toggle does.
    pub fn switch_hint(self) -> &'static str {
        match self {
            DisplayTimeMode::Relative => "Switch to absolute",
            DisplayTimeMode::Absolute => "Switch to relative",
        }
    }
}

/// Owner of the display mode; only flipped by an explicit user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeModeToggle {
    mode: DisplayTimeMode,
}

impl TimeModeToggle {
    /// Start in `mode`.
    pub fn new(mode: DisplayTimeMode) -> Self {
        Self { mode }
    }

    /// Current mode.
    pub fn mode(&self) -> DisplayTimeMode {
        self.mode
    }

    /// Flip the mode and return the new one.
    pub fn toggle(&mut self) -> DisplayTimeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Adopt a mode chosen elsewhere. Returns `true` if it differs.
    pub fn set(&mut self, mode: DisplayTimeMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_is_identity() {
        let mut toggle = TimeModeToggle::new(DisplayTimeMode::Absolute);
        assert_eq!(toggle.toggle(), DisplayTimeMode::Relative);
        assert_eq!(toggle.toggle(), DisplayTimeMode::Absolute);
    }

    #[test]
    fn switch_hint_names_the_other_mode() {
        assert_eq!(DisplayTimeMode::Relative.switch_hint(), "Switch to absolute");
        assert_eq!(DisplayTimeMode::Absolute.switch_hint(), "Switch to relative");
    }

    #[test]
    fn set_reports_changes() {
        let mut toggle = TimeModeToggle::default();
        assert!(!toggle.set(DisplayTimeMode::Absolute));
        assert!(toggle.set(DisplayTimeMode::Relative));
        assert_eq!(toggle.mode(), DisplayTimeMode::Relative);
    }

    #[test]
    fn from_relative_flag() {
        assert_eq!(DisplayTimeMode::from_relative(true), DisplayTimeMode::Relative);
        assert_eq!(DisplayTimeMode::from_relative(false), DisplayTimeMode::Absolute);
    }
}
