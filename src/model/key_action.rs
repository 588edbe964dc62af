//! Domain-level keyboard actions independent of key bindings.

/// Actions the breadcrumb viewer reacts to.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` lives in `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Scroll the list up by one line. Default: k/↑
    ScrollUp,
    /// Scroll the list down by one line. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first breadcrumb. Default: g/Home
    ScrollToTop,
    /// Jump to the last breadcrumb. Default: G/End
    ScrollToBottom,
    /// Switch the Time column between absolute and relative. Default: t
    SwitchTimeFormat,
    /// Re-read the breadcrumb source. Default: r
    Reload,
    /// Exit the viewer. Default: q/Esc
    Quit,
}
