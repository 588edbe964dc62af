//! Breadcrumb list styling configuration.
//!
//! Colors for breadcrumb types and levels, the header, and search matches.

use crate::model::{BreadcrumbType, Level};
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        Self::with_colors(!no_color_flag && std::env::var("NO_COLOR").is_err())
    }

    /// Colors explicitly on or off, ignoring the environment.
    pub fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ListStyles =====

/// Styles used by the breadcrumb list.
///
/// With colors disabled every color is dropped, modifiers (bold, reversed)
/// are kept so the header and search matches stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyles {
    colors: bool,
    /// Column header titles.
    pub header: Style,
    /// Hint next to the Time header.
    pub header_hint: Style,
    /// Category label.
    pub category: Style,
    /// Description and data text.
    pub description: Style,
    /// Keys of data entries.
    pub data_key: Style,
    /// Time column.
    pub time: Style,
    /// Search-term match overlay.
    pub search_match: Style,
    /// Overlay for the last row of the trail.
    pub last_row: Style,
    /// Scrollbar thumb.
    pub scrollbar: Style,
}

impl ListStyles {
    /// Styles honoring the color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let colors = config.colors_enabled();
        let fg = |c: Color| if colors { Style::default().fg(c) } else { Style::default() };
        Self {
            colors,
            header: fg(Color::Gray).add_modifier(Modifier::BOLD),
            header_hint: fg(Color::DarkGray),
            category: Style::default().add_modifier(Modifier::BOLD),
            description: Style::default(),
            data_key: fg(Color::DarkGray),
            time: fg(Color::Gray),
            search_match: if colors {
                Style::default().bg(Color::Yellow).fg(Color::Black)
            } else {
                Style::default().add_modifier(Modifier::REVERSED)
            },
            last_row: Style::default().add_modifier(Modifier::BOLD),
            scrollbar: fg(Color::DarkGray),
        }
    }

    /// Icon color for a breadcrumb type.
    pub fn type_style(&self, kind: BreadcrumbType) -> Style {
        if !self.colors {
            return Style::default();
        }
        let color = match kind {
            BreadcrumbType::Http | BreadcrumbType::Navigation => Color::Green,
            BreadcrumbType::Error | BreadcrumbType::Exception => Color::Red,
            BreadcrumbType::Warning => Color::Yellow,
            BreadcrumbType::Info | BreadcrumbType::Query => Color::Blue,
            BreadcrumbType::User | BreadcrumbType::Ui => Color::Magenta,
            BreadcrumbType::System | BreadcrumbType::Session | BreadcrumbType::Transaction => {
                Color::Cyan
            }
            BreadcrumbType::Debug | BreadcrumbType::Default | BreadcrumbType::Unknown => {
                Color::Gray
            }
        };
        Style::default().fg(color)
    }

    /// Style of the Level column.
    pub fn level_style(&self, level: Level) -> Style {
        if !self.colors {
            return match level {
                Level::Fatal => Style::default().add_modifier(Modifier::BOLD),
                _ => Style::default(),
            };
        }
        match level {
            Level::Fatal => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Level::Error => Style::default().fg(Color::Red),
            Level::Warning => Style::default().fg(Color::Yellow),
            Level::Info => Style::default().fg(Color::Blue),
            Level::Debug => Style::default().fg(Color::DarkGray),
            Level::Undefined => Style::default(),
        }
    }

    /// Background of every cell of a row whose breadcrumb is an error.
    pub fn error_row(&self) -> Style {
        if self.colors {
            Style::default().bg(Color::Rgb(60, 20, 20))
        } else {
            Style::default()
        }
    }
}

impl Default for ListStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
