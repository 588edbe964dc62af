//! Configuration file loading with precedence handling.

use crate::view_state::controller::{ListOptions, DEFAULT_ROW_HEIGHT, MAX_LIST_HEIGHT};
use crate::view_state::column_probe::PROBE_SAMPLE_ROWS;
use crate::view_state::virtualization::DEFAULT_OVERSCAN;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CRUMBTRAIL_CONFIG";

/// Environment variable overriding the overscan.
pub const OVERSCAN_ENV: &str = "CRUMBTRAIL_OVERSCAN";

/// Environment variable selecting relative time on startup.
pub const RELATIVE_TIME_ENV: &str = "CRUMBTRAIL_RELATIVE_TIME";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/crumbtrail/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows rendered beyond each edge of the viewport.
    #[serde(default)]
    pub overscan: Option<usize>,

    /// Height of a row before it is measured, in lines.
    #[serde(default)]
    pub default_row_height: Option<u16>,

    /// Tallest the list may grow before scrolling internally.
    #[serde(default)]
    pub max_list_height: Option<u16>,

    /// Rows read when probing column widths.
    #[serde(default)]
    pub probe_sample_rows: Option<usize>,

    /// Start with the Time column in relative mode.
    #[serde(default)]
    pub relative_time: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Overscan rows.
    pub overscan: usize,
    /// Default row height.
    pub default_row_height: u16,
    /// Maximum list height.
    pub max_list_height: u16,
    /// Probe sample rows.
    pub probe_sample_rows: usize,
    /// Start in relative time mode.
    pub relative_time: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            overscan: DEFAULT_OVERSCAN,
            default_row_height: DEFAULT_ROW_HEIGHT,
            max_list_height: MAX_LIST_HEIGHT,
            probe_sample_rows: PROBE_SAMPLE_ROWS,
            relative_time: false,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// List tunables for the controller.
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            overscan: self.overscan,
            default_row_height: self.default_row_height.max(1),
            max_list_height: self.max_list_height,
            probe_sample_rows: self.probe_sample_rows.max(1),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/crumbtrail/crumbtrail.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("crumbtrail").join("crumbtrail.log")
    } else {
        PathBuf::from("crumbtrail.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/crumbtrail/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("crumbtrail").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CRUMBTRAIL_CONFIG` environment variable
/// 3. Default path `~/.config/crumbtrail/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CRUMBTRAIL_OVERSCAN`: non-negative integer
/// - `CRUMBTRAIL_RELATIVE_TIME`: `1`/`true`/`yes` or `0`/`false`/`no`
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(OVERSCAN_ENV) {
        match raw.trim().parse::<usize>() {
            Ok(overscan) => config.overscan = overscan,
            Err(_) => warn!(value = %raw, "ignoring invalid {}", OVERSCAN_ENV),
        }
    }

    if let Ok(raw) = std::env::var(RELATIVE_TIME_ENV) {
        match parse_flag(&raw) {
            Some(relative) => config.relative_time = relative,
            None => warn!(value = %raw, "ignoring invalid {}", RELATIVE_TIME_ENV),
        }
    }

    config
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        overscan: config.overscan.unwrap_or(defaults.overscan),
        default_row_height: config
            .default_row_height
            .unwrap_or(defaults.default_row_height),
        max_list_height: config.max_list_height.unwrap_or(defaults.max_list_height),
        probe_sample_rows: config
            .probe_sample_rows
            .unwrap_or(defaults.probe_sample_rows),
        relative_time: config.relative_time.unwrap_or(defaults.relative_time),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overscan_override: Option<usize>,
    relative_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(overscan) = overscan_override {
        config.overscan = overscan;
    }

    if let Some(relative) = relative_override {
        config.relative_time = relative;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
