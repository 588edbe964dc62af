//! Breadcrumb input sources.
//!
//! This module provides input sources for breadcrumb data:
//! - File loading, re-read on every load
//! - Stdin for piped input, captured once
//! - Unified InputSource enum for both

use crate::model::error::InputError;
use crate::model::{Breadcrumb, ParseError};
use crate::parser;
use crate::view_state::types::BreadcrumbRow;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::{BoxedStdinSource, StdinSource};

/// Result of one load: the rows that parsed and the lines that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTrail {
    /// Breadcrumbs in input order.
    pub rows: Vec<BreadcrumbRow<Breadcrumb>>,
    /// Non-fatal parse failures.
    pub errors: Vec<ParseError>,
}

/// Unified input source for breadcrumb data.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// File source, re-read on reload.
    File(FileSource),
    /// Piped stdin, read once.
    Stdin(BoxedStdinSource),
}

impl InputSource {
    /// Read and parse the whole trail.
    ///
    /// Returns parsed rows, not raw strings (parse at boundary). Malformed
    /// lines are logged and reported in [`LoadedTrail::errors`].
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn load(&mut self) -> Result<LoadedTrail, InputError> {
        let text = match self {
            InputSource::File(f) => f.read()?,
            InputSource::Stdin(s) => s.read()?,
        };

        let (rows, errors) = parser::parse_trail(&text);
        for error in &errors {
            warn!(line = error.line(), "skipping breadcrumb: {}", error);
        }
        info!(rows = rows.len(), skipped = errors.len(), "breadcrumbs loaded");

        Ok(LoadedTrail { rows, errors })
    }

    /// Whether a reload can observe new data.
    ///
    /// # Behavior:
    /// - File: always true (re-read from disk)
    /// - Stdin: false, the captured text never changes
    pub fn is_reloadable(&self) -> bool {
        matches!(self, InputSource::File(_))
    }
}

/// Detect and create appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: create FileSource
/// 2. If stdin is piped: use StdinSource
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is not piped.
/// Returns `InputError::FileNotFound` if file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(BoxedStdinSource::new()?)),
    }
}
