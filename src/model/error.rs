//! Error types for crumbtrail.
//!
//! Errors are layered with `thiserror` and compose through `From`, so callers
//! propagate them with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error wrapping every domain failure
//!   - [`InputError`] - reading the breadcrumb file or stdin failed
//!   - [`ParseError`] - a breadcrumb line could not be decoded
//!   - `std::io::Error` - terminal failures
//!
//! # Recovery Strategy
//!
//! Parse errors are **non-fatal**: the offending line is logged and skipped,
//! the rest of the trail is still shown. Input and terminal errors are fatal
//! and propagate to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// # Examples
///
/// ```no_run
/// use crumbtrail::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     let _input = read_trail()?;
///     Ok(())
/// }
/// # fn read_trail() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the breadcrumb source. Fatal.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to decode a breadcrumb. Non-fatal when it comes from a single line.
    #[error("Failed to parse breadcrumb: {0}")]
    Parse(#[from] ParseError),

    /// Terminal or rendering failure. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading breadcrumbs from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The breadcrumb file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use crumbtrail::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// No file argument was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Any other I/O failure while reading input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when decoding a breadcrumb line.
///
/// Every variant carries the 1-based line number so the warning written to the
/// log file points at the offending line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not syntactically valid JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbtrail::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "EOF while parsing an object".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// Parser message from `serde_json`.
        message: String,
    },

    /// The line is valid JSON but does not describe a breadcrumb
    /// (wrong field types, unparseable timestamp, not an object).
    #[error("Invalid breadcrumb at line {line}: {message}")]
    InvalidBreadcrumb {
        /// 1-based line number.
        line: usize,
        /// Description of the mismatch.
        message: String,
    },
}

impl ParseError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidJson { line, .. } | ParseError::InvalidBreadcrumb { line, .. } => {
                *line
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_from_input_error() {
        let err: AppError = InputError::NoInput.into();
        assert!(matches!(err, AppError::InputRead(InputError::NoInput)));
        assert!(err.to_string().contains("Failed to read input"));
    }

    #[test]
    fn app_error_from_parse_error() {
        let err: AppError = ParseError::InvalidJson {
            line: 3,
            message: "oops".to_string(),
        }
        .into();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn app_error_from_io_error() {
        let err: AppError = std::io::Error::other("broken pipe").into();
        assert!(matches!(err, AppError::Terminal(_)));
    }

    #[test]
    fn input_error_wraps_io_error() {
        let err: InputError = std::io::Error::other("disk").into();
        assert!(err.to_string().contains("disk"));
    }

    #[test]
    fn parse_error_line_accessor() {
        let err = ParseError::InvalidBreadcrumb {
            line: 7,
            message: "bad level".to_string(),
        };
        assert_eq!(err.line(), 7);
    }
}
