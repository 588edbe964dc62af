//! Stdin-based breadcrumb source for piped input.

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};

/// Piped stdin, read to EOF once and kept.
///
/// Stdin cannot be rewound, so later loads return the text captured by the
/// first one.
pub struct StdinSource<R: Read> {
    reader: Option<R>,
    captured: String,
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource")
            .field("complete", &self.is_complete())
            .field("captured_bytes", &self.captured.len())
            .finish()
    }
}

/// Stdin source with the reader type erased.
pub type BoxedStdinSource = StdinSource<Box<dyn Read + Send>>;

impl BoxedStdinSource {
    /// Create a new StdinSource from stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal).
    /// This prevents the TUI from blocking waiting for user input when the
    /// user forgot to pipe data.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(Box::new(stdin)))
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a source from any reader. Skips the TTY check.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: Some(reader),
            captured: String::new(),
        }
    }

    /// Read everything up to EOF on the first call; return the same text after.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors or non-UTF-8 input.
    pub fn read(&mut self) -> Result<String, InputError> {
        if let Some(mut reader) = self.reader.take() {
            reader.read_to_string(&mut self.captured)?;
        }
        Ok(self.captured.clone())
    }

    /// True once EOF has been reached.
    pub fn is_complete(&self) -> bool {
        self.reader.is_none()
    }
}
