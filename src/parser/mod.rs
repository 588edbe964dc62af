//! JSONL parser for breadcrumb trails.
//!
//! Pure functions turning raw text into breadcrumb rows. A trail is either
//! one breadcrumb object per line, or a single JSON array of breadcrumbs.
//! Bad lines are reported, not fatal.

use crate::model::{Breadcrumb, ParseError};
use crate::view_state::types::BreadcrumbRow;
use serde_json::error::Category;

/// Parse a single JSONL line into a breadcrumb.
///
/// # Arguments
///
/// * `line` - Raw JSON text of one breadcrumb
/// * `line_number` - 1-based line number for error reporting
///
/// # Errors
///
/// `ParseError::InvalidJson` for syntax errors,
/// `ParseError::InvalidBreadcrumb` for well-formed JSON of the wrong shape.
pub fn parse_breadcrumb(line: &str, line_number: usize) -> Result<Breadcrumb, ParseError> {
    serde_json::from_str(line).map_err(|e| to_parse_error(&e, line_number))
}

/// Parse a whole trail.
///
/// Returns the rows in input order (ids are the ordinal positions of the
/// successfully parsed breadcrumbs) together with every error encountered.
pub fn parse_trail(text: &str) -> (Vec<BreadcrumbRow<Breadcrumb>>, Vec<ParseError>) {
    if text.trim_start().starts_with('[') {
        return match serde_json::from_str::<Vec<Breadcrumb>>(text) {
            Ok(crumbs) => (BreadcrumbRow::sequence(crumbs), Vec::new()),
            Err(e) => (Vec::new(), vec![to_parse_error(&e, e.line())]),
        };
    }

    let mut crumbs = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_breadcrumb(line, index + 1) {
            Ok(crumb) => crumbs.push(crumb),
            Err(err) => errors.push(err),
        }
    }

    (BreadcrumbRow::sequence(crumbs), errors)
}

fn to_parse_error(err: &serde_json::Error, line: usize) -> ParseError {
    match err.classify() {
        Category::Data => ParseError::InvalidBreadcrumb {
            line,
            message: err.to_string(),
        },
        Category::Syntax | Category::Eof | Category::Io => ParseError::InvalidJson {
            line,
            message: err.to_string(),
        },
    }
}
