//! crumbtrail
//!
//! Terminal viewer for error-report breadcrumb trails: a column-aligned
//! table that only renders the rows near the viewport.
//!
//! Pure core (`model`, `parser`, `view_state`) with an impure shell
//! (`source`, `view`, `logging`).

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod view;
pub mod view_state;
