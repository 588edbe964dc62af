//! Domain model types (pure).

pub mod breadcrumb;
pub mod error;
pub mod key_action;

pub use breadcrumb::{Breadcrumb, BreadcrumbType, Level};
pub use error::{AppError, InputError, ParseError};
pub use key_action::KeyAction;
