//! Server-rendered HTML for pages and forms. Every interpolated value that
//! did not come from this module goes through [`crate::html::escape`].

pub mod alert;
pub mod forms;
pub mod layout;

pub use alert::{AlertKind, alert};
