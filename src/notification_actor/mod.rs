//! Notification records: append-only, with a single read-state action.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
