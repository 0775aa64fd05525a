//! Lead-specific domain logic, including patch and note actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
