//! System orchestration, startup, and shutdown logic.

pub mod crm_system;
pub mod tracing;

pub use crm_system::*;
pub use self::tracing::*;
