//! Typed handles for talking to the entity actors.

#[macro_use]
mod macros;

pub mod lead_client;
pub mod notification_client;
pub mod user_client;

pub use lead_client::{LeadClient, LeadDraft};
pub use notification_client::NotificationClient;
pub use user_client::{Registration, UserClient};
