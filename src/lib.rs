//! Lead desk: a small CRM backend for leads, notifications, and staff accounts.
//!
//! Each entity store is owned by an actor task (`ResourceActor`) and reached through
//! a typed client. Lead mutations emit domain events; the notification dispatcher
//! turns them into notifications for the other party. The HTTP API lives in [`api`]
//! and a matching client in [`api_client`].

pub mod actor_framework;
pub mod api;
pub mod api_client;
pub mod app_system;
pub mod auth;
pub mod clients;
pub mod config;
pub mod domain;
pub mod events;
pub mod lead_actor;
pub mod notification_actor;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod test_support;
