//! Credentials, access tokens, and the authorization policy.

pub mod password;
pub mod policy;
pub mod token;

use serde::{Deserialize, Serialize};

use crate::domain::Role;

pub use password::PasswordService;
pub use policy::{can_perform, Action, Resource};
pub use token::{Claims, TokenError, TokenService};

/// The authenticated caller of a request, as recovered from its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}
