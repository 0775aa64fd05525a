use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{normalize_email, User, UserCreate, UserQuery};

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = (); // Accounts are not edited after signup
    type Query = UserQuery;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String { &self.id }

    /// Creates a new User from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the user
    /// * `params` - Name, email, already-hashed password and role
    ///
    /// # Notes
    /// The email is stored normalized (trimmed, lowercase).
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, String> {
        if params.full_name.trim().is_empty() {
            return Err("fullName is required".to_string());
        }
        Ok(Self {
            id,
            full_name: params.full_name.trim().to_string(),
            email: normalize_email(&params.email),
            password_hash: params.password_hash,
            role: params.role,
            created_at: Utc::now(),
        })
    }

    /// Emails are unique, compared after normalization.
    fn conflicts_with(&self, params: &UserCreate) -> bool {
        self.email == normalize_email(&params.email)
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn matches(&self, query: &UserQuery) -> bool {
        match query {
            UserQuery::All => true,
            UserQuery::ByEmail(email) => self.email == normalize_email(email),
        }
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
