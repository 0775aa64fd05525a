use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::auth::PasswordService;
use crate::domain::{is_valid_email, normalize_email, Role, User, UserCreate, UserQuery};
use crate::user_actor::UserError;

/// Signup input. The password is plain text until [`UserClient::register`] hashes it.
#[derive(Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
    passwords: PasswordService,
}

impl_client_methods!(UserClient, User, UserQuery, UserError, user);

impl UserClient {
    pub fn new(inner: ResourceClient<User>, passwords: PasswordService) -> Self {
        Self { inner, passwords }
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .list_users(UserQuery::ByEmail(email.to_string()))
            .await?
            .into_iter()
            .next())
    }

    /// Creates an account after checking the email is free and hashing the password.
    #[instrument(skip(self, registration), fields(email = %registration.email, role = %registration.role))]
    pub async fn register(&self, registration: Registration) -> Result<User, UserError> {
        if !is_valid_email(&registration.email) {
            return Err(UserError::ValidationError(format!("invalid email: {}", registration.email)));
        }
        let email = normalize_email(&registration.email);
        if self.find_by_email(&email).await?.is_some() {
            return Err(UserError::AlreadyExists(email));
        }

        let passwords = self.passwords.clone();
        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || passwords.hash_password(&password))
            .await
            .map_err(|e| UserError::HashError(e.to_string()))??;

        // The lookup above is a fast path; the actor refuses duplicates atomically.
        debug!("Sending request");
        let user = self
            .inner
            .create(UserCreate {
                full_name: registration.full_name,
                email: email.clone(),
                password_hash,
                role: registration.role,
            })
            .await
            .map_err(|e| match e {
                FrameworkError::Conflict(_) => UserError::AlreadyExists(email),
                other => other.into(),
            })?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Checks credentials. Unknown email and wrong password fail the same way.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let Some(user) = self.find_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(UserError::AuthenticationFailed);
        };

        let passwords = self.passwords.clone();
        let password = password.to_string();
        let hash = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || passwords.verify_password(&password, &hash))
            .await
            .map_err(|e| UserError::HashError(e.to_string()))??;

        if !verified {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(UserError::AuthenticationFailed);
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{create_mock_client, expect_create, expect_list};
    use crate::test_support::cheap_passwords;
    use chrono::Utc;

    fn stored(email: &str, hash: String) -> User {
        User {
            id: "user_1".into(),
            full_name: "Sam Staff".into(),
            email: email.into(),
            password_hash: hash,
            role: Role::Staff,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_normalizes_email() {
        let (inner, mut rx) = create_mock_client::<User>(4);
        let client = UserClient::new(inner, cheap_passwords());

        let task = tokio::spawn(async move {
            client
                .register(Registration {
                    full_name: "Sam Staff".into(),
                    email: "Sam@Test.com".into(),
                    password: "password123".into(),
                    role: Role::Staff,
                })
                .await
        });

        let (query, responder) = expect_list(&mut rx).await.expect("Expected uniqueness lookup");
        assert!(matches!(query, UserQuery::ByEmail(ref e) if e == "sam@test.com"));
        responder.send(Ok(Vec::new())).unwrap();

        let (params, responder) = expect_create(&mut rx).await.expect("Expected User Create");
        assert_eq!(params.email, "sam@test.com");
        assert!(params.password_hash.starts_with("$argon2id$"));
        responder.send(Ok(stored(&params.email, params.password_hash.clone()))).unwrap();

        let user = task.await.unwrap().unwrap();
        assert_eq!(user.email, "sam@test.com");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let (inner, mut rx) = create_mock_client::<User>(4);
        let client = UserClient::new(inner, cheap_passwords());

        let task = tokio::spawn(async move {
            client
                .register(Registration {
                    full_name: "Sam".into(),
                    email: "sam@test.com".into(),
                    password: "password123".into(),
                    role: Role::Staff,
                })
                .await
        });

        let (_, responder) = expect_list(&mut rx).await.expect("Expected uniqueness lookup");
        responder.send(Ok(vec![stored("sam@test.com", String::new())])).unwrap();

        assert_eq!(task.await.unwrap(), Err(UserError::AlreadyExists("sam@test.com".into())));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let passwords = cheap_passwords();
        let hash = passwords.hash_password("password123").unwrap();
        let (inner, mut rx) = create_mock_client::<User>(4);
        let client = UserClient::new(inner, passwords);

        let task = tokio::spawn(async move { client.authenticate("sam@test.com", "nope-nope").await });
        let (_, responder) = expect_list(&mut rx).await.expect("Expected lookup");
        responder.send(Ok(vec![stored("sam@test.com", hash)])).unwrap();

        assert_eq!(task.await.unwrap(), Err(UserError::AuthenticationFailed));
    }
}
