//! Password hashing with Argon2id.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::user_actor::UserError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Hashes and verifies account passwords.
#[derive(Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    /// Uses the Argon2 default cost parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses explicit Argon2id cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash password using Argon2
    pub fn hash_password(&self, password: &str) -> Result<String, UserError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(UserError::ValidationError(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if password.len() > MAX_PASSWORD_LEN {
            return Err(UserError::ValidationError(format!(
                "Password cannot exceed {} characters",
                MAX_PASSWORD_LEN
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| UserError::HashError(e.to_string()))?;

        Ok(password_hash.to_string())
    }

    /// Verify password against hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, UserError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::HashError(e.to_string()))?;

        Ok(self.argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordService {
        PasswordService::with_params(Params::new(1024, 1, 1, None).unwrap())
    }

    #[test]
    fn test_hash_then_verify() {
        let passwords = cheap();
        let hash = passwords.hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(passwords.verify_password("correct horse", &hash).unwrap());
        assert!(!passwords.verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_short_password_is_rejected() {
        let err = cheap().hash_password("short").unwrap_err();
        assert!(matches!(err, UserError::ValidationError(_)));
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(matches!(
            cheap().verify_password("whatever1", "not-a-hash"),
            Err(UserError::HashError(_))
        ));
    }
}
