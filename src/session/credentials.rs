use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, warn};

use crate::config::{CredentialsConfig, UserCredential};
use crate::shared::AppError;

/// Hashes a password into an argon2id PHC string suitable for `team.yaml`.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            warn!(error = %e, "Failed to hash password");
            AppError::Internal
        })
}

/// Usernames and password hashes allowed to sign in.
pub struct CredentialStore {
    config: CredentialsConfig,
}

impl CredentialStore {
    pub fn new(config: CredentialsConfig) -> Self {
        Self { config }
    }

    /// Returns the matching user, or `Unauthorized` without saying which
    /// half of the pair was wrong.
    pub fn verify(&self, username: &str, password: &str) -> Result<&UserCredential, AppError> {
        let rejected = || AppError::Unauthorized("Username/password is incorrect".to_string());

        let user = self.config.usernames.get(username).ok_or_else(|| {
            debug!(username = %username, "Unknown username");
            rejected()
        })?;

        let parsed = PasswordHash::new(&user.password).map_err(|e| {
            warn!(username = %username, error = %e, "Stored password hash is malformed");
            rejected()
        })?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| rejected())?;

        Ok(user)
    }
}
