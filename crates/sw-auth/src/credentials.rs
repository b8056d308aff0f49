//! Pluggable credential verification

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
}

/// Capability to check a username/password pair
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug {
    /// Verify the pair, returning the principal on success
    fn verify(&self, username: &str, password: &str) -> Result<Principal>;
}

/// A single plain-text username/password pair
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<Principal> {
        if username == self.username && password == self.password {
            Ok(Principal {
                username: username.to_string(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// A username paired with an Argon2 PHC hash string
#[derive(Debug, Clone)]
pub struct HashedCredentials {
    username: String,
    password_hash: String,
}

impl HashedCredentials {
    /// Build from a PHC string, rejecting hashes that do not parse
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Result<Self> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash).map_err(|e| AuthError::InvalidHash(e.to_string()))?;
        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }
}

impl CredentialVerifier for HashedCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<Principal> {
        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|e| AuthError::InvalidHash(e.to_string()))?;
        let password_ok = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();

        if username == self.username && password_ok {
            Ok(Principal {
                username: username.to_string(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Hash a password into an Argon2id PHC string with a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    hash_password_with_salt(password, &salt)
}

fn hash_password_with_salt(password: &str, salt: &SaltString) -> Result<String> {
    Argon2::default()
        .hash_password(password.as_bytes(), salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::InvalidHash(e.to_string()))
}
