//! Authentication utilities for Smart Waste services
//!
//! A pluggable [`CredentialVerifier`] checks username/password pairs, and an
//! [`AuthGate`] turns successful logins into bearer-token [`Session`]s.

pub mod credentials;
pub mod error;
pub mod gate;
pub mod session;

pub use credentials::{
    hash_password, CredentialVerifier, HashedCredentials, Principal, StaticCredentials,
};
pub use error::{AuthError, Result};
pub use gate::AuthGate;
pub use session::{bearer_token, Session, SessionStore, DEFAULT_SESSION_TTL_SECONDS};
