//! Login, logout and request authentication

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::credentials::CredentialVerifier;
use crate::error::Result;
use crate::session::{bearer_token, Session, SessionStore};

/// Combines a credential verifier with the session table
#[derive(Debug)]
pub struct AuthGate {
    verifier: Arc<dyn CredentialVerifier>,
    sessions: SessionStore,
}

impl AuthGate {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            verifier,
            sessions: SessionStore::new(),
        }
    }

    /// Like [`AuthGate::new`], with sessions lasting `ttl_seconds`
    pub fn with_session_ttl(verifier: Arc<dyn CredentialVerifier>, ttl_seconds: u64) -> Self {
        Self {
            verifier,
            sessions: SessionStore::with_ttl_seconds(ttl_seconds),
        }
    }

    /// Verify credentials and open a session. No session is created on failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        match self.verifier.verify(username, password) {
            Ok(principal) => {
                let session = self.sessions.create(&principal).await;
                tracing::info!("User '{}' logged in", principal.username);
                Ok(session)
            }
            Err(e) => {
                tracing::debug!("Rejected login for '{}': {}", username, e);
                Err(e)
            }
        }
    }

    /// Resolve the session named by the request's bearer token
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Session> {
        let token = bearer_token(headers)?;
        self.sessions.lookup(token).await
    }

    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.revoke(token).await;
        if removed {
            tracing::debug!("Session revoked");
        }
        removed
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
