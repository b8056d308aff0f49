//! Error types for credential verification and sessions

/// Errors raised by the auth gate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Username or password did not match; the message is the same for both
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid password hash: {0}")]
    InvalidHash(String),

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Unknown or expired session")]
    UnknownSession,
}

/// Result type alias for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;
