//! Configuration types for the smartbin service

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sw_auth::{
    CredentialVerifier, HashedCredentials, StaticCredentials, DEFAULT_SESSION_TTL_SECONDS,
};

use crate::aggregator::DEFAULT_ALERT_THRESHOLD;
use crate::error::SmartbinError;
use crate::reading::MAX_FILL_LEVEL;
use crate::synthetic::DEFAULT_MAX_INCREMENT;
use crate::teams::{default_teams, DispatchTeam};

/// Upper bound for `server.dispatch_history_size`
pub const MAX_DISPATCH_HISTORY_SIZE: usize = 10_000;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default = "default_teams")]
    pub teams: Vec<DispatchTeam>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            server: ServerConfig::default(),
            alerts: AlertConfig::default(),
            auth: AuthConfig::default(),
            teams: default_teams(),
        }
    }
}

impl Config {
    /// Reject values the service cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.source.polling_interval_seconds() == 0 {
            return Err(SmartbinError::Config(
                "polling_interval_seconds must be greater than 0".to_string(),
            ));
        }
        if let SourceConfig::Synthetic { max_increment, .. } = &self.source {
            if !max_increment.is_finite() || *max_increment < 0.0 {
                return Err(SmartbinError::Config(format!(
                    "max_increment must be a non-negative number, got {}",
                    max_increment
                )));
            }
        }
        if let SourceConfig::Http { base_url, .. } = &self.source {
            if base_url.trim().is_empty() {
                return Err(SmartbinError::Config("base_url must not be empty".to_string()));
            }
        }
        if self.server.dispatch_history_size > MAX_DISPATCH_HISTORY_SIZE {
            return Err(SmartbinError::Config(format!(
                "dispatch_history_size must be at most {}, got {}",
                MAX_DISPATCH_HISTORY_SIZE, self.server.dispatch_history_size
            )));
        }
        if !(0.0..=MAX_FILL_LEVEL).contains(&self.alerts.threshold) {
            return Err(SmartbinError::Config(format!(
                "alert threshold must be between 0 and 100, got {}",
                self.alerts.threshold
            )));
        }
        if self.auth.password.is_none() && self.auth.password_hash.is_none() {
            return Err(SmartbinError::Config(
                "auth requires either password or password_hash".to_string(),
            ));
        }
        if self.auth.session_ttl_seconds == 0 {
            return Err(SmartbinError::Config(
                "session_ttl_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reading source configuration with tagged enum for extensibility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SourceConfig {
    #[serde(rename = "synthetic")]
    Synthetic {
        #[serde(default = "default_polling_interval")]
        polling_interval_seconds: u64,
        #[serde(default = "default_max_increment")]
        max_increment: f64,
    },
    #[serde(rename = "http")]
    Http {
        base_url: String,
        #[serde(default = "default_polling_interval")]
        polling_interval_seconds: u64,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Synthetic {
            polling_interval_seconds: default_polling_interval(),
            max_increment: default_max_increment(),
        }
    }
}

impl SourceConfig {
    pub fn type_name(&self) -> &str {
        match self {
            SourceConfig::Synthetic { .. } => "synthetic",
            SourceConfig::Http { .. } => "http",
        }
    }

    pub fn polling_interval_seconds(&self) -> u64 {
        match self {
            SourceConfig::Synthetic {
                polling_interval_seconds,
                ..
            }
            | SourceConfig::Http {
                polling_interval_seconds,
                ..
            } => *polling_interval_seconds,
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_history_size")]
    pub dispatch_history_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            dispatch_history_size: default_history_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

/// Login credentials. `password_hash` (Argon2 PHC string) takes precedence
/// over a plain `password`. Sessions expire `session_ttl_seconds` after login.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_hash", &self.password_hash)
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: Some(default_username()),
            password_hash: None,
            session_ttl_seconds: default_session_ttl(),
        }
    }
}

impl AuthConfig {
    /// Build the credential verifier this configuration describes
    pub fn verifier(&self) -> crate::Result<Arc<dyn CredentialVerifier>> {
        match (&self.password_hash, &self.password) {
            (Some(hash), _) => Ok(Arc::new(HashedCredentials::new(&self.username, hash)?)),
            (None, Some(password)) => {
                Ok(Arc::new(StaticCredentials::new(&self.username, password)))
            }
            (None, None) => Err(SmartbinError::Config(
                "auth requires either password or password_hash".to_string(),
            )),
        }
    }
}

fn default_polling_interval() -> u64 {
    5
}

fn default_max_increment() -> f64 {
    DEFAULT_MAX_INCREMENT
}

fn default_port() -> u16 {
    8000
}

fn default_history_size() -> usize {
    100
}

fn default_threshold() -> f64 {
    DEFAULT_ALERT_THRESHOLD
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECONDS
}

fn default_username() -> String {
    "ocemtechies".to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SmartbinError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
