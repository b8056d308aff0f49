//! Smartbin - waste-bin monitoring and dispatch service
//!
//! Polls bin fill readings from a source, ranks areas that need collection,
//! and serves readings, alerts and the dispatch roster over an HTTP API.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod http_source;
pub mod io;
pub mod reading;
pub mod source;
pub mod state;
pub mod stats;
pub mod synthetic;
pub mod teams;

pub use config::{load_config, Config};
pub use error::{Result, SmartbinError};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sw_auth::AuthGate;
use tokio_util::sync::CancellationToken;

use crate::api::ApiState;
use crate::config::SourceConfig;
use crate::engine::Engine;
use crate::http_source::HttpSource;
use crate::io::ReqwestHttpClient;
use crate::source::ReadingSource;
use crate::synthetic::{demo_fleet, SyntheticSource};
use crate::teams::Roster;

/// Build the reading source a configuration describes
pub fn build_source(config: &SourceConfig) -> Arc<dyn ReadingSource> {
    match config {
        SourceConfig::Synthetic { max_increment, .. } => {
            Arc::new(SyntheticSource::new(demo_fleet(), *max_increment))
        }
        SourceConfig::Http { base_url, .. } => {
            Arc::new(HttpSource::new(base_url, Arc::new(ReqwestHttpClient::new())))
        }
    }
}

/// Run the smartbin service with the given configuration
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let cancel = CancellationToken::new();
    let source = build_source(&config.source);
    let state = state::new_state_handle(source.name(), config.server.dispatch_history_size);

    let api = ApiState {
        state: Arc::clone(&state),
        auth: Arc::new(AuthGate::with_session_ttl(
            config.auth.verifier()?,
            config.auth.session_ttl_seconds,
        )),
        roster: Arc::new(Roster::new(config.teams.clone())),
        alert_threshold: config.alerts.threshold,
    };

    let engine = Engine::new(
        source,
        state,
        Duration::from_secs(config.source.polling_interval_seconds()),
        cancel.clone(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        SmartbinError::Config(format!("Failed to bind API to {}: {}", addr, e))
    })?;
    tracing::info!("API listening on http://{}", addr);

    let engine_handle = tokio::spawn(async move { engine.run().await });

    let cancel_for_api = cancel.clone();
    let served = axum::serve(listener, api::build_router(api))
        .with_graceful_shutdown(async move {
            cancel_for_api.cancelled().await;
        })
        .await;

    // Stop the poller whichever way the server ended
    cancel.cancel();
    if let Err(e) = engine_handle.await {
        tracing::warn!("Polling task ended abnormally: {}", e);
    }
    tracing::info!("Smartbin service stopped");

    served?;
    Ok(())
}
