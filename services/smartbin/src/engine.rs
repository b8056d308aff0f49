//! Engine: polls the reading source into the shared store

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::source::ReadingSource;
use crate::state::StateHandle;

const CONSECUTIVE_ERROR_WARNING: u32 = 5;

/// Periodically refreshes the bin reading store
pub struct Engine {
    source: Arc<dyn ReadingSource>,
    state: StateHandle,
    interval: Duration,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        source: Arc<dyn ReadingSource>,
        state: StateHandle,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            state,
            interval,
            cancel,
        }
    }

    /// Poll until the cancellation token is triggered
    pub async fn run(&self) {
        tracing::info!(
            "Polling '{}' every {:?}",
            self.source.name(),
            self.interval
        );

        loop {
            refresh(self.source.as_ref(), &self.state, current_epoch_ms()).await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop for '{}' cancelled", self.source.name());
                    break;
                }
            }
        }
    }
}

/// Fetch once and apply the result to the store. Returns true on success.
pub async fn refresh(source: &dyn ReadingSource, state: &StateHandle, now_ms: u64) -> bool {
    match source.fetch_readings().await {
        Ok(readings) => {
            let count = readings.len();
            state.write().await.replace_readings(readings, now_ms);
            tracing::debug!("Poll '{}': {} readings", source.name(), count);
            true
        }
        Err(e) => {
            let errors = state.write().await.record_failure(&e.to_string(), now_ms);
            if errors == CONSECUTIVE_ERROR_WARNING {
                tracing::warn!(
                    "Source '{}' has {} consecutive errors: {}",
                    source.name(),
                    errors,
                    e
                );
            } else {
                tracing::debug!("Poll '{}' failed: {}", source.name(), e);
            }
            false
        }
    }
}

pub(crate) fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
