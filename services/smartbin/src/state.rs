//! Shared state: the bin reading store, source health and dispatch history

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::dispatch::DispatchOrder;
use crate::reading::BinReading;

/// Health of the reading source as seen by the poller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub name: String,
    pub last_poll_epoch_ms: u64,
    pub last_success_epoch_ms: Option<u64>,
    pub consecutive_errors: u32,
    pub last_error: Option<String>,
}

/// Shared state accessible by the poller and the API
#[derive(Debug)]
pub struct SharedState {
    pub readings: Vec<BinReading>,
    pub source: SourceStatus,
    pub dispatches: VecDeque<DispatchOrder>,
    pub dispatch_history_max_size: usize,
    pub started_at: Instant,
}

impl SharedState {
    pub fn new(source_name: &str, dispatch_history_max_size: usize) -> Self {
        Self {
            readings: Vec::new(),
            source: SourceStatus {
                name: source_name.to_string(),
                last_poll_epoch_ms: 0,
                last_success_epoch_ms: None,
                consecutive_errors: 0,
                last_error: None,
            },
            dispatches: VecDeque::new(),
            dispatch_history_max_size,
            started_at: Instant::now(),
        }
    }

    /// Swap in a fresh set of readings after a successful poll
    pub fn replace_readings(&mut self, readings: Vec<BinReading>, now_ms: u64) {
        self.readings = readings;
        self.source.last_poll_epoch_ms = now_ms;
        self.source.last_success_epoch_ms = Some(now_ms);
        self.source.consecutive_errors = 0;
        self.source.last_error = None;
    }

    /// Store a reading pushed by a collector, replacing any reading for the
    /// same bin. Returns true if the bin was not known before.
    pub fn upsert_reading(&mut self, reading: BinReading) -> bool {
        match self
            .readings
            .iter_mut()
            .find(|r| r.bin_id == reading.bin_id)
        {
            Some(existing) => {
                *existing = reading;
                false
            }
            None => {
                self.readings.push(reading);
                true
            }
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Note a failed poll, keeping the last good readings. Returns the
    /// number of consecutive failures.
    pub fn record_failure(&mut self, error: &str, now_ms: u64) -> u32 {
        self.source.last_poll_epoch_ms = now_ms;
        self.source.consecutive_errors += 1;
        self.source.last_error = Some(error.to_string());
        self.source.consecutive_errors
    }

    pub fn add_dispatch(&mut self, order: DispatchOrder) {
        if self.dispatch_history_max_size == 0 {
            return;
        }
        if self.dispatches.len() >= self.dispatch_history_max_size {
            self.dispatches.pop_front();
        }
        self.dispatches.push_back(order);
    }
}

/// Thread-safe shared state handle
pub type StateHandle = Arc<RwLock<SharedState>>;

pub fn new_state_handle(source_name: &str, dispatch_history_max_size: usize) -> StateHandle {
    Arc::new(RwLock::new(SharedState::new(
        source_name,
        dispatch_history_max_size,
    )))
}
