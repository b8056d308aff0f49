//! Bin sensor readings

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SmartbinError;

/// Fill level at which a bin needs attention
pub const WARNING_FILL_LEVEL: f64 = 60.0;

/// Fill level at which a bin needs collection
pub const CRITICAL_FILL_LEVEL: f64 = 80.0;

pub const MAX_FILL_LEVEL: f64 = 100.0;

/// Geographic position of a bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// One sensor report from a bin. Material percentages are independent
/// and are not required to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinReading {
    pub bin_id: String,
    pub location: Location,
    #[serde(default)]
    pub metal: f64,
    #[serde(default)]
    pub plastic: f64,
    #[serde(default)]
    pub bio: f64,
    pub fill_level: f64,
    #[serde(default)]
    pub battery_level: Option<f64>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub address: String,
}

impl BinReading {
    pub fn fill_status(&self) -> FillStatus {
        FillStatus::from_level(self.fill_level)
    }

    /// Reject readings a sensor could not have produced
    pub fn validate(&self) -> crate::Result<()> {
        if self.bin_id.trim().is_empty() {
            return Err(SmartbinError::Validation(
                "Reading has an empty bin_id".to_string(),
            ));
        }
        if !self.fill_level.is_finite() || !(0.0..=MAX_FILL_LEVEL).contains(&self.fill_level) {
            return Err(SmartbinError::Validation(format!(
                "Bin {} has fill level {} outside 0-100",
                self.bin_id, self.fill_level
            )));
        }
        if !self.location.lat.is_finite() || !self.location.lng.is_finite() {
            return Err(SmartbinError::Validation(format!(
                "Bin {} has a non-numeric location",
                self.bin_id
            )));
        }
        Ok(())
    }
}

/// Coarse fill classification shown next to each bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStatus {
    Good,
    Warning,
    Critical,
}

impl FillStatus {
    pub fn from_level(fill_level: f64) -> Self {
        if fill_level >= CRITICAL_FILL_LEVEL {
            FillStatus::Critical
        } else if fill_level >= WARNING_FILL_LEVEL {
            FillStatus::Warning
        } else {
            FillStatus::Good
        }
    }
}

impl fmt::Display for FillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStatus::Good => write!(f, "Good"),
            FillStatus::Warning => write!(f, "Warning"),
            FillStatus::Critical => write!(f, "Critical"),
        }
    }
}

/// A reading as served to API clients, with its derived status
#[derive(Debug, Clone, Serialize)]
pub struct BinView {
    #[serde(flatten)]
    pub reading: BinReading,
    pub fill_status: FillStatus,
}

impl From<BinReading> for BinView {
    fn from(reading: BinReading) -> Self {
        let fill_status = reading.fill_status();
        Self {
            reading,
            fill_status,
        }
    }
}
