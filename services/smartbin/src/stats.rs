//! Fleet-wide statistics for the overview

use serde::{Deserialize, Serialize};

use crate::aggregator::area_alerts;
use crate::reading::{BinReading, FillStatus};

/// Summed material percentages across all bins
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WasteComposition {
    pub metal: f64,
    pub plastic: f64,
    pub bio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetStats {
    pub total_bins: usize,
    pub critical_bins: usize,
    pub warning_bins: usize,
    pub avg_fill_level: f64,
    pub alert_areas: usize,
    pub composition: WasteComposition,
}

pub fn fleet_stats(readings: &[BinReading], alert_threshold: f64) -> FleetStats {
    let mut critical_bins = 0;
    let mut warning_bins = 0;
    let mut fill_sum = 0.0;
    let mut composition = WasteComposition::default();

    for reading in readings {
        match reading.fill_status() {
            FillStatus::Critical => critical_bins += 1,
            FillStatus::Warning => warning_bins += 1,
            FillStatus::Good => {}
        }
        fill_sum += reading.fill_level;
        composition.metal += reading.metal;
        composition.plastic += reading.plastic;
        composition.bio += reading.bio;
    }

    let avg_fill_level = if readings.is_empty() {
        0.0
    } else {
        fill_sum / readings.len() as f64
    };

    FleetStats {
        total_bins: readings.len(),
        critical_bins,
        warning_bins,
        avg_fill_level,
        alert_areas: area_alerts(readings, alert_threshold).len(),
        composition,
    }
}
