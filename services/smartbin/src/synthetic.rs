//! Synthetic reading source
//!
//! Stands in for real telemetry: starts from a fixed fleet of demo bins and,
//! on every fetch after the first, raises each bin's fill level by a random
//! amount below `max_increment`, clamped to 100.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::reading::{BinReading, Location, MAX_FILL_LEVEL};
use crate::source::ReadingSource;

pub const DEFAULT_MAX_INCREMENT: f64 = 2.0;

#[derive(Debug)]
struct Fleet {
    readings: Vec<BinReading>,
    rng: StdRng,
    fetched: bool,
}

/// Reading source that simulates slowly filling bins
#[derive(Debug)]
pub struct SyntheticSource {
    fleet: Mutex<Fleet>,
    max_increment: f64,
}

impl SyntheticSource {
    pub fn new(seed: Vec<BinReading>, max_increment: f64) -> Self {
        Self::with_rng(seed, max_increment, StdRng::from_entropy())
    }

    /// Deterministic variant for tests
    pub fn seeded(seed: Vec<BinReading>, max_increment: f64, rng_seed: u64) -> Self {
        Self::with_rng(seed, max_increment, StdRng::seed_from_u64(rng_seed))
    }

    fn with_rng(seed: Vec<BinReading>, max_increment: f64, rng: StdRng) -> Self {
        tracing::debug!(
            "Created synthetic source with {} bins, max increment {}",
            seed.len(),
            max_increment
        );
        Self {
            fleet: Mutex::new(Fleet {
                readings: seed,
                rng,
                fetched: false,
            }),
            max_increment,
        }
    }
}

#[async_trait]
impl ReadingSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn fetch_readings(&self) -> crate::Result<Vec<BinReading>> {
        let mut fleet = self.fleet.lock().await;
        if fleet.fetched {
            let Fleet { readings, rng, .. } = &mut *fleet;
            tick(readings, rng, self.max_increment, Utc::now());
        } else {
            fleet.fetched = true;
        }
        Ok(fleet.readings.clone())
    }
}

/// Advance every reading by one simulated interval
pub fn tick<R: Rng>(
    readings: &mut [BinReading],
    rng: &mut R,
    max_increment: f64,
    now: DateTime<Utc>,
) {
    for reading in readings.iter_mut() {
        let increment = if max_increment > 0.0 {
            rng.gen_range(0.0..max_increment)
        } else {
            0.0
        };
        reading.fill_level = (reading.fill_level + increment).min(MAX_FILL_LEVEL);
        reading.timestamp = now;
    }
}

/// The eight demo bins around Pokhara
pub fn demo_fleet() -> Vec<BinReading> {
    vec![
        demo_bin(
            "CHT001",
            (27.678, 84.432),
            (35.0, 55.0, 20.0),
            75.0,
            20,
            "Pokhara City Center",
            "City Center",
        ),
        demo_bin(
            "CHT002",
            (27.685, 84.425),
            (45.0, 30.0, 25.0),
            92.0,
            18,
            "Mahendrapul Area",
            "Mahendrapul",
        ),
        demo_bin(
            "CHT003",
            (27.672, 84.44),
            (20.0, 40.0, 40.0),
            45.0,
            22,
            "Lakeside Road",
            "Lakeside",
        ),
        demo_bin(
            "CHT004",
            (27.69, 84.435),
            (30.0, 45.0, 25.0),
            68.0,
            19,
            "Prithvi Chowk",
            "Prithvi Chowk",
        ),
        demo_bin(
            "CHT005",
            (27.665, 84.428),
            (15.0, 35.0, 50.0),
            30.0,
            21,
            "Birauta",
            "Birauta",
        ),
        demo_bin(
            "CHT006",
            (27.68, 84.43),
            (40.0, 50.0, 10.0),
            85.0,
            17,
            "Pokhara City Center - North",
            "City Center",
        ),
        demo_bin(
            "CHT007",
            (27.687, 84.428),
            (35.0, 40.0, 25.0),
            78.0,
            16,
            "Mahendrapul - East",
            "Mahendrapul",
        ),
        demo_bin(
            "CHT008",
            (27.675, 84.442),
            (25.0, 35.0, 40.0),
            55.0,
            23,
            "Lakeside - South",
            "Lakeside",
        ),
    ]
}

fn demo_bin(
    bin_id: &str,
    (lat, lng): (f64, f64),
    (metal, plastic, bio): (f64, f64, f64),
    fill_level: f64,
    minute: u32,
    address: &str,
    area: &str,
) -> BinReading {
    let timestamp = Utc
        .with_ymd_and_hms(2025, 11, 6, 10, minute, 0)
        .single()
        .unwrap_or_else(Utc::now);
    BinReading {
        bin_id: bin_id.to_string(),
        location: Location { lat, lng },
        metal,
        plastic,
        bio,
        fill_level,
        battery_level: None,
        timestamp,
        area: area.to_string(),
        address: address.to_string(),
    }
}
