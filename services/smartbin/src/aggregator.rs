//! Area aggregation: which areas need a collection team

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reading::{BinReading, Location};

/// Mean fill level at which an area is put on the alert list
pub const DEFAULT_ALERT_THRESHOLD: f64 = 60.0;

/// Bins of one area with their mean fill level and centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
    pub area: String,
    pub bins: Vec<BinReading>,
    pub bin_count: usize,
    pub avg_fill_level: f64,
    pub center_location: Location,
}

#[derive(Default)]
struct Accumulator {
    bins: Vec<BinReading>,
    fill_sum: f64,
    lat_sum: f64,
    lng_sum: f64,
}

/// Areas whose mean fill level is at least `threshold`, fullest first.
///
/// Areas with equal means are ordered alphabetically.
pub fn area_alerts(readings: &[BinReading], threshold: f64) -> Vec<AreaSummary> {
    let mut alerts: Vec<AreaSummary> = summarize_areas(readings)
        .into_iter()
        .filter(|summary| summary.avg_fill_level >= threshold)
        .collect();

    // Stable sort over alphabetical input keeps ties in name order
    alerts.sort_by(|a, b| b.avg_fill_level.total_cmp(&a.avg_fill_level));
    alerts
}

/// One summary per distinct area, in alphabetical order
pub fn summarize_areas(readings: &[BinReading]) -> Vec<AreaSummary> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for reading in readings {
        let acc = groups.entry(reading.area.as_str()).or_default();
        acc.fill_sum += reading.fill_level;
        acc.lat_sum += reading.location.lat;
        acc.lng_sum += reading.location.lng;
        acc.bins.push(reading.clone());
    }

    groups
        .into_iter()
        .map(|(area, acc)| {
            // Every group holds at least one bin
            let count = acc.bins.len() as f64;
            AreaSummary {
                area: area.to_string(),
                bin_count: acc.bins.len(),
                avg_fill_level: acc.fill_sum / count,
                center_location: Location {
                    lat: acc.lat_sum / count,
                    lng: acc.lng_sum / count,
                },
                bins: acc.bins,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bin(id: &str, area: &str, fill_level: f64, lat: f64, lng: f64) -> BinReading {
        BinReading {
            bin_id: id.to_string(),
            location: Location { lat, lng },
            metal: 0.0,
            plastic: 0.0,
            bio: 0.0,
            fill_level,
            battery_level: None,
            timestamp: Utc::now(),
            area: area.to_string(),
            address: String::new(),
        }
    }

    #[test]
    fn two_bins_in_one_area_average() {
        let readings = vec![
            bin("b1", "A", 90.0, 27.0, 84.0),
            bin("b2", "A", 70.0, 28.0, 85.0),
        ];
        let alerts = area_alerts(&readings, DEFAULT_ALERT_THRESHOLD);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].area, "A");
        assert_eq!(alerts[0].avg_fill_level, 80.0);
        assert_eq!(alerts[0].bin_count, 2);
        assert_eq!(alerts[0].center_location, Location { lat: 27.5, lng: 84.5 });
    }

    #[test]
    fn all_below_threshold_yields_nothing() {
        let readings = vec![
            bin("b1", "A", 10.0, 0.0, 0.0),
            bin("b2", "B", 59.9, 0.0, 0.0),
        ];
        assert!(area_alerts(&readings, DEFAULT_ALERT_THRESHOLD).is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(area_alerts(&[], DEFAULT_ALERT_THRESHOLD).is_empty());
        assert!(summarize_areas(&[]).is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        let readings = vec![bin("b1", "A", 60.0, 0.0, 0.0)];
        assert_eq!(area_alerts(&readings, 60.0).len(), 1);
    }

    #[test]
    fn sorted_fullest_first() {
        let readings = vec![
            bin("b1", "Lakeside", 65.0, 0.0, 0.0),
            bin("b2", "Mahendrapul", 92.0, 0.0, 0.0),
            bin("b3", "City Center", 75.0, 0.0, 0.0),
            bin("b4", "Birauta", 30.0, 0.0, 0.0),
        ];
        let areas: Vec<String> = area_alerts(&readings, DEFAULT_ALERT_THRESHOLD)
            .into_iter()
            .map(|a| a.area)
            .collect();
        assert_eq!(areas, vec!["Mahendrapul", "City Center", "Lakeside"]);
    }

    #[test]
    fn ties_break_alphabetically() {
        let readings = vec![
            bin("b1", "Zeta", 70.0, 0.0, 0.0),
            bin("b2", "Alpha", 70.0, 0.0, 0.0),
            bin("b3", "Mid", 70.0, 0.0, 0.0),
        ];
        let areas: Vec<String> = area_alerts(&readings, DEFAULT_ALERT_THRESHOLD)
            .into_iter()
            .map(|a| a.area)
            .collect();
        assert_eq!(areas, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn area_below_threshold_is_dropped_even_with_one_full_bin() {
        let readings = vec![
            bin("b1", "Lakeside", 95.0, 0.0, 0.0),
            bin("b2", "Lakeside", 10.0, 0.0, 0.0),
        ];
        assert!(area_alerts(&readings, DEFAULT_ALERT_THRESHOLD).is_empty());
    }

    #[test]
    fn summaries_keep_bins_in_encounter_order() {
        let readings = vec![
            bin("b2", "A", 90.0, 0.0, 0.0),
            bin("b1", "A", 70.0, 0.0, 0.0),
        ];
        let summaries = summarize_areas(&readings);
        let ids: Vec<&str> = summaries[0].bins.iter().map(|b| b.bin_id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "b1"]);
    }
}
