//! BDD step definitions for area alerts

use chrono::Utc;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use smartbin::aggregator::area_alerts;
use smartbin::reading::{BinReading, Location};
use smartbin::synthetic::demo_fleet;

use crate::world::SmartbinWorld;

fn parse_f64(cell: &str) -> f64 {
    cell.trim()
        .parse()
        .unwrap_or_else(|_| panic!("not a number: {cell}"))
}

#[given("the following bins:")]
fn bins_from_table(world: &mut SmartbinWorld, step: &Step) {
    let table = step.table.as_ref().expect("bins table missing");
    let header = &table.rows[0];
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .unwrap_or_else(|| panic!("missing column {name}"))
    };
    let (id, area, fill, lat, lng) = (
        column("bin_id"),
        column("area"),
        column("fill_level"),
        column("lat"),
        column("lng"),
    );

    world.readings = table.rows[1..]
        .iter()
        .map(|row| BinReading {
            bin_id: row[id].clone(),
            location: Location {
                lat: parse_f64(&row[lat]),
                lng: parse_f64(&row[lng]),
            },
            metal: 0.0,
            plastic: 0.0,
            bio: 0.0,
            fill_level: parse_f64(&row[fill]),
            battery_level: None,
            timestamp: Utc::now(),
            area: row[area].clone(),
            address: String::new(),
        })
        .collect();
}

#[given("no bins")]
fn no_bins(world: &mut SmartbinWorld) {
    world.readings.clear();
}

#[given("the demo fleet")]
fn the_demo_fleet(world: &mut SmartbinWorld) {
    world.readings = demo_fleet();
}

#[when(expr = "area alerts are computed with threshold {float}")]
fn compute_alerts(world: &mut SmartbinWorld, threshold: f64) {
    world.alerts = Some(area_alerts(&world.readings, threshold));
}

#[then(expr = "there should be {int} alert area(s)")]
fn alert_count(world: &mut SmartbinWorld, expected: usize) {
    assert_eq!(world.alerts().len(), expected);
}

#[then(expr = "alert {int} should be area {string} with average {float} over {int} bins")]
fn alert_details(
    world: &mut SmartbinWorld,
    index: usize,
    area: String,
    average: f64,
    bin_count: usize,
) {
    let alert = &world.alerts()[index - 1];
    assert_eq!(alert.area, area);
    assert!(
        (alert.avg_fill_level - average).abs() < 1e-9,
        "expected average {average}, got {}",
        alert.avg_fill_level
    );
    assert_eq!(alert.bin_count, bin_count);
}

#[then(expr = "alert {int} should be centered at {float}, {float}")]
fn alert_center(world: &mut SmartbinWorld, index: usize, lat: f64, lng: f64) {
    let center = world.alerts()[index - 1].center_location;
    assert!((center.lat - lat).abs() < 1e-9, "lat {}", center.lat);
    assert!((center.lng - lng).abs() < 1e-9, "lng {}", center.lng);
}

#[then(expr = "the alert areas should be {string}")]
fn alert_order(world: &mut SmartbinWorld, expected: String) {
    let actual: Vec<&str> = world.alerts().iter().map(|a| a.area.as_str()).collect();
    let expected: Vec<&str> = expected.split(',').map(str::trim).collect();
    assert_eq!(actual, expected);
}
