//! BDD step definitions for the synthetic reading source

use cucumber::{given, then, when};
use smartbin::source::ReadingSource;
use smartbin::synthetic::{demo_fleet, SyntheticSource};

use crate::world::SmartbinWorld;

const RNG_SEED: u64 = 2025;

#[given(expr = "a synthetic source over the demo fleet with max increment {float}")]
fn synthetic_source(world: &mut SmartbinWorld, max_increment: f64) {
    world.source = Some(SyntheticSource::seeded(demo_fleet(), max_increment, RNG_SEED));
}

#[given(
    expr = "a synthetic source over the demo fleet with every bin at {float} and max increment {float}"
)]
fn nearly_full_source(world: &mut SmartbinWorld, fill_level: f64, max_increment: f64) {
    let mut fleet = demo_fleet();
    for bin in &mut fleet {
        bin.fill_level = fill_level;
    }
    world.source = Some(SyntheticSource::seeded(fleet, max_increment, RNG_SEED));
}

#[when(expr = "the source is fetched {int} times")]
async fn fetch_times(world: &mut SmartbinWorld, times: usize) {
    let source = world.source.as_ref().expect("source not set");
    let mut snapshots = Vec::with_capacity(times);
    for _ in 0..times {
        snapshots.push(source.fetch_readings().await.expect("synthetic fetch failed"));
    }
    world.snapshots = snapshots;
}

#[then("no fill level should ever decrease")]
fn never_decreases(world: &mut SmartbinWorld) {
    for pair in world.snapshots.windows(2) {
        for (after, before) in pair[1].iter().zip(pair[0].iter()) {
            assert!(
                after.fill_level >= before.fill_level,
                "{} went from {} to {}",
                after.bin_id,
                before.fill_level,
                after.fill_level
            );
        }
    }
}

#[then("every fill level should be at most 100")]
fn capped(world: &mut SmartbinWorld) {
    assert!(!world.snapshots.is_empty());
    for snapshot in &world.snapshots {
        assert!(snapshot.iter().all(|r| r.fill_level <= 100.0));
    }
}
