//! BDD step definitions for team dispatch

use chrono::Utc;
use cucumber::{given, then, when};
use smartbin::aggregator::{area_alerts, DEFAULT_ALERT_THRESHOLD};
use smartbin::dispatch::{plan_dispatch, DispatchRequest};
use smartbin::teams::{Roster, TeamStatus};

use crate::world::SmartbinWorld;

fn roster(world: &SmartbinWorld) -> &Roster {
    world.roster.as_ref().expect("roster not set")
}

#[given("the default team roster")]
fn default_roster(world: &mut SmartbinWorld) {
    world.roster = Some(Roster::default());
}

#[when(expr = "team {string} is dispatched to {string}")]
fn dispatch(world: &mut SmartbinWorld, team_id: String, area: String) {
    let alerts = area_alerts(&world.readings, DEFAULT_ALERT_THRESHOLD);
    let request = DispatchRequest { team_id, area };
    let result = plan_dispatch(roster(world), &alerts, &request, Utc::now());
    world.dispatch_result = Some(result);
}

#[then(expr = "the dispatch should succeed with message {string}")]
fn dispatch_succeeded(world: &mut SmartbinWorld, message: String) {
    match world.dispatch_result.as_ref().expect("no dispatch attempted") {
        Ok(order) => assert_eq!(order.message, message),
        Err(e) => panic!("expected success, got {e}"),
    }
}

#[then(expr = "the dispatch should fail as {string}")]
fn dispatch_failed(world: &mut SmartbinWorld, kind: String) {
    match world.dispatch_result.as_ref().expect("no dispatch attempted") {
        Ok(order) => panic!("expected failure, got order: {}", order.message),
        Err(e) => assert_eq!(e.kind(), kind, "{e}"),
    }
}

#[then(expr = "{int} team(s) should be available")]
fn available_teams(world: &mut SmartbinWorld, expected: usize) {
    assert_eq!(roster(world).with_status(TeamStatus::Available).len(), expected);
}

#[then(expr = "{int} team(s) should be busy")]
fn busy_teams(world: &mut SmartbinWorld, expected: usize) {
    assert_eq!(roster(world).with_status(TeamStatus::Busy).len(), expected);
}
