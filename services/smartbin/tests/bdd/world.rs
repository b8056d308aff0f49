//! BDD test world for smartbin service

use cucumber::World;
use smartbin::aggregator::AreaSummary;
use smartbin::dispatch::DispatchOrder;
use smartbin::reading::BinReading;
use smartbin::synthetic::SyntheticSource;
use smartbin::teams::Roster;
use sw_auth::{AuthGate, Session};

#[derive(Debug, Default, World)]
pub struct SmartbinWorld {
    // Aggregation
    pub readings: Vec<BinReading>,
    pub alerts: Option<Vec<AreaSummary>>,

    // Auth
    pub gate: Option<AuthGate>,
    pub login_result: Option<sw_auth::Result<Session>>,

    // Dispatch
    pub roster: Option<Roster>,
    pub dispatch_result: Option<smartbin::Result<DispatchOrder>>,

    // Synthetic source
    pub source: Option<SyntheticSource>,
    pub snapshots: Vec<Vec<BinReading>>,
}

impl SmartbinWorld {
    pub fn alerts(&self) -> &[AreaSummary] {
        self.alerts.as_deref().expect("alerts not computed")
    }
}
