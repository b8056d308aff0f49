//! Dispatch selection: pairing an available team with an alerting area.
//! Orders are recorded only; nothing is sent to the crew.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator::AreaSummary;
use crate::error::SmartbinError;
use crate::teams::{Roster, TeamStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub team_id: String,
    pub area: String,
}

/// A recorded decision to send a team to an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOrder {
    pub team_id: String,
    pub team_name: String,
    pub area: String,
    pub bin_count: usize,
    pub avg_fill_level: f64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Validate a request against the roster and the current alert list
pub fn plan_dispatch(
    roster: &Roster,
    alerts: &[AreaSummary],
    request: &DispatchRequest,
    now: DateTime<Utc>,
) -> crate::Result<DispatchOrder> {
    let team = roster.find(&request.team_id)?;
    if team.status != TeamStatus::Available {
        return Err(SmartbinError::Validation(format!(
            "Team '{}' is {} and cannot be dispatched",
            team.id, team.status
        )));
    }

    let summary = alerts
        .iter()
        .find(|a| a.area == request.area)
        .ok_or_else(|| {
            SmartbinError::NotFound(format!(
                "Area '{}' has no active collection alert",
                request.area
            ))
        })?;

    Ok(DispatchOrder {
        team_id: team.id.clone(),
        team_name: team.name.clone(),
        area: summary.area.clone(),
        bin_count: summary.bin_count,
        avg_fill_level: summary.avg_fill_level,
        message: format!(
            "Dispatching team {} to {} area ({} bins)",
            team.id, summary.area, summary.bin_count
        ),
        timestamp: now,
    })
}
