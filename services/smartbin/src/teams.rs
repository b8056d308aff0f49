//! Dispatch team roster

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SmartbinError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    Available,
    Busy,
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamStatus::Available => write!(f, "available"),
            TeamStatus::Busy => write!(f, "busy"),
        }
    }
}

/// A collection crew and its vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchTeam {
    pub id: String,
    pub name: String,
    pub members: u32,
    pub vehicle: String,
    pub status: TeamStatus,
    pub current_location: String,
    pub rating: f64,
    pub completed_jobs: u32,
}

/// Read-only set of teams
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    teams: Vec<DispatchTeam>,
}

impl Roster {
    pub fn new(teams: Vec<DispatchTeam>) -> Self {
        Self { teams }
    }

    pub fn all(&self) -> &[DispatchTeam] {
        &self.teams
    }

    pub fn with_status(&self, status: TeamStatus) -> Vec<&DispatchTeam> {
        self.teams.iter().filter(|t| t.status == status).collect()
    }

    pub fn find(&self, id: &str) -> crate::Result<&DispatchTeam> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SmartbinError::NotFound(format!("Team '{}' not found", id)))
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(default_teams())
    }
}

pub fn default_teams() -> Vec<DispatchTeam> {
    vec![
        team(
            "TEAM001",
            "Alpha Collection Team",
            4,
            "Truck-12",
            TeamStatus::Available,
            "Pokhara Central",
            4.8,
            127,
        ),
        team(
            "TEAM002",
            "Beta Collection Team",
            3,
            "Truck-15",
            TeamStatus::Available,
            "Lakeside Area",
            4.6,
            98,
        ),
        team(
            "TEAM003",
            "Gamma Collection Team",
            5,
            "Truck-08",
            TeamStatus::Available,
            "Mahendrapul",
            4.9,
            156,
        ),
        team(
            "TEAM004",
            "Delta Collection Team",
            4,
            "Truck-22",
            TeamStatus::Busy,
            "Birauta",
            4.7,
            112,
        ),
        team(
            "TEAM005",
            "Epsilon Collection Team",
            3,
            "Truck-19",
            TeamStatus::Available,
            "Prithvi Chowk",
            4.5,
            89,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn team(
    id: &str,
    name: &str,
    members: u32,
    vehicle: &str,
    status: TeamStatus,
    current_location: &str,
    rating: f64,
    completed_jobs: u32,
) -> DispatchTeam {
    DispatchTeam {
        id: id.to_string(),
        name: name.to_string(),
        members,
        vehicle: vehicle.to_string(),
        status,
        current_location: current_location.to_string(),
        rating,
        completed_jobs,
    }
}
