//! BDD step definitions for smartbin service

pub mod aggregator_steps;
pub mod auth_steps;
pub mod dispatch_steps;
pub mod synthetic_steps;
