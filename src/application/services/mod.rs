//! Business logic services

mod access;
mod stats;

pub use access::{AccessDecision, AccessService};
pub use stats::{DashboardStats, SecurityLevel, StatsService};
