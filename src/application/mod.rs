pub mod services;

pub use services::{AccessDecision, AccessService, DashboardStats, SecurityLevel, StatsService};
