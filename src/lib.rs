//! # Zephyr ControlVault
//!
//! Building-access simulator backend: personnel, zones, attendance and an
//! audit log behind a REST API with a rule-based access check.
//!
//! ## Architecture
//!
//! - **domain**: record types, repository traits and errors
//! - **application**: the access decision engine and dashboard metrics
//! - **infrastructure**: flat-file record store (and an in-memory one)
//! - **api**: REST API with Swagger documentation
//! - **support**: graceful shutdown plumbing

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export storage types for easy access
pub use infrastructure::{FlatFileStore, InMemoryStore};

// Re-export API router
pub use api::create_api_router;
