//! Access decision engine
//!
//! Decides whether a user may enter a zone right now and records the
//! outcome in the audit log. The rules form a strict first-match-wins
//! sequence; the per-zone table is intentionally hardcoded.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    DomainError, DomainResult, LogLevel, RepositoryProvider, Role, ZoneStatus,
};

/// Outcome of a badge-swipe check
#[derive(Debug, Clone)]
pub struct AccessDecision {
    pub granted: bool,
    /// `Access Granted` or `Access Denied: <reason>`
    pub message: String,
    pub role: Role,
    pub zone: String,
}

enum Verdict {
    Granted,
    Denied(&'static str),
}

/// Rule table: role + zone name + zone status, first match wins.
///
/// Pure so the rules are testable without any store.
fn evaluate(role: Role, zone_name: &str, status: ZoneStatus) -> Verdict {
    // Rule 1: master override, bypasses locks
    if role == Role::Admin {
        return Verdict::Granted;
    }
    // Rule 2: lockdown. An UNKNOWN status (zone missing from the store)
    // is not LOCKED and falls through to the name rules.
    if status == ZoneStatus::Locked {
        return Verdict::Denied("Zone is LOCKED");
    }
    // Rule 3: role-specific access by zone name
    match zone_name {
        "SERVER_ROOM" => Verdict::Denied("Restricted Content"),
        "LAB" => {
            if role == Role::Employee {
                Verdict::Granted
            } else {
                Verdict::Denied("Authorized Personnel Only")
            }
        }
        "OFFICE_FLOOR" => {
            if role == Role::Employee {
                Verdict::Granted
            } else {
                Verdict::Denied("Employees Only")
            }
        }
        "LOBBY" => Verdict::Granted,
        _ => Verdict::Denied("Unknown Zone"),
    }
}

/// Rule-based access checks with audit logging
pub struct AccessService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AccessService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Run the access rules for `user_id` against `zone_name`.
    ///
    /// An unknown user yields `DomainError::UserNotFound` and leaves the
    /// audit log untouched. Every decided invocation appends exactly one
    /// audit line: INFO on grant, WARN on deny.
    pub async fn decide(&self, user_id: &str, zone_name: &str) -> DomainResult<AccessDecision> {
        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound {
                id: user_id.to_string(),
            })?;
        let status = self.repos.zones().status_of(zone_name).await?;
        debug!(user = %user.id, zone = zone_name, %status, "evaluating access");

        match evaluate(user.role, zone_name, status) {
            Verdict::Granted => {
                self.repos
                    .audit()
                    .append(
                        LogLevel::Info,
                        &format!("{} accessed {}", user.label(), zone_name),
                    )
                    .await?;
                Ok(AccessDecision {
                    granted: true,
                    message: "Access Granted".to_string(),
                    role: user.role,
                    zone: zone_name.to_string(),
                })
            }
            Verdict::Denied(reason) => {
                self.repos
                    .audit()
                    .append(
                        LogLevel::Warn,
                        &format!(
                            "{} denied access to {} ({})",
                            user.label(),
                            zone_name,
                            reason
                        ),
                    )
                    .await?;
                Ok(AccessDecision {
                    granted: false,
                    message: format!("Access Denied: {reason}"),
                    role: user.role,
                    zone: zone_name.to_string(),
                })
            }
        }
    }
}
