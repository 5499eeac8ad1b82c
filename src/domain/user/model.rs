//! Personnel domain entity

use std::fmt;

use serde::{Deserialize, Serialize};

/// Personnel role driving the access rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Employee,
    Visitor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Employee => write!(f, "EMPLOYEE"),
            Self::Visitor => write!(f, "VISITOR"),
        }
    }
}

impl Role {
    /// Parse a stored role field. Unknown roles are `None`, which makes the
    /// whole record line malformed.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "EMPLOYEE" => Some(Self::Employee),
            "VISITOR" => Some(Self::Visitor),
            _ => None,
        }
    }
}

/// A person known to the building-access system.
///
/// The password is stored in plain text in the backing file; the simulator
/// performs no real authentication.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Remaining visitor badge validity; 0 for records created via the API
    pub badge_count: Option<i32>,
}

impl User {
    /// Audit-trail label in the `[ROLE] username (ID: id)` form.
    pub fn label(&self) -> String {
        format!("[{}] {} (ID: {})", self.role, self.username, self.id)
    }
}
