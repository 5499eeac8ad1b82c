//! Attendance domain entity

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceAction {
    CheckIn,
    CheckOut,
}

impl fmt::Display for AttendanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckIn => write!(f, "CHECK_IN"),
            Self::CheckOut => write!(f, "CHECK_OUT"),
        }
    }
}

impl AttendanceAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CHECK_IN" => Some(Self::CheckIn),
            "CHECK_OUT" => Some(Self::CheckOut),
            _ => None,
        }
    }
}

/// One check-in/check-out event.
///
/// Timestamps are carried as opaque strings exactly as stored; presence is
/// derived from record order, never from parsing these.
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub timestamp: String,
    pub user_id: String,
    pub username: String,
    pub action: AttendanceAction,
}
