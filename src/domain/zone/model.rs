//! Zone domain entity

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lock status of a zone.
///
/// `Unknown` is synthetic: it is what a lookup reports for a zone that has
/// no row in the zone store (or a row with an unrecognized status field).
/// It is NOT the same as `Locked`: the access rules treat an unknown
/// status like an unlocked zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneStatus {
    Locked,
    Unlocked,
    Restricted,
    Unknown,
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked => write!(f, "LOCKED"),
            Self::Unlocked => write!(f, "UNLOCKED"),
            Self::Restricted => write!(f, "RESTRICTED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl From<&str> for ZoneStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "LOCKED" => Self::Locked,
            "UNLOCKED" => Self::Unlocked,
            "RESTRICTED" => Self::Restricted,
            _ => Self::Unknown,
        }
    }
}

impl ZoneStatus {
    /// Strict parse for API input: `Unknown` is not an accepted value,
    /// it can only arise from a lookup miss.
    pub fn parse(s: &str) -> Option<Self> {
        match Self::from(s) {
            Self::Unknown => None,
            status => Some(status),
        }
    }
}

/// A named physical area with a lock status
#[derive(Debug, Clone)]
pub struct Zone {
    pub name: String,
    pub status: ZoneStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parse_defaults_to_unknown() {
        assert_eq!(ZoneStatus::from("LOCKED"), ZoneStatus::Locked);
        assert_eq!(ZoneStatus::from(" unlocked "), ZoneStatus::Unlocked);
        assert_eq!(ZoneStatus::from("ajar"), ZoneStatus::Unknown);
        assert_eq!(ZoneStatus::from(""), ZoneStatus::Unknown);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert_eq!(ZoneStatus::parse("RESTRICTED"), Some(ZoneStatus::Restricted));
        assert_eq!(ZoneStatus::parse("UNKNOWN"), None);
        assert_eq!(ZoneStatus::parse("ajar"), None);
    }
}
