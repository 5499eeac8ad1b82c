//! Audit log domain entity
//!
//! The on-disk layout is one `[timestamp] [LEVEL] message` line per entry,
//! timestamp formatted `YYYY-MM-DD HH:MM:SS`.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "INFO" => Some(Self::Info),
            "WARN" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One parsed audit line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// Parse one `[timestamp] [LEVEL] message` line.
    ///
    /// Anything that does not match the bracket layout (including an
    /// unrecognized level) is malformed and yields `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (timestamp, rest) = rest.split_once("] [")?;
        let (level, message) = rest.split_once("] ")?;
        Some(Self {
            timestamp: timestamp.to_string(),
            level: LogLevel::parse(level)?,
            message: message.to_string(),
        })
    }

    pub fn format_line(&self) -> String {
        format!("[{}] [{}] {}", self.timestamp, self.level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed_line() {
        let entry =
            LogEntry::parse_line("[2025-12-16 21:55:39] [WARN] [VISITOR] Vik (ID: VIS02) denied access to LAB (Authorized Personnel Only)")
                .unwrap();
        assert_eq!(entry.timestamp, "2025-12-16 21:55:39");
        assert_eq!(entry.level, LogLevel::Warn);
        assert!(entry.message.starts_with("[VISITOR] Vik"));
    }

    #[test]
    fn roundtrip_format() {
        let entry = LogEntry {
            timestamp: "2026-01-01 08:00:00".into(),
            level: LogLevel::Info,
            message: "system online".into(),
        };
        let line = entry.format_line();
        assert_eq!(line, "[2026-01-01 08:00:00] [INFO] system online");
        let back = LogEntry::parse_line(&line).unwrap();
        assert_eq!(back.message, "system online");
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(LogEntry::parse_line("no brackets at all").is_none());
        assert!(LogEntry::parse_line("[ts only]").is_none());
        // missing the space after the level bracket
        assert!(LogEntry::parse_line("[ts] [INFO]").is_none());
        // unknown level
        assert!(LogEntry::parse_line("[ts] [DEBUG] message").is_none());
    }

    #[test]
    fn empty_message_is_still_a_line() {
        let entry = LogEntry::parse_line("[ts] [ERROR] ").unwrap();
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.message, "");
    }
}
