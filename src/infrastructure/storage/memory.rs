//! In-memory store for development and testing
//!
//! Keeps records in plain `Vec`s behind async locks so that store order,
//! which the attendance heuristics and first-match lookups depend on,
//! behaves exactly like the flat-file backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    AttendanceRecord, AttendanceRepository, AuditLogRepository, DomainResult, LogEntry, LogLevel,
    RepositoryProvider, User, UserRepository, Zone, ZoneRepository, ZoneStatus,
};

use super::now_stamp;

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    zones: RwLock<Vec<Zone>>,
    attendance: RwLock<Vec<AttendanceRecord>>,
    /// Raw audit lines, same shape as the file on disk
    log_lines: RwLock<Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a raw log line verbatim, bypassing the timestamp/level layout.
    /// Lets tests stage malformed or historical lines.
    pub async fn push_raw_log_line(&self, line: impl Into<String>) {
        self.log_lines.write().await.push(line.into());
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn append(&self, user: &User) -> DomainResult<()> {
        self.users.write().await.push(user.clone());
        Ok(())
    }
}

#[async_trait]
impl ZoneRepository for InMemoryStore {
    async fn list(&self) -> DomainResult<Vec<Zone>> {
        Ok(self.zones.read().await.clone())
    }

    async fn status_of(&self, name: &str) -> DomainResult<ZoneStatus> {
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .find(|z| z.name == name)
            .map(|z| z.status)
            .unwrap_or(ZoneStatus::Unknown))
    }

    async fn upsert(&self, zone: &Zone) -> DomainResult<()> {
        let mut zones = self.zones.write().await;
        let mut found = false;
        for existing in zones.iter_mut() {
            if existing.name == zone.name {
                existing.status = zone.status;
                found = true;
            }
        }
        if !found {
            zones.push(zone.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn list(&self) -> DomainResult<Vec<AttendanceRecord>> {
        Ok(self.attendance.read().await.clone())
    }

    async fn append(&self, record: &AttendanceRecord) -> DomainResult<()> {
        self.attendance.write().await.push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryStore {
    async fn entries(&self) -> DomainResult<Vec<LogEntry>> {
        Ok(self
            .log_lines
            .read()
            .await
            .iter()
            .rev()
            .filter_map(|l| LogEntry::parse_line(l))
            .collect())
    }

    async fn raw_tail(&self, n: usize) -> DomainResult<Vec<String>> {
        let lines = self.log_lines.read().await;
        let start = lines.len().saturating_sub(n);
        Ok(lines[start..].to_vec())
    }

    async fn append(&self, level: LogLevel, message: &str) -> DomainResult<()> {
        let entry = LogEntry {
            timestamp: now_stamp(),
            level,
            message: message.to_string(),
        };
        self.log_lines.write().await.push(entry.format_line());
        Ok(())
    }
}

impl RepositoryProvider for InMemoryStore {
    fn users(&self) -> &dyn UserRepository {
        self
    }
    fn zones(&self) -> &dyn ZoneRepository {
        self
    }
    fn attendance(&self) -> &dyn AttendanceRepository {
        self
    }
    fn audit(&self) -> &dyn AuditLogRepository {
        self
    }
}
