//! Flat-file record store
//!
//! Each record kind lives in its own text file under the data directory,
//! one comma-separated record per line. Reads load the whole file; writes
//! either append one line or rewrite the whole payload (zone upsert).
//! Fields are not escaped: a comma or newline inside a username or message
//! corrupts that line, and the corrupted line is silently skipped on the
//! next read.
//!
//! One async mutex per backing file serializes access within this process,
//! so an upsert cannot drop a concurrent append. Writers in OTHER processes
//! are not coordinated with at all; that hazard is accepted.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::{
    AttendanceAction, AttendanceRecord, AttendanceRepository, AuditLogRepository, DomainError,
    DomainResult, LogEntry, LogLevel, RepositoryProvider, Role, User, UserRepository, Zone,
    ZoneRepository, ZoneStatus,
};

use super::now_stamp;

/// One backing file plus the lock that serializes access to it.
struct StoreFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl StoreFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn io_err(&self, source: std::io::Error) -> DomainError {
        DomainError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Non-blank lines in file order. A file that does not exist yet reads
    /// as empty.
    async fn read_lines(&self) -> DomainResult<Vec<String>> {
        let _guard = self.lock.lock().await;
        self.read_lines_unlocked().await
    }

    async fn read_lines_unlocked(&self) -> DomainResult<Vec<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(self.io_err(e)),
        }
    }

    async fn append_line(&self, line: &str) -> DomainResult<()> {
        let _guard = self.lock.lock().await;
        self.ensure_parent().await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_err(e))?;
        file.write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(|e| self.io_err(e))?;
        Ok(())
    }

    async fn rewrite_unlocked(&self, lines: &[String]) -> DomainResult<()> {
        self.ensure_parent().await?;
        let mut payload = lines.join("\n");
        if !payload.is_empty() {
            payload.push('\n');
        }
        fs::write(&self.path, payload)
            .await
            .map_err(|e| self.io_err(e))
    }

    async fn ensure_parent(&self) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_err(e))?;
        }
        Ok(())
    }
}

/// The real record store: four text files under one data directory.
pub struct FlatFileStore {
    users: StoreFile,
    zones: StoreFile,
    attendance: StoreFile,
    audit: StoreFile,
}

impl FlatFileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            users: StoreFile::new(data_dir.join("users.txt")),
            zones: StoreFile::new(data_dir.join("zones.txt")),
            attendance: StoreFile::new(data_dir.join("attendance.txt")),
            audit: StoreFile::new(data_dir.join("access_log.txt")),
        }
    }
}

// ── line codecs ─────────────────────────────────────────────────

/// `id,username,password,role[,badgeCount]`
fn parse_user(line: &str) -> Option<User> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 4 {
        return None;
    }
    Some(User {
        id: parts[0].trim().to_string(),
        username: parts[1].trim().to_string(),
        password: parts[2].trim().to_string(),
        role: Role::parse(parts[3])?,
        badge_count: parts.get(4).and_then(|s| s.trim().parse().ok()),
    })
}

fn serialize_user(user: &User) -> String {
    match user.badge_count {
        Some(badge) => format!(
            "{},{},{},{},{}",
            user.id, user.username, user.password, user.role, badge
        ),
        None => format!("{},{},{},{}", user.id, user.username, user.password, user.role),
    }
}

/// `name,status`
fn parse_zone(line: &str) -> Option<Zone> {
    let mut parts = line.split(',');
    let name = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }
    let status = parts.next().map(ZoneStatus::from).unwrap_or(ZoneStatus::Unknown);
    Some(Zone {
        name: name.to_string(),
        status,
    })
}

/// `timestamp,userId,username,action`
fn parse_attendance(line: &str) -> Option<AttendanceRecord> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 4 {
        return None;
    }
    Some(AttendanceRecord {
        timestamp: parts[0].trim().to_string(),
        user_id: parts[1].trim().to_string(),
        username: parts[2].trim().to_string(),
        action: AttendanceAction::parse(parts[3])?,
    })
}

// ── repository implementations ──────────────────────────────────

#[async_trait]
impl UserRepository for FlatFileStore {
    async fn list(&self) -> DomainResult<Vec<User>> {
        let lines = self.users.read_lines().await?;
        Ok(lines.iter().filter_map(|l| parse_user(l)).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let lines = self.users.read_lines().await?;
        Ok(lines
            .iter()
            .filter_map(|l| parse_user(l))
            .find(|u| u.id == id))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let lines = self.users.read_lines().await?;
        Ok(lines
            .iter()
            .filter_map(|l| parse_user(l))
            .find(|u| u.username == username))
    }

    async fn append(&self, user: &User) -> DomainResult<()> {
        self.users.append_line(&serialize_user(user)).await
    }
}

#[async_trait]
impl ZoneRepository for FlatFileStore {
    async fn list(&self) -> DomainResult<Vec<Zone>> {
        let lines = self.zones.read_lines().await?;
        Ok(lines.iter().filter_map(|l| parse_zone(l)).collect())
    }

    async fn status_of(&self, name: &str) -> DomainResult<ZoneStatus> {
        let lines = self.zones.read_lines().await?;
        Ok(lines
            .iter()
            .filter_map(|l| parse_zone(l))
            .find(|z| z.name == name)
            .map(|z| z.status)
            .unwrap_or(ZoneStatus::Unknown))
    }

    async fn upsert(&self, zone: &Zone) -> DomainResult<()> {
        // read-modify-rewrite under a single lock acquisition
        let _guard = self.zones.lock.lock().await;
        let mut lines = self.zones.read_lines_unlocked().await?;
        let replacement = format!("{},{}", zone.name, zone.status);
        let mut found = false;
        for line in &mut lines {
            if line.split(',').next().map(str::trim) == Some(zone.name.as_str()) {
                *line = replacement.clone();
                found = true;
            }
        }
        if !found {
            lines.push(replacement);
        }
        self.zones.rewrite_unlocked(&lines).await
    }
}

#[async_trait]
impl AttendanceRepository for FlatFileStore {
    async fn list(&self) -> DomainResult<Vec<AttendanceRecord>> {
        let lines = self.attendance.read_lines().await?;
        Ok(lines.iter().filter_map(|l| parse_attendance(l)).collect())
    }

    async fn append(&self, record: &AttendanceRecord) -> DomainResult<()> {
        let line = format!(
            "{},{},{},{}",
            record.timestamp, record.user_id, record.username, record.action
        );
        self.attendance.append_line(&line).await
    }
}

#[async_trait]
impl AuditLogRepository for FlatFileStore {
    async fn entries(&self) -> DomainResult<Vec<LogEntry>> {
        let lines = self.audit.read_lines().await?;
        Ok(lines
            .iter()
            .rev()
            .filter_map(|l| LogEntry::parse_line(l))
            .collect())
    }

    async fn raw_tail(&self, n: usize) -> DomainResult<Vec<String>> {
        let lines = self.audit.read_lines().await?;
        let start = lines.len().saturating_sub(n);
        Ok(lines[start..].to_vec())
    }

    async fn append(&self, level: LogLevel, message: &str) -> DomainResult<()> {
        let entry = LogEntry {
            timestamp: now_stamp(),
            level,
            message: message.to_string(),
        };
        // mirror the audit trail into the process log
        match level {
            LogLevel::Info => tracing::info!(target: "audit", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "audit", "{message}"),
            LogLevel::Error => tracing::error!(target: "audit", "{message}"),
        }
        self.audit.append_line(&entry.format_line()).await
    }
}

impl RepositoryProvider for FlatFileStore {
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
