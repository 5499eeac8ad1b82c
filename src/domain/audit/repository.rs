use async_trait::async_trait;

use super::{LogEntry, LogLevel};
use crate::domain::DomainResult;

/// Append-only audit trail over the access log.
///
/// `append` stamps the current local time itself, so callers only supply
/// level and message.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Parsed entries, most recent first. Malformed lines are skipped.
    async fn entries(&self) -> DomainResult<Vec<LogEntry>>;
    /// The trailing `n` raw non-blank lines, oldest first, as stored.
    async fn raw_tail(&self, n: usize) -> DomainResult<Vec<String>>;
    async fn append(&self, level: LogLevel, message: &str) -> DomainResult<()>;
}
