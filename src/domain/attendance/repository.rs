use async_trait::async_trait;

use super::AttendanceRecord;
use crate::domain::DomainResult;

/// Append-only attendance store, read back in file order.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<AttendanceRecord>>;
    async fn append(&self, record: &AttendanceRecord) -> DomainResult<()>;
}
