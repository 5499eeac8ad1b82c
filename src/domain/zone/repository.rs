use async_trait::async_trait;

use super::{Zone, ZoneStatus};
use crate::domain::DomainResult;

/// Read/upsert access to the zone store.
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Zone>>;
    /// Status of the first row matching `name`; `Unknown` when absent.
    async fn status_of(&self, name: &str) -> DomainResult<ZoneStatus>;
    /// Replace every row with this zone's name, or append a new row.
    async fn upsert(&self, zone: &Zone) -> DomainResult<()>;
}
