use async_trait::async_trait;

use super::User;
use crate::domain::DomainResult;

/// Read/append access to the personnel store.
///
/// Lookups return the first matching record in store order.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<User>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn append(&self, user: &User) -> DomainResult<()>;
}
