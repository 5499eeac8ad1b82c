//! Repository traits for the domain layer

use super::attendance::AttendanceRepository;
use super::audit::AuditLogRepository;
use super::user::UserRepository;
use super::zone::ZoneRepository;

/// Provides access to all per-record-kind repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_id("EMP01").await?;
///     let status = repos.zones().status_of("LAB").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn zones(&self) -> &dyn ZoneRepository;
    fn attendance(&self) -> &dyn AttendanceRepository;
    fn audit(&self) -> &dyn AuditLogRepository;
}
