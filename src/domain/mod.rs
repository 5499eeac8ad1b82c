pub mod attendance;
pub mod audit;
pub mod error;
pub mod repositories;
pub mod user;
pub mod zone;

// Re-export commonly used types
pub use attendance::{AttendanceAction, AttendanceRecord, AttendanceRepository};
pub use audit::{AuditLogRepository, LogEntry, LogLevel};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use user::{Role, User, UserRepository};
pub use zone::{Zone, ZoneRepository, ZoneStatus};
