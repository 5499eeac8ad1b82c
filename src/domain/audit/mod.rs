pub mod model;
pub mod repository;

pub use model::{LogEntry, LogLevel};
pub use repository::AuditLogRepository;
