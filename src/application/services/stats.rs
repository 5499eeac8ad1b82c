//! Dashboard metrics service
//!
//! Every value here is a presentation heuristic, not an invariant: the
//! "on campus" count trusts record order over timestamps, the security
//! level counts substrings in raw log lines, and the load figure is an
//! admitted fake.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::domain::{AttendanceAction, DomainResult, RepositoryProvider};

/// How many trailing raw log lines feed the security level
const RECENT_LOG_WINDOW: usize = 10;

/// Cosmetic threat label derived from recent error-log volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityLevel {
    Low,
    Moderate,
    Critical,
}

impl SecurityLevel {
    /// Buckets: 0 errors, 1–5 errors, more than 5.
    fn from_error_count(count: usize) -> Self {
        match count {
            0 => Self::Low,
            1..=5 => Self::Moderate,
            _ => Self::Critical,
        }
    }

    pub fn defcon(self) -> &'static str {
        match self {
            Self::Low => "DEFCON 5",
            Self::Moderate => "DEFCON 3",
            Self::Critical => "DEFCON 1",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// One snapshot of the dashboard header values
#[derive(Debug, Clone)]
pub struct DashboardStats {
    /// Total configured users
    pub active_users: usize,
    /// Users whose latest attendance action (by record order) is CHECK_IN
    pub on_campus: usize,
    pub security_level: SecurityLevel,
    pub defcon: &'static str,
    /// Mock value in [10, 40), carries no signal
    pub load: u32,
}

pub struct StatsService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StatsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn snapshot(&self) -> DomainResult<DashboardStats> {
        let active_users = self.repos.users().list().await?.len();

        // Last record in store order wins, whatever its timestamp says.
        let mut latest: HashMap<String, AttendanceAction> = HashMap::new();
        for record in self.repos.attendance().list().await? {
            latest.insert(record.user_id, record.action);
        }
        let on_campus = latest
            .values()
            .filter(|action| **action == AttendanceAction::CheckIn)
            .count();

        let tail = self.repos.audit().raw_tail(RECENT_LOG_WINDOW).await?;
        let error_count = tail.iter().filter(|line| line.contains("[ERROR]")).count();
        let security_level = SecurityLevel::from_error_count(error_count);

        Ok(DashboardStats {
            active_users,
            on_campus,
            security_level,
            defcon: security_level.defcon(),
            load: rand::thread_rng().gen_range(10u32..40),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AttendanceRecord, AttendanceRepository, Role, User, UserRepository,
    };
    use crate::infrastructure::InMemoryStore;

    fn service(store: &Arc<InMemoryStore>) -> StatsService {
        StatsService::new(store.clone() as Arc<dyn RepositoryProvider>)
    }

    async fn push_attendance(store: &InMemoryStore, ts: &str, user_id: &str, action: AttendanceAction) {
        AttendanceRepository::append(
            store,
            &AttendanceRecord {
                timestamp: ts.into(),
                user_id: user_id.into(),
                username: user_id.to_lowercase(),
                action,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn empty_stores_yield_quiet_dashboard() {
        let store = Arc::new(InMemoryStore::new());
        let stats = service(&store).snapshot().await.unwrap();
        assert_eq!(stats.active_users, 0);
        assert_eq!(stats.on_campus, 0);
        assert_eq!(stats.security_level, SecurityLevel::Low);
        assert_eq!(stats.defcon, "DEFCON 5");
        assert!((10..40).contains(&stats.load));
    }

    #[tokio::test]
    async fn active_users_counts_configured_records() {
        let store = Arc::new(InMemoryStore::new());
        for id in ["A", "B", "C"] {
            UserRepository::append(
                store.as_ref(),
                &User {
                    id: id.into(),
                    username: id.into(),
                    password: "pw".into(),
                    role: Role::Employee,
                    badge_count: Some(0),
                },
            )
            .await
            .unwrap();
        }
        let stats = service(&store).snapshot().await.unwrap();
        assert_eq!(stats.active_users, 3);
    }

    #[tokio::test]
    async fn on_campus_takes_the_latest_action_per_user() {
        let store = Arc::new(InMemoryStore::new());
        push_attendance(&store, "t1", "EMP01", AttendanceAction::CheckIn).await;
        push_attendance(&store, "t2", "EMP01", AttendanceAction::CheckOut).await;
        push_attendance(&store, "t3", "EMP02", AttendanceAction::CheckIn).await;
        let stats = service(&store).snapshot().await.unwrap();
        assert_eq!(stats.on_campus, 1);
    }

    // Record order decides, even when the timestamps tell another story.
    #[tokio::test]
    async fn on_campus_trusts_record_order_over_timestamps() {
        let store = Arc::new(InMemoryStore::new());
        push_attendance(&store, "2026-01-02 09:00:00", "EMP01", AttendanceAction::CheckOut).await;
        push_attendance(&store, "2026-01-01 09:00:00", "EMP01", AttendanceAction::CheckIn).await;
        let stats = service(&store).snapshot().await.unwrap();
        assert_eq!(stats.on_campus, 1);
    }

    #[tokio::test]
    async fn security_level_buckets_on_recent_error_lines() {
        for (errors, expected, defcon) in [
            (0usize, SecurityLevel::Low, "DEFCON 5"),
            (1, SecurityLevel::Moderate, "DEFCON 3"),
            (5, SecurityLevel::Moderate, "DEFCON 3"),
            (6, SecurityLevel::Critical, "DEFCON 1"),
        ] {
            let store = Arc::new(InMemoryStore::new());
            for i in 0..errors {
                store.push_raw_log_line(format!("[t{i}] [ERROR] boom {i}")).await;
            }
            for i in errors..10 {
                store.push_raw_log_line(format!("[t{i}] [INFO] fine {i}")).await;
            }
            let stats = service(&store).snapshot().await.unwrap();
            assert_eq!(stats.security_level, expected, "{errors} errors");
            assert_eq!(stats.defcon, defcon);
        }
    }

    // Errors that have scrolled out of the 10-line window stop counting.
    #[tokio::test]
    async fn old_errors_fall_out_of_the_window() {
        let store = Arc::new(InMemoryStore::new());
        for i in 0..6 {
            store.push_raw_log_line(format!("[t{i}] [ERROR] old {i}")).await;
        }
        for i in 0..10 {
            store.push_raw_log_line(format!("[u{i}] [INFO] calm {i}")).await;
        }
        let stats = service(&store).snapshot().await.unwrap();
        assert_eq!(stats.security_level, SecurityLevel::Low);
    }
}
