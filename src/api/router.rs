//! API router with Swagger UI

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{access, attendance, auth, health, logs, stats, users, zones};
use crate::application::{AccessService, StatsService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        users::list_users,
        users::create_user,
        zones::list_zones,
        zones::upsert_zone,
        logs::list_logs,
        logs::append_log,
        attendance::list_attendance,
        attendance::record_attendance,
        access::check_access,
        stats::get_dashboard_stats,
    ),
    components(
        schemas(
            ApiResponse<String>,
            users::UserDto,
            users::CreateUserRequest,
            auth::LoginRequest,
            zones::ZoneDto,
            zones::UpsertZoneRequest,
            logs::LogEntryDto,
            logs::AppendLogRequest,
            attendance::AttendanceDto,
            attendance::RecordAttendanceRequest,
            access::AccessRequest,
            access::AccessResponse,
            stats::DashboardStatsDto,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe."),
        (name = "Auth", description = "Stateless credential check against the personnel store. No tokens or sessions."),
        (name = "Users", description = "Personnel records. Append-only; passwords are never returned."),
        (name = "Zones", description = "Physical areas with a lock status: `LOCKED`, `UNLOCKED`, `RESTRICTED`. Upserted by name."),
        (name = "Attendance", description = "Employee check-in/check-out records. Presence is derived from the latest record per user."),
        (name = "Logs", description = "Append-only audit trail, `[timestamp] [LEVEL] message` per line, newest first on read."),
        (name = "Access", description = "The badge-swipe simulation: rule-based grant/deny with an audit line per decision."),
        (name = "Stats", description = "Dashboard header values. Heuristics, not invariants; `load` is mock data."),
    ),
    info(
        title = "Zephyr ControlVault API",
        version = "0.1.0",
        description = "REST API for the ControlVault building-access simulator: personnel, zones, attendance, audit log and a rule-based access check over flat-file storage.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    access: Arc<AccessService>,
    stats: Arc<StatsService>,
    app_cfg: &AppConfig,
) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .with_state(users::UserState { repos: repos.clone() });

    let zone_routes = Router::new()
        .route("/", get(zones::list_zones).post(zones::upsert_zone))
        .with_state(zones::ZoneState { repos: repos.clone() });

    let log_routes = Router::new()
        .route("/", get(logs::list_logs).post(logs::append_log))
        .with_state(logs::LogState { repos: repos.clone() });

    let attendance_routes = Router::new()
        .route("/", get(attendance::list_attendance).post(attendance::record_attendance))
        .with_state(attendance::AttendanceState { repos: repos.clone() });

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(auth::AuthState { repos });

    let access_routes = Router::new()
        .route("/", post(access::check_access))
        .with_state(access::AccessState { access });

    let stats_routes = Router::new()
        .route("/", get(stats::get_dashboard_stats))
        .with_state(stats::StatsState { stats });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/users", user_routes)
        .nest("/api/zones", zone_routes)
        .nest("/api/logs", log_routes)
        .nest("/api/attendance", attendance_routes)
        .nest("/api/auth", auth_routes)
        .nest("/api/access", access_routes)
        .nest("/api/stats", stats_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Optional static dashboard assets
    if let Some(static_dir) = &app_cfg.dashboard.static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};

    use crate::domain::{
        AuditLogRepository, Role, User, UserRepository, Zone, ZoneRepository, ZoneStatus,
    };
    use crate::infrastructure::InMemoryStore;

    async fn seeded_app() -> (Arc<InMemoryStore>, Router) {
        let store = Arc::new(InMemoryStore::new());
        UserRepository::append(
            store.as_ref(),
            &User {
                id: "ADM01".into(),
                username: "Admin".into(),
                password: "pw".into(),
                role: Role::Admin,
                badge_count: Some(0),
            },
        )
        .await
        .unwrap();
        UserRepository::append(
            store.as_ref(),
            &User {
                id: "VIS01".into(),
                username: "Vik".into(),
                password: "pw".into(),
                role: Role::Visitor,
                badge_count: Some(3),
            },
        )
        .await
        .unwrap();
        store
            .upsert(&Zone { name: "LAB".into(), status: ZoneStatus::Locked })
            .await
            .unwrap();

        let repos: Arc<dyn RepositoryProvider> = store.clone();
        let access = Arc::new(AccessService::new(repos.clone()));
        let stats = Arc::new(StatsService::new(repos.clone()));
        let app = create_api_router(repos, access, stats, &AppConfig::default());
        (store, app)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        use tower::Service;
        let mut svc = app.clone().into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (_store, app) = seeded_app().await;
        let (status, body) = send(&app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn created_user_lists_with_badge_count_zero() {
        let (_store, app) = seeded_app().await;
        let (status, body) = send(
            &app,
            post_json(
                "/api/users",
                json!({"id": "EMP07", "username": "Dana", "password": "pw", "role": "EMPLOYEE"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["badgeCount"], 0);

        let (status, body) = send(&app, get_req("/api/users")).await;
        assert_eq!(status, StatusCode::OK);
        let users = body["data"].as_array().unwrap();
        let dana = users.iter().find(|u| u["id"] == "EMP07").unwrap();
        assert_eq!(dana["username"], "Dana");
        assert_eq!(dana["role"], "EMPLOYEE");
        assert_eq!(dana["badgeCount"], 0);
        // passwords never leave the server
        assert!(dana.get("password").is_none());
    }

    #[tokio::test]
    async fn user_creation_rejects_missing_field_and_bad_role() {
        let (_store, app) = seeded_app().await;
        let (status, _) = send(
            &app,
            post_json("/api/users", json!({"id": "X", "username": "Y", "role": "ADMIN"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            post_json(
                "/api/users",
                json!({"id": "X", "username": "Y", "password": "Z", "role": "WIZARD"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid role: WIZARD");
    }

    #[tokio::test]
    async fn admin_swipe_on_locked_zone_grants_and_logs() {
        let (store, app) = seeded_app().await;
        let (status, body) = send(
            &app,
            post_json("/api/access", json!({"userId": "ADM01", "zone": "LAB"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["granted"], true);
        assert_eq!(body["role"], "ADMIN");
        assert_eq!(body["zone"], "LAB");
        assert_eq!(body["message"], "Access Granted");

        let entries = store.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "[ADMIN] Admin (ID: ADM01) accessed LAB");
    }

    #[tokio::test]
    async fn visitor_swipe_on_locked_zone_denies() {
        let (_store, app) = seeded_app().await;
        let (status, body) = send(
            &app,
            post_json("/api/access", json!({"userId": "VIS01", "zone": "LAB"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["granted"], false);
        assert_eq!(body["message"], "Access Denied: Zone is LOCKED");
    }

    #[tokio::test]
    async fn unknown_user_swipe_is_404_without_role() {
        let (store, app) = seeded_app().await;
        let (status, body) = send(
            &app,
            post_json("/api/access", json!({"userId": "GHOST", "zone": "LAB"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["granted"], false);
        assert_eq!(body["message"], "User not found");
        assert!(body.get("role").is_none());
        assert!(store.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zone_upsert_shows_exactly_once() {
        let (_store, app) = seeded_app().await;
        let (status, _) = send(
            &app,
            post_json("/api/zones", json!({"name": "LAB", "status": "UNLOCKED"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, get_req("/api/zones")).await;
        let labs: Vec<&Value> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|z| z["name"] == "LAB")
            .collect();
        assert_eq!(labs.len(), 1);
        assert_eq!(labs[0]["status"], "UNLOCKED");
    }

    #[tokio::test]
    async fn logs_filter_by_user_substring() {
        let (store, app) = seeded_app().await;
        store
            .push_raw_log_line("[t1] [INFO] [ADMIN] Admin (ID: ADM01) accessed LAB")
            .await;
        store
            .push_raw_log_line("[t2] [WARN] [VISITOR] Vik (ID: VIS01) denied access to LAB (Zone is LOCKED)")
            .await;

        let (_, body) = send(&app, get_req("/api/logs?user=Vik")).await;
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0]["message"].as_str().unwrap().contains("Vik"));

        // unfiltered: newest first
        let (_, body) = send(&app, get_req("/api/logs")).await;
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["timestamp"], "t2");
    }

    #[tokio::test]
    async fn append_log_rejects_unknown_level() {
        let (_store, app) = seeded_app().await;
        let (status, _) = send(
            &app,
            post_json("/api/logs", json!({"level": "DEBUG", "message": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn visitor_cannot_record_attendance() {
        let (store, app) = seeded_app().await;
        let (status, body) = send(
            &app,
            post_json("/api/attendance", json!({"userId": "VIS01", "action": "CHECK_IN"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only employees can check in or out");
        assert!(crate::domain::AttendanceRepository::list(store.as_ref())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn employee_check_in_lands_in_attendance_and_audit() {
        let (store, app) = seeded_app().await;
        let (status, _) = send(
            &app,
            post_json(
                "/api/users",
                json!({"id": "EMP07", "username": "Dana", "password": "pw", "role": "EMPLOYEE"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            post_json("/api/attendance", json!({"userId": "EMP07", "action": "CHECK_IN"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["action"], "CHECK_IN");
        assert_eq!(body["data"]["username"], "Dana");

        let (_, body) = send(&app, get_req("/api/attendance")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let entries = store.entries().await.unwrap();
        assert_eq!(entries[0].message, "Employee checked in: [EMPLOYEE] Dana (ID: EMP07)");
    }

    #[tokio::test]
    async fn login_accepts_and_rejects_with_distinct_messages() {
        let (store, app) = seeded_app().await;

        let (status, body) = send(
            &app,
            post_json("/api/auth/login", json!({"username": "Admin", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "ADM01");

        let (status, body) = send(
            &app,
            post_json("/api/auth/login", json!({"username": "Admin", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Incorrect password");

        let (status, body) = send(
            &app,
            post_json("/api/auth/login", json!({"username": "Nobody", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "User not found");

        // one INFO success + two ERROR failures in the audit trail
        let entries = store.entries().await.unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn stats_snapshot_has_the_dashboard_shape() {
        let (_store, app) = seeded_app().await;
        let (status, body) = send(&app, get_req("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["activeUsers"], 2);
        assert_eq!(data["onCampus"], 0);
        assert_eq!(data["securityLevel"], "LOW");
        assert_eq!(data["defcon"], "DEFCON 5");
        let load = data["load"].as_u64().unwrap();
        assert!((10..40).contains(&load));
    }
}
