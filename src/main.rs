//!
//! Zephyr ControlVault server: building-access dashboard backend.
//! Reads configuration from TOML file (~/.config/controlvault/config.toml).

use std::sync::Arc;

use tracing::{error, info};

use zephyr_vault::application::{AccessService, StatsService};
use zephyr_vault::domain::{RepositoryProvider, Role, User};
use zephyr_vault::support::ShutdownSignal;
use zephyr_vault::{create_api_router, default_config_path, AppConfig, FlatFileStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CONTROLVAULT_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Zephyr ControlVault...");
    info!("Data directory: {}", app_cfg.data.dir.display());

    // ── Record store ───────────────────────────────────────────
    let store: Arc<dyn RepositoryProvider> = Arc::new(FlatFileStore::new(&app_cfg.data.dir));

    // Create default admin user if no users exist
    seed_default_admin(store.as_ref(), &app_cfg).await;

    // ── Services ───────────────────────────────────────────────
    let access = Arc::new(AccessService::new(store.clone()));
    let stats = Arc::new(StatsService::new(store.clone()));

    // Initialize shutdown signal and listen for SIGTERM/SIGINT
    let shutdown = ShutdownSignal::new();
    shutdown.start_signal_listener();

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(store, access, stats, &app_cfg);

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await?;

    info!("👋 Zephyr ControlVault shutdown complete");
    Ok(())
}

/// Create default admin user if the personnel store is empty
async fn seed_default_admin(store: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    let users = match store.users().list().await {
        Ok(users) => users,
        Err(e) => {
            error!("Failed to read user store: {}", e);
            return;
        }
    };

    if users.is_empty() {
        info!("Creating default admin user...");
        let admin = User {
            id: app_cfg.admin.id.clone(),
            username: app_cfg.admin.username.clone(),
            password: app_cfg.admin.password.clone(),
            role: Role::Admin,
            badge_count: Some(0),
        };
        match store.users().append(&admin).await {
            Ok(()) => {
                info!("Default admin created: {}", admin.username);
                info!("⚠️  Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin user: {}", e);
            }
        }
    }
}
