//! HelpHub Server: peer help-request platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use helphub_api::{AppState, build_app};
use helphub_auth::{JwtDecoder, JwtIdentityResolver, RbacEnforcer};
use helphub_core::config::AppConfig;
use helphub_core::error::AppError;
use helphub_database::DatabasePool;
use helphub_database::repositories::{NotificationRepository, RequestRepository, UserRepository};
use helphub_database::store::UserDirectory;
use helphub_service::{NotificationService, RequestService};

#[tokio::main]
async fn main() {
    let env = std::env::var("HELPHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting HelpHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        helphub_database::migration::run_migrations(db.pool()).await?;
        tracing::info!("Database migrations complete");
    }

    // ── Step 2: Repositories ─────────────────────────────────────
    let pool = db.pool().clone();
    let users: Arc<dyn UserDirectory> = Arc::new(UserRepository::new(pool.clone()));
    let requests = Arc::new(RequestRepository::new(pool.clone()));
    let notifications = Arc::new(NotificationRepository::new(pool));

    // ── Step 3: Auth ─────────────────────────────────────────────
    let resolver = Arc::new(JwtIdentityResolver::new(
        JwtDecoder::new(&config.auth),
        Arc::clone(&users),
    ));
    let rbac = RbacEnforcer::new();

    // ── Step 4: Services ─────────────────────────────────────────
    let notification_service = NotificationService::new(notifications, rbac.clone());
    let request_service = RequestService::new(
        requests,
        Arc::clone(&users),
        notification_service.clone(),
        rbac,
    );

    // ── Step 5: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        resolver,
        request_service: Arc::new(request_service),
        notification_service: Arc::new(notification_service),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("HelpHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Shutting down, closing database pool");
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
