//! Server setup and initialization
//!
//! Builds the store-backed state, assembles the router, seeds roles in the
//! background, and serves until Ctrl-C.

use std::net::SocketAddr;

use axum::Router;
use community_common::{AppConfig, AppError, JwtService};
use community_core::SnowflakeGenerator;
use community_db::{create_pool, run_migrations, MemoryStore, PoolConfig};
use community_service::{RoleService, ServiceContext};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let api = apply_rate_limit(create_router(), &state.config().rate_limit);
    let router = health_routes().merge(api);
    apply_middleware(router).with_state(state)
}

/// Connect the configured store and build the service context
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.expiry_secs);
    let snowflake_generator = SnowflakeGenerator::new(config.snowflake.worker_id);

    let context = if config.database.is_memory() {
        warn!("Using the in-memory store; data is lost on restart");
        ServiceContext::in_memory(MemoryStore::new(), jwt_service, snowflake_generator)
    } else {
        info!("Connecting to PostgreSQL...");
        let pool_config = PoolConfig::new(config.database.url.clone()).with_connections(
            config.database.min_connections,
            config.database.max_connections,
        );
        let pool = create_pool(&pool_config)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Schema bootstrap failed: {e}")))?;
        info!("PostgreSQL connection established");

        ServiceContext::postgres(pool, jwt_service, snowflake_generator)
    };

    Ok(AppState::new(context, config))
}

/// Seed the canonical roles without delaying startup.
///
/// Failures are logged; seeding is idempotent and runs again on the next
/// start.
pub fn spawn_role_seeding(state: &AppState) -> JoinHandle<()> {
    let ctx = state.service_context().clone();
    tokio::spawn(async move {
        match RoleService::new(&ctx).ensure_seeded().await {
            Ok(0) => info!("Canonical roles already present"),
            Ok(inserted) => info!(inserted, "Canonical roles seeded"),
            Err(e) => error!(error = %e, "Role seeding failed"),
        }
    })
}

/// Serve `app` on `listener` until the shutdown signal
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    spawn_role_seeding(&state);

    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
