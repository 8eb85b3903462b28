//! Community API server entry point
//!
//! Run with:
//! ```bash
//! DATABASE_URL=memory JWT_SECRET=... cargo run -p community-api
//! ```

use community_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration decides the tracing preset, so it is loaded first
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::development()
    };
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        memory_store = config.database.is_memory(),
        "Starting community API server"
    );

    if let Err(e) = community_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
