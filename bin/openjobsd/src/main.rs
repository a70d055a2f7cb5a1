//! `openjobsd` — the OpenJobs server binary.
//!
//! Usage:
//!   openjobsd -c <name-or-path> [--listen <addr>]
//!
//! The config name resolves to `/etc/openjobs/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use openjobs_auth::AuthState;
use openjobs_core::Module;

use config::ServerConfig;

/// OpenJobs server.
#[derive(Parser, Debug)]
#[command(name = "openjobsd", about = "OpenJobs server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load and verify server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    server_config.verify()?;

    // Initialize storage.
    std::fs::create_dir_all(&server_config.storage.data_dir)?;
    let sql: Arc<dyn openjobs_sql::SqlStore> = Arc::new(
        openjobs_sql::SqliteStore::open(&server_config.db_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {e}"))?,
    );

    // Initialize modules.
    let board_module = openjobs_board::BoardModule::new(Arc::clone(&sql))?;
    info!("Board module initialized");

    let module_routes = vec![(board_module.name(), board_module.routes())];

    // Build router with the global authenticate layer.
    let auth_state = Arc::new(AuthState::new(&server_config.jwt.secret));
    let app = routes::build_router(auth_state, module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("OpenJobs server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
