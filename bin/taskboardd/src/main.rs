//! `taskboardd` — the Taskboard server binary.
//!
//! Usage:
//!   taskboardd [--listen <addr>]
//!
//! Everything else comes from the environment — see
//! [`taskboard_core::ServerConfig`] for the recognised variables.

mod routes;

use std::sync::Arc;

use clap::Parser;
use taskboard_core::{DatabaseConfig, ServerConfig};
use tracing::info;

/// Taskboard server.
#[derive(Parser, Debug)]
#[command(name = "taskboardd", about = "Taskboard server")]
struct Cli {
    /// Listen address (overrides the LISTEN environment variable).
    #[arg(long = "listen")]
    listen: Option<String>,
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
    let config = ServerConfig::from_env();
    let listen = cli.listen.unwrap_or_else(|| config.listen.clone());

    if config.debug {
        info!("debug mode enabled");
    }

    // Open the configured storage backend.
    let sql = open_store(&config.database)?;

    let module = tasks::TasksModule::new(sql)?;
    info!("tasks module initialized");

    // Build router.
    let app = routes::build_router(&config, &module);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("taskboard server listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the SQL backend selected by the environment toggle.
fn open_store(database: &DatabaseConfig) -> anyhow::Result<Arc<dyn taskboard_sql::SQLStore>> {
    match database {
        DatabaseConfig::Sqlite { path } => {
            info!("using sqlite store at {}", path.display());
            Ok(Arc::new(
                taskboard_sql::SqliteStore::open(path)
                    .map_err(|e| anyhow::anyhow!("failed to open sqlite store: {}", e))?,
            ))
        }
        DatabaseConfig::Postgres {
            host,
            port,
            dbname,
            user,
            password,
        } => {
            info!("using postgres store at {}:{}/{}", host, port, dbname);
            Ok(Arc::new(
                taskboard_sql::PostgresStore::connect(host, *port, dbname, user, password)
                    .map_err(|e| anyhow::anyhow!("failed to connect to postgres: {}", e))?,
            ))
        }
    }
}
