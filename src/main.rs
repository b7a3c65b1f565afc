use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use orgauth_api::config::AppConfig;
use orgauth_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use orgauth_api::{app, AppState};

#[derive(Parser)]
#[command(name = "orgauth-api")]
#[command(about = "User registration, login and organisation membership API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Apply migrations and serve the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT / ORGAUTH_PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Use the in-process store instead of PostgreSQL")]
        memory: bool,
    },

    #[command(about = "Apply the database schema and exit")]
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("orgauth_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    config.validate()?;
    tracing::info!("Starting orgauth-api in {:?} mode", config.environment);

    match cli.command.unwrap_or(Command::Serve { port: None, memory: false }) {
        Command::Serve { port, memory } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config, memory).await
        }
        Command::Migrate => {
            let pool = DatabaseManager::connect(&config.database).await?;
            let store = PgStore::new(pool);
            store.migrate().await?;
            store.close().await;
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, memory: bool) -> anyhow::Result<()> {
    let store: Arc<dyn Store> = if memory {
        tracing::warn!("Using in-memory store, data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database).await?;
        let store = PgStore::new(pool);
        store.migrate().await?;
        Arc::new(store)
    };

    let bind_addr = config.bind_address();
    let state = AppState::new(config, Arc::clone(&store))?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("orgauth-api listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
