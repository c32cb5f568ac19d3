use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use game_persistence::{connection::connect_and_migrate, repositories::PlayerRepository};
use game_server::{config::Config, create_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Hangman API...");

    let config = Config::new();

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(config.database_url.as_str()).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let player_repository = Arc::new(PlayerRepository::new(db));

    let routes = create_routes(player_repository);

    let addr = (config.host.parse::<std::net::IpAddr>()?, config.port);

    let (addr, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::warn!("Cannot listen for SIGTERM: {}", e);
                    let _ = signal::ctrl_c().await;
                    return;
                }
            };

            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = signal::ctrl_c().await;
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    })?;

    info!(
        "Hangman API listening on {} (database: {})",
        addr, config.database_url
    );
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}
