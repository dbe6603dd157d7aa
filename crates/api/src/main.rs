use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use bugtrack_api::config::ServerConfig;
use bugtrack_api::router::build_app_router;
use bugtrack_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    bugtrack_api::logging::init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = bugtrack_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    bugtrack_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    bugtrack_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database pool");
    pool.close().await;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
