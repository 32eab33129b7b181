mod aggregator;
mod app;
mod cache;
mod config;
mod handlers;
mod invalidation;
mod state;
#[cfg(test)]
mod test_support;
mod upstream;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::Config,
    state::AppState,
    upstream::{CachedUpstreamClient, HttpUpstreamClient},
};

/// CourtSync - Cached court availability for a sports-facility API
#[derive(Parser, Debug)]
#[command(name = "courtsync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtsync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let transport = HttpUpstreamClient::new(&config.upstream_base_url, config.upstream_timeout())?;
    tracing::info!(
        base_url = transport.base_url(),
        timeout_seconds = config.upstream_timeout_seconds,
        "Using upstream facility API"
    );

    #[cfg(feature = "memory")]
    let store = {
        tracing::info!(max_entries = config.cache_max_entries, "Using memory cache");
        Arc::new(cache::MemoryCache::new(config.cache_max_entries))
    };

    #[cfg(feature = "redis")]
    let store = {
        tracing::info!(url = %config.redis_url, "Using Redis cache");
        Arc::new(cache::RedisCache::new(&config.redis_url).await?)
    };

    let upstream = CachedUpstreamClient::new(Arc::new(transport), store, config.cache_ttls())
        .with_slot_invalidation(config.slot_invalidation);

    tracing::info!(
        slot_invalidation = ?config.slot_invalidation,
        partial_failure = ?config.partial_failure,
        "Availability policies"
    );

    let state = AppState::new(Arc::new(upstream), config.partial_failure);

    // Build the application router
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
