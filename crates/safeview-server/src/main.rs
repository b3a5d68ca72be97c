//! # safeview-server
//!
//! Demo backend for the SafeView dashboard.
//!
//! This binary provides:
//! - **REST API** (axum) for signup, devices, content-analysis history,
//!   stats and subscription lookups
//! - **Heuristic content classification** standing in for a real
//!   detection model
//! - **In-memory store** seeded with the demo account (state resets on
//!   restart, which is acceptable for a demo)
//! - **Per-IP rate limiting** to protect against abuse

mod api;
mod config;
mod error;
mod extract;
mod rate_limit;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use safeview_core::detection::HeuristicClassifier;
use safeview_store::{seed, MemStore};

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,safeview_server=debug")),
        )
        .init();

    info!("Starting SafeView server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Initialize subsystems
    // -----------------------------------------------------------------------

    // The store is constructed here and injected into handlers; nothing
    // in the process reaches for a global.
    let store = MemStore::new();
    if config.seed_demo_data {
        seed::seed_demo_data(&store).await?;
    }

    let classifier = Arc::new(HeuristicClassifier::new());
    let rate_limiter = RateLimiter::new(config.rate_limit_per_min);

    let app_state = AppState {
        store,
        classifier,
        rate_limiter: rate_limiter.clone(),
        config: Arc::new(config.clone()),
    };

    // -----------------------------------------------------------------------
    // 4. Spawn background tasks
    // -----------------------------------------------------------------------

    // Periodic rate limiter cleanup (every 5 minutes, evict windows idle
    // >10 min)
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter
                .purge_stale(std::time::Duration::from_secs(600))
                .await;
        }
    });

    // -----------------------------------------------------------------------
    // 5. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, config.http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
