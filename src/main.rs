//! Quack API - synthetic data backend for the Solana AI Hedge Syndicate frontend
//!
//! Serves vault statistics, user positions, governance proposals and agent
//! debate transcripts, all derived from one seeded ledger snapshot.
//!
//! Environment:
//!   QUACK_BIND_ADDR - Interface to bind (default: 0.0.0.0)
//!   PORT - Listen port (default: 8000)
//!   QUACK_LEDGER_SEED - Ledger seed (default: 42)
//!   VERCEL_URL / VERCEL / ENVIRONMENT - CORS origin policy

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quack_backend::{
    api::{self, AppState},
    config::{CorsOrigins, ServerConfig},
    ledger::{LedgerParams, LedgerSnapshot},
};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let config = ServerConfig::parse();
    info!("🦆 Quack API starting (v{})", api::API_VERSION);

    // Generated once, before the listener accepts anything; read-only afterwards.
    let ledger = Arc::new(LedgerSnapshot::build(LedgerParams::with_seed(config.seed)));
    let stats = ledger.aggregate_stats();
    info!(
        seed = ledger.seed(),
        win_rate = stats.win_rate,
        final_portfolio_value = ledger.final_portfolio_value(),
        "📒 Ledger ready"
    );

    match config.cors_origins() {
        CorsOrigins::Any => info!("🌐 CORS: any origin"),
        CorsOrigins::List(origins) => info!(?origins, "🌐 CORS: explicit origins"),
    }

    let app = api::router(AppState::new(ledger), config.cors_layer());

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Quack API stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quack_backend=debug,quack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate's own .env when started from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
