//! madang-rating - mahjong game record keeping service
//!
//! Records individual and team 4-player mahjong game results, serves a
//! small JSON API plus CSV export/import, and hosts the embedded web UI.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use madang_rating::config::Args;
use madang_rating::{build_router, db, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting madang-rating v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    info!("Database path: {}", args.database.display());

    // Open pool and run idempotent schema init (safe on every boot)
    let pool = db::connect(&args.database)
        .await
        .context("Failed to open database")?;
    info!("✓ Connected to database");

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("madang-rating listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
