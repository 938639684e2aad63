//! Dashboard server entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use data_loader::CatalogIndex;
use server::{serve, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,data_loader=debug")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Starting catalog dashboard");

    let index = CatalogIndex::load_with_delimiter(&config.data_file, config.delimiter_byte()?)
        .with_context(|| format!("Failed to load catalog from {}", config.data_file.display()))?;
    let counts = index.counts();
    info!(
        "Catalog loaded: {} titles ({} movies, {} TV shows)",
        counts.total, counts.movies, counts.tv_shows
    );

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    let state = Arc::new(AppState::new(Arc::new(index), config.top_n));
    serve(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await?;

    Ok(())
}
