use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use country_lookup::config::load_config;
use country_lookup::server::{self, AppState};

fn find_config_path() -> PathBuf {
    let candidates = [PathBuf::from("config.yaml"), binary_dir().join("config.yaml")];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting country-lookup server");

    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    let state = Arc::new(AppState::from_config(&config)?);
    tracing::info!(
        countries_ttl_secs = config.cache.countries_ttl_secs,
        cities_ttl_secs = config.cache.cities_ttl_secs,
        cities_max_entries = config.cache.cities_max_entries,
        "Reference caches ready"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind to {addr}"))?;

    server::serve(listener, state).await?;

    Ok(())
}
