use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use movement_archive::{config::Config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("movement_archive=info".parse()?),
        )
        .init();

    info!("Starting movement archive content server");

    // Load configuration from environment
    let config = Arc::new(Config::from_env()?);
    info!(
        "Content source: {}",
        if config.cms_enabled { "CMS" } else { "legacy API" }
    );

    let app = server::router(Arc::clone(&config));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
