use std::sync::Arc;

use swfilms::{AppState, config::Config, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,swfilms=debug".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);
    tracing::info!(endpoint = %state.catalog.client().endpoint().collection_url(), "films service");

    if config.load_on_start {
        if let Err(err) = state.catalog.load().await {
            tracing::warn!(error = %err, "initial load failed, will retry on first visit");
        }
    }

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
