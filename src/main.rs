use std::sync::Arc;

use aparte_booking::api::HttpRentalApi;
use aparte_booking::config::Config;
use aparte_booking::{app, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aparte_booking=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let api = HttpRentalApi::new(&config.api)?;
    info!("Using rental API at {}", config.api.base_url);

    let state = AppState { api: Arc::new(api) };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Booking front end listening on {}", config.bind_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
