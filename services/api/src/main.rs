use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod middleware;
mod models;
mod rate_limiter;
mod repositories;
mod routes;
mod seed;
mod session;
mod state;
mod stats;
mod validation;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting ResidentialHub service");

    let config = config::ServerConfig::from_env();

    let state = AppState::new();

    if config.seed_demo_data {
        seed::seed_demo_data(&state).await?;
    }

    info!("ResidentialHub service initialized successfully");

    // Start the web server
    let app = routes::create_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("ResidentialHub service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
