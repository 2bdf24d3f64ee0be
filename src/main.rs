use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use fullstack_api::api::{coffee_router, listings_router, trivia_router, AppState};
use fullstack_api::auth::JwtVerifier;
use fullstack_api::config::Config;
use fullstack_api::infrastructure::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fullstack_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    tracing::info!("Connecting to database...");
    let pool = db::connect(&config.database_url, config.database_max_connections)
        .await
        .context("failed to open database")?;

    let verifier = Arc::new(JwtVerifier::new(
        config.jwt_secret.clone(),
        config.jwt_audience.clone(),
    ));
    let state = AppState::new(pool, verifier);

    let listings = tokio::net::TcpListener::bind(config.listings_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.listings_addr()))?;
    let trivia = tokio::net::TcpListener::bind(config.trivia_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.trivia_addr()))?;
    let coffee = tokio::net::TcpListener::bind(config.coffee_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.coffee_addr()))?;

    tracing::info!(addr = %config.listings_addr(), "listings app listening");
    tracing::info!(addr = %config.trivia_addr(), "trivia api listening");
    tracing::info!(addr = %config.coffee_addr(), "coffee shop api listening");

    tokio::try_join!(
        axum::serve(listings, listings_router(state.clone())).into_future(),
        axum::serve(trivia, trivia_router(state.clone())).into_future(),
        axum::serve(coffee, coffee_router(state)).into_future(),
    )
    .context("server failed")?;

    Ok(())
}
