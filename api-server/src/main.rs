//! CollectIQ API server binary

use std::net::SocketAddr;

use anyhow::Context;
use collectiq_api::{config, create_router, db, AppState, ModelRegistry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "collectiq_api=debug,collectiq_model=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("CollectIQ API starting...");
    tracing::info!("Database: {}", config.database_url);
    tracing::info!(
        "Risk thresholds: low < {}, high > {}",
        config.thresholds.low_risk, config.thresholds.high_risk
    );

    // Load models
    let models = ModelRegistry::from_config(&config)
        .context("Failed to load models")?;

    // Initialize database pool
    let pool = db::create_pool(&config.database_url, config.database_max_connections).await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await
        .context("Failed to run migrations")?;

    // Build application state
    let state = AppState {
        pool,
        config: config.clone(),
        models,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
