//! CollectIQ API Server
//!
//! Scores invoices for late-payment risk and keeps a log of every
//! prediction.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   COLLECTIQ API                      │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────────┐   ┌──────────┐  │
//! │  │  Routes    │──▶│ ModelRegistry  │   │ Policy   │  │
//! │  │  (Axum)    │   │  (v1, v2)      │   │ 0.3/0.7  │  │
//! │  └─────┬──────┘   └────────────────┘   └──────────┘  │
//! │        ▼                                             │
//! │  ┌────────────┐                                      │
//! │  │  SQLite    │  predictions (insert-only)           │
//! │  └────────────┘                                      │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registry;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};
pub use registry::ModelRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub config: config::Config,
    pub models: ModelRegistry,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/stats", get(handlers::stats::summary))
        .route("/feature-importance", get(handlers::importance::feature_importance))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
