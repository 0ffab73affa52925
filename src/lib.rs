pub mod auth;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dates;
pub mod error;
pub mod middleware;
pub mod models;

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub config: config::Config,
}

impl AppState {
    /// Build the shared state. The pool connects lazily and a failed
    /// migration run is logged rather than fatal, so the server still comes
    /// up when the database is briefly unreachable; requests that need it
    /// answer 500 until it recovers.
    pub async fn new(config: config::Config) -> Result<Arc<Self>, sqlx::Error> {
        let db = database::Database::connect_lazy(&config.database.url, config.database.pool_size)?;

        if let Err(e) = db.run_migrations().await {
            error!("Migrations failed, continuing without them: {e}");
        }

        Ok(Arc::new(Self { db, config }))
    }
}

/// The full application router. Lives outside `main` so integration tests
/// drive exactly the tree the binary serves.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Azure Horizon Backend API" }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Route not found" })),
    )
}
