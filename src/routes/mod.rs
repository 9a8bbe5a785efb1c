//! Rutas HTTP
//!
//! Ensambla el router completo de la aplicación con sus layers.

pub mod address_routes;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_middleware;
use crate::state::AppState;

/// Crear el router de la API con CORS y trazas de requests
pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/addresses", address_routes::create_address_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check simple
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "app_name": state.config.app_name,
        "version": state.config.version,
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
