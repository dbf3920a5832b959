//! Rutas del backend de pruebas

pub mod vehicle_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Router completo: `/api/vehicles` más `/health`
pub fn create_app(state: AppState) -> Router {
    let cors = cors_for(&state.config);

    Router::new()
        .route("/health", get(health))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let vehicles = state.repository.len().await;
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
        "vehicles": vehicles,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
