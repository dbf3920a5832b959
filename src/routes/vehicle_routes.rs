use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::VehicleRecord;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(State(state): State<AppState>) -> Json<Vec<VehicleRecord>> {
    Json(state.repository.find_all().await)
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleRecord>, AppError> {
    let vehicle = state
        .repository
        .find_by_id(&id)
        .await
        .ok_or_else(|| not_found_error("Vehicle", &id))?;
    Ok(Json(vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<VehicleRecord>,
) -> Result<(StatusCode, Json<VehicleRecord>), AppError> {
    let vehicle = state.repository.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VehicleRecord>,
) -> Result<Json<VehicleRecord>, AppError> {
    let vehicle = state.repository.update(&id, request).await?;
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleRecord>>, AppError> {
    let deleted = state.repository.delete(&id).await?;
    Ok(Json(ApiResponse::success_with_message(
        deleted,
        "Vehicle deleted successfully".to_string(),
    )))
}
