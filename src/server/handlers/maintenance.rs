//! Maintenance record handlers: list, create.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::actor_from;
use crate::app_state::AppState;
use crate::domain::{AssetId, MaintenanceRecord, NewMaintenanceRecord};
use crate::error::{ApiError, ErrorResponse};

/// `GET /assets/{id}/maintenances` — List maintenance records.
///
/// # Errors
///
/// Returns [`ApiError::AssetNotFound`] if the asset does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}/maintenances",
    tag = "Maintenance",
    summary = "List maintenance records",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Maintenance records in creation order", body = Vec<MaintenanceRecord>),
        (status = 404, description = "Asset not found", body = ErrorResponse),
    )
)]
pub async fn list_maintenance(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> Result<Json<Vec<MaintenanceRecord>>, ApiError> {
    Ok(Json(state.store.list_maintenance(id).await?))
}

/// `POST /assets/{id}/maintenances` — Record maintenance.
///
/// # Errors
///
/// Returns [`ApiError`] for unknown assets and invalid records.
#[utoipa::path(
    post,
    path = "/api/v1/assets/{id}/maintenances",
    tag = "Maintenance",
    summary = "Record maintenance",
    description = "Appends a maintenance record and a `maintenance` history record.",
    params(("id" = i64, Path, description = "Asset id")),
    request_body = NewMaintenanceRecord,
    responses(
        (status = 201, description = "Record created", body = MaintenanceRecord),
        (status = 400, description = "Invalid record", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
    )
)]
pub async fn create_maintenance(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
    headers: HeaderMap,
    Json(new): Json<NewMaintenanceRecord>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .store
        .create_maintenance(id, new, &actor_from(&headers))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Maintenance routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/assets/{id}/maintenances",
        get(list_maintenance).post(create_maintenance),
    )
}
