//! Asset CRUD handlers: register, list, get, update, delete.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::actor_from;
use crate::app_state::AppState;
use crate::domain::{Asset, AssetAttributes, AssetId, AssetUpdate};
use crate::error::{ApiError, ErrorResponse};

/// `POST /assets` — Register a new asset.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] for invalid attributes.
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    tag = "Assets",
    summary = "Register an asset",
    description = "Registers a new asset and appends a `creation` history record.",
    request_body = AssetAttributes,
    responses(
        (status = 201, description = "Asset registered", body = Asset),
        (status = 400, description = "Invalid attributes", body = ErrorResponse),
    )
)]
pub async fn register_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(attributes): Json<AssetAttributes>,
) -> Result<impl IntoResponse, ApiError> {
    let asset = state
        .store
        .register(attributes, &actor_from(&headers))
        .await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// `GET /assets` — List all assets.
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    tag = "Assets",
    summary = "List assets",
    description = "Returns every asset ordered by id.",
    responses(
        (status = 200, description = "Asset list", body = Vec<Asset>),
    )
)]
pub async fn list_assets(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.list().await)
}

/// `GET /assets/{id}` — Get one asset.
///
/// # Errors
///
/// Returns [`ApiError::AssetNotFound`] if the asset does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}",
    tag = "Assets",
    summary = "Get asset",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Current server copy", body = Asset),
        (status = 404, description = "Asset not found", body = ErrorResponse),
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> Result<Json<Asset>, ApiError> {
    Ok(Json(state.store.get(id).await?))
}

/// `PUT /assets/{id}` — Replace an asset's attributes.
///
/// # Errors
///
/// Returns [`ApiError`] for unknown assets, stale versions and invalid
/// attributes.
#[utoipa::path(
    put,
    path = "/api/v1/assets/{id}",
    tag = "Assets",
    summary = "Update asset",
    description = "Replaces the attributes of an asset if it is still at `expectedVersion`. Appends an `updated` record, one `modification` record per changed field and, when the asset is retired, a `retirement` record.",
    params(("id" = i64, Path, description = "Asset id")),
    request_body = AssetUpdate,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 400, description = "Invalid attributes", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 409, description = "Asset changed since `expectedVersion`", body = ErrorResponse),
    )
)]
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
    headers: HeaderMap,
    Json(update): Json<AssetUpdate>,
) -> Result<Json<Asset>, ApiError> {
    let asset = state
        .store
        .update(id, update.expected_version, update.asset, &actor_from(&headers))
        .await?;
    Ok(Json(asset))
}

/// `DELETE /assets/{id}` — Delete an asset.
///
/// # Errors
///
/// Returns [`ApiError::AssetNotFound`] if the asset does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/assets/{id}",
    tag = "Assets",
    summary = "Delete asset",
    description = "Irreversibly deletes an asset with its maintenance records and history.",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found", body = ErrorResponse),
    )
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Asset routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assets", get(list_assets).post(register_asset))
        .route(
            "/assets/{id}",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
}
