//! History handler.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::AssetId;
use crate::error::{ApiError, ErrorResponse};
use crate::server::history::HistoryRecord;

/// `GET /assets/{id}/history` — Read an asset's history.
///
/// # Errors
///
/// Returns [`ApiError::AssetNotFound`] if the asset does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}/history",
    tag = "History",
    summary = "Read asset history",
    description = "Returns the append-only history of an asset, oldest first. There is no write endpoint: records are appended by the server as a side effect of mutations.",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "History records", body = Vec<HistoryRecord>),
        (status = 404, description = "Asset not found", body = ErrorResponse),
    )
)]
pub async fn list_history(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    Ok(Json(state.store.history(id).await?))
}

/// History routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/assets/{id}/history", get(list_history))
}
