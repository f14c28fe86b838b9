//! Reference backend: an in-memory implementation of the asset API.
//!
//! Serves the same contract [`crate::client::HttpAssetApi`] speaks, so the
//! workspace can be run and tested end to end without the production
//! backend. All endpoints are mounted under `/api/v1`.

pub mod handlers;
pub mod history;
pub mod seed;
pub mod store;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

pub use history::{Actor, HistoryRecord};
pub use seed::seed_demo_data;
pub use store::{AssetRecord, AssetStore};

/// OpenAPI document of the reference backend.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "ParkSys Asset API",
        description = "Assets, maintenance records and server-authored history."
    ),
    paths(
        handlers::asset::register_asset,
        handlers::asset::list_assets,
        handlers::asset::get_asset,
        handlers::asset::update_asset,
        handlers::asset::delete_asset,
        handlers::maintenance::list_maintenance,
        handlers::maintenance::create_maintenance,
        handlers::history::list_history,
        handlers::system::health_handler,
    ),
    components(schemas(crate::error::ErrorResponse, crate::error::ErrorBody)),
    tags(
        (name = "Assets", description = "Asset registration and editing"),
        (name = "Maintenance", description = "Append-only maintenance records"),
        (name = "History", description = "Append-only audit history"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;

/// Builds the API router with all REST endpoints and the OpenAPI document.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    router
}

/// Builds the complete application: routes, middleware and state.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
