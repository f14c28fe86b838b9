//! REST endpoint handlers organized by resource.

pub mod asset;
pub mod history;
pub mod maintenance;
pub mod system;

use axum::Router;
use axum::http::HeaderMap;

use super::history::Actor;
use crate::app_state::AppState;

/// Header carrying the acting user's display name.
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Header carrying the acting user's username.
pub const USER_USERNAME_HEADER: &str = "x-user-username";

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(asset::routes())
        .merge(maintenance::routes())
        .merge(history::routes())
}

/// Reads the acting user from request headers, defaulting to the system
/// actor. Authentication is out of scope; the headers are trusted as sent.
pub(crate) fn actor_from(headers: &HeaderMap) -> Actor {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let fallback = Actor::default();
    Actor {
        name: read(USER_NAME_HEADER).unwrap_or(fallback.name),
        username: read(USER_USERNAME_HEADER).unwrap_or(fallback.username),
    }
}
