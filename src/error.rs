//! Error types for both sides of the asset API contract.
//!
//! - [`ClientError`] is what the workspace surfaces to the UI. Its
//!   [`ErrorKind`] tells "your input was invalid" apart from "the server
//!   rejected this" and "we couldn't reach the server".
//! - [`ApiError`] is the reference backend's error, mapped to an HTTP
//!   status code and a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AssetId;
use crate::reconciler::{FieldConflict, FieldErrors, SessionError};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2002,
///     "message": "version conflict: expected 3, current 4",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Reference backend error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category           | HTTP Status                  |
/// |-----------|--------------------|------------------------------|
/// | 1000–1999 | Validation         | 400 Bad Request              |
/// | 2000–2999 | Not Found/Conflict | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server             | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Asset with the given ID was not found.
    #[error("asset not found: {0}")]
    AssetNotFound(AssetId),

    /// The write was based on a stale version of the asset.
    #[error("version conflict: expected {expected}, current {actual}")]
    VersionConflict {
        /// Version the client based its write on.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::AssetNotFound(_) => 2001,
            Self::VersionConflict { .. } => 2002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::AssetNotFound(_) => StatusCode::NOT_FOUND,
            Self::VersionConflict { .. } => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// Error category shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Form input failed local validation.
    Validation,
    /// The asset or a sub-resource does not exist.
    NotFound,
    /// The record changed concurrently.
    Conflict,
    /// Transport failure or timeout.
    Network,
    /// 5xx response.
    Server,
    /// The server rejected the input (non-conflict 4xx).
    Rejected,
    /// Illegal edit-session transition.
    Session,
}

/// Error surfaced by the asset workspace.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// Local schema validation failed; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The record changed underneath the user.
    #[error("conflict: {message}")]
    Conflict {
        /// Fields changed both locally and on the server, when known.
        conflicts: Vec<FieldConflict>,
        /// Human-readable message.
        message: String,
    },

    /// The server could not be reached or did not answer in time.
    #[error("network error: {0}")]
    Network(String),

    /// The server failed with a 5xx status.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message reported by the server.
        message: String,
    },

    /// The server refused the request as invalid.
    #[error("rejected by server ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message reported by the server.
        message: String,
    },

    /// The edit session was not in a state that allows the operation.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Network(_) => ErrorKind::Network,
            Self::Server { .. } => ErrorKind::Server,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Session(_) => ErrorKind::Session,
        }
    }

    /// Returns `true` if repeating the same request may succeed.
    ///
    /// Conflicts are not retryable as-is: the user must reload and reapply.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }

    /// Maps an error response from the backend.
    ///
    /// Request and gateway timeouts count as network errors.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => Self::NotFound(message),
            409 => Self::Conflict {
                conflicts: Vec::new(),
                message,
            },
            408 | 504 => Self::Network(format!("timed out ({status}): {message}")),
            500..=599 => Self::Server { status, message },
            _ => Self::Rejected { status, message },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return Self::Network(err.to_string());
        }
        if err.is_decode() {
            return Self::Server {
                status: err.status().map_or(200, |s| s.as_u16()),
                message: format!("malformed response: {err}"),
            };
        }
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), err.to_string()),
            None => Self::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_codes_and_statuses() {
        let conflict = ApiError::VersionConflict {
            expected: 3,
            actual: 4,
        };
        assert_eq!(conflict.error_code(), 2002);
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::AssetNotFound(AssetId::new(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidRequest("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn from_status_maps_taxonomy() {
        assert_eq!(ClientError::from_status(404, String::new()).kind(), ErrorKind::NotFound);
        assert_eq!(ClientError::from_status(409, String::new()).kind(), ErrorKind::Conflict);
        assert_eq!(ClientError::from_status(503, String::new()).kind(), ErrorKind::Server);
        assert_eq!(ClientError::from_status(400, String::new()).kind(), ErrorKind::Rejected);
    }

    #[test]
    fn request_timeout_is_a_retryable_network_error() {
        let err = ClientError::from_status(408, "Request Timeout".to_string());
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
    }

    #[test]
    fn gateway_timeout_is_a_retryable_network_error() {
        let err = ClientError::from_status(504, "Gateway Timeout".to_string());
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
    }

    #[test]
    fn only_transport_and_server_errors_are_retryable() {
        assert!(ClientError::Network("timeout".to_string()).is_retryable());
        assert!(ClientError::from_status(500, String::new()).is_retryable());
        assert!(!ClientError::from_status(409, String::new()).is_retryable());
        assert!(!ClientError::Validation(FieldErrors::default()).is_retryable());
    }

    #[test]
    fn error_response_round_trips() {
        let body = ErrorResponse {
            error: ErrorBody {
                code: 2001,
                message: "asset not found: 9".to_string(),
                details: None,
            },
        };
        let json = serde_json::to_string(&body).unwrap_or_default();
        assert!(!json.contains("details"));
        let parsed = serde_json::from_str::<ErrorResponse>(&json).ok();
        assert_eq!(parsed.map(|r| r.error.code), Some(2001));
    }
}
