// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No access token available")]
    NoToken,

    #[error("Failed to refresh access token")]
    RefreshFailed,

    #[error("Failed to fetch activities")]
    UpstreamFetch,

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Strava API error: {0}")]
    StravaApi(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NoToken => (
                StatusCode::UNAUTHORIZED,
                "no_token",
                Some(self.to_string()),
            ),
            AppError::RefreshFailed => (
                StatusCode::UNAUTHORIZED,
                "auth_refresh_failed",
                Some(self.to_string()),
            ),
            AppError::UpstreamFetch => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream_fetch_failed",
                Some(self.to_string()),
            ),
            AppError::ConfigMissing(name) => {
                tracing::error!(variable = %name, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "config_missing",
                    Some(self.to_string()),
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::StravaApi(msg) => {
                // Upstream bodies can carry athlete details; log them but never
                // echo them back to the client.
                tracing::error!(upstream = %msg, "Strava API error");
                (StatusCode::BAD_GATEWAY, "strava_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
