// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mapping of API errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mapd_api::{ApiError, FieldError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
    /// Messages to show next to form fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldErrorResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorResponse {
    fn from(err: FieldError) -> Self {
        Self {
            field: err.field,
            message: err.message,
        }
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
    /// Field errors of a rejected form.
    pub errors: Vec<FieldError>,
}

impl HttpError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        let message: String = message.into();
        error!(error = %message, "Internal error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            errors: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            errors: self.errors.into_iter().map(FieldErrorResponse::from).collect(),
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        let (status, errors): (StatusCode, Vec<FieldError>) = match err {
            ApiError::AuthenticationFailed { .. } => (StatusCode::UNAUTHORIZED, Vec::new()),
            ApiError::Unauthorized { .. } => (StatusCode::FORBIDDEN, Vec::new()),
            ApiError::ValidationFailed { errors } => (StatusCode::UNPROCESSABLE_ENTITY, errors),
            ApiError::PreconditionFailed { .. } => (StatusCode::BAD_REQUEST, Vec::new()),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, Vec::new()),
            ApiError::UpstreamFailure { message } => (
                StatusCode::BAD_GATEWAY,
                vec![FieldError::new("form", message)],
            ),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
            }
        };
        Self {
            status,
            message,
            errors,
        }
    }
}
