//! API error type and its HTTP mapping

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use replyflow_core::AutomationError;
use thiserror::Error;

use crate::models::ApiResponse;

/// API error
#[derive(Error, Debug)]
pub enum ApiError {
    /// Registry error
    #[error(transparent)]
    Automation(#[from] AutomationError),

    /// Request body rejected at the boundary
    #[error("validation failed: {0}")]
    Validation(String),

    /// Webhook handshake with the wrong token
    #[error("Invalid verify token")]
    InvalidVerifyToken,

    /// Body that is not valid JSON for the endpoint
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),

    /// Unparseable query string
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),

    /// Unparseable path segment
    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Automation(AutomationError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Validation(_)
            | Self::InvalidVerifyToken
            | Self::Body(_)
            | Self::Query(_)
            | Self::Path(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Automation(AutomationError::NotFound(_)) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::InvalidVerifyToken => "invalid_verify_token",
            Self::Body(_) | Self::Query(_) | Self::Path(_) => "bad_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = ApiResponse::<()>::error(self.code(), &self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
