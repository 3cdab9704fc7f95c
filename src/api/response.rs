//! Response envelope shared by every endpoint: `{success, data?, message}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

/// 200 with data
pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    reply(StatusCode::OK, data, message)
}

/// 201 with the created record
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    reply(StatusCode::CREATED, data, message)
}

fn reply<T: Serialize>(status: StatusCode, data: T, message: impl Into<String>) -> Response {
    let body = Envelope {
        success: true,
        data: Some(data),
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

/// An error on its way out of a handler.
///
/// Client errors (400/404) carry their own message. Everything else is
/// logged and answered with the operation's generic message.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    fallback: &'static str,
}

impl ApiError {
    pub fn new(error: AppError, fallback: &'static str) -> Self {
        ApiError { error, fallback }
    }

    pub fn error(&self) -> &AppError {
        &self.error
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        ApiError::new(error, "Server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.error.is_client_error() {
            warn!("Rejected request: {}", self.error);
            self.error.to_string()
        } else {
            error!("{}: {}", self.fallback, self.error);
            self.fallback.to_string()
        };

        let body: Envelope<()> = Envelope {
            success: false,
            data: None,
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Attaches the generic user-facing message for an operation
pub trait OrReply<T> {
    fn or_reply(self, fallback: &'static str) -> Result<T, ApiError>;
}

impl<T> OrReply<T> for Result<T, AppError> {
    fn or_reply(self, fallback: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e, fallback))
    }
}
