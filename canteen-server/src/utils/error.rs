//! Unified error handling
//!
//! Provides the application-level error type and response envelope:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! Engine errors carry their wire code through unchanged, so a client can
//! distinguish the recoverable races (`ITEM_TERMINAL`, `CONFLICT`: refresh
//! and retry) from hard failures.

use crate::orders::engine::EngineError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::order::CommandErrorCode;
use tracing::error;

/// Unified API response structure
///
/// ```json
/// {
///   "code": "OK",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code ("OK" on success)
    pub code: String,
    /// Message
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Identity errors ==========
    #[error("Actor identity required")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Request errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== Engine errors ==========
    #[error(transparent)]
    Engine(#[from] EngineError),

    // ========== System errors ==========
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Wire string for a command error code
fn code_str(code: CommandErrorCode) -> &'static str {
    match code {
        CommandErrorCode::InvalidInput => "INVALID_INPUT",
        CommandErrorCode::NotFound => "NOT_FOUND",
        CommandErrorCode::Forbidden => "FORBIDDEN",
        CommandErrorCode::InvalidState => "INVALID_STATE",
        CommandErrorCode::ItemTerminal => "ITEM_TERMINAL",
        CommandErrorCode::NothingToCancel => "NOTHING_TO_CANCEL",
        CommandErrorCode::Conflict => "CONFLICT",
        CommandErrorCode::PaymentPrecondition => "PAYMENT_PRECONDITION",
        CommandErrorCode::InternalError => "INTERNAL_ERROR",
    }
}

/// HTTP status for a command error code
fn code_status(code: CommandErrorCode) -> StatusCode {
    match code {
        CommandErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        CommandErrorCode::NotFound => StatusCode::NOT_FOUND,
        CommandErrorCode::Forbidden => StatusCode::FORBIDDEN,
        CommandErrorCode::InvalidState
        | CommandErrorCode::NothingToCancel
        | CommandErrorCode::PaymentPrecondition => StatusCode::UNPROCESSABLE_ENTITY,
        CommandErrorCode::ItemTerminal | CommandErrorCode::Conflict => StatusCode::CONFLICT,
        CommandErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone()),
            AppError::Engine(err) => {
                let code = err.code();
                let message = if code == CommandErrorCode::InternalError {
                    // Log but do not expose store internals
                    error!(error = %err, "Engine internal error");
                    "An internal error occurred".to_string()
                } else {
                    err.to_string()
                };
                (code_status(code), code_str(code), message)
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "OK".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

pub type AppResult<T> = Result<T, AppError>;
