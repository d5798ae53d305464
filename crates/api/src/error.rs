use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coffeeshop_core::error::CoreError;
use coffeeshop_db::store::StoreError;
use serde_json::json;

use crate::auth::AuthError;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders the uniform envelope
/// `{ "success": false, "error": <status>, "message": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `coffeeshop_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Token verification or permission check failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A storage failure on a read path.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A storage failure while creating, updating or deleting.
    #[error("Write failed: {0}")]
    WriteFailed(StoreError),

    /// Malformed request body or headers.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route or resource matched.
    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const MSG_BAD_REQUEST: &str = "Bad Request";
const MSG_NOT_FOUND: &str = "Not found";
const MSG_UNPROCESSABLE: &str = "unprocessable";
const MSG_INTERNAL: &str = "Internal server error";

impl AppError {
    /// Wrap a storage error raised by a write operation.
    pub fn write(err: StoreError) -> Self {
        AppError::WriteFailed(err)
    }
}

/// Render the uniform error envelope.
fn error_envelope(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "success": false,
        "error": status.as_u16(),
        "message": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message): (StatusCode, &str, String) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "not_found", MSG_NOT_FOUND.into())
                }
                CoreError::Validation(msg) => {
                    tracing::warn!(reason = %msg, "Rejected invalid drink");
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "invalid_drink",
                        MSG_UNPROCESSABLE.into(),
                    )
                }
            },

            // --- Authorization ---
            AppError::Auth(auth) => (auth.status, auth.code, auth.description.clone()),

            // --- Storage ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    MSG_INTERNAL.into(),
                )
            }
            AppError::WriteFailed(err) => {
                let code = match err {
                    StoreError::DuplicateTitle(_) => {
                        tracing::warn!(error = %err, "Write rejected");
                        "duplicate_title"
                    }
                    StoreError::Database(_) => {
                        tracing::error!(error = %err, "Write failed");
                        "unprocessable"
                    }
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    code,
                    MSG_UNPROCESSABLE.into(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                tracing::debug!(reason = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, "bad_request", MSG_BAD_REQUEST.into())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", MSG_NOT_FOUND.into()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method_not_allowed",
                "Method not allowed".into(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    MSG_INTERNAL.into(),
                )
            }
        };

        error_envelope(status, code, &message)
    }
}

/// Well-formed JSON that does not describe a drink (missing `title`,
/// negative `parts`, ...) is unprocessable. Syntax errors and a missing or
/// wrong content type are bad requests.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                AppError::Core(CoreError::Validation(err.body_text()))
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

/// A path segment that does not parse (e.g. `/drinks/abc`) matches no drink.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Unparseable path");
        AppError::NotFound
    }
}
