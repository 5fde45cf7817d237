use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use voice2pdf_core::error::CoreError;
use voice2pdf_core::field_errors::NON_FIELD_ERRORS;

/// Message returned for every 5xx response. Details go to the log only.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
///
/// - field validation: `{ "<key>": ["<message>", ...] }`
/// - unreadable request bodies: `{ "non_field_errors": ["<message>"] }`
/// - everything else: `{ "error": "<message>" }`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `voice2pdf_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A JSON request body that could not be parsed into the expected shape.
    #[error(transparent)]
    JsonBody(#[from] JsonRejection),

    /// A request that is not a readable multipart body.
    #[error(transparent)]
    MultipartBody(#[from] MultipartRejection),

    /// A multipart part that could not be read.
    #[error(transparent)]
    Multipart(#[from] MultipartError),

    /// A path id that does not parse. No such entity can exist.
    #[error("Invalid {entity} id: {rejection}")]
    InvalidId {
        entity: &'static str,
        rejection: PathRejection,
    },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    error_body(StatusCode::NOT_FOUND, format!("{entity} not found"))
                }
                CoreError::InvalidFields(errors) => (
                    StatusCode::BAD_REQUEST,
                    serde_json::to_value(errors).unwrap_or_else(|_| json!({})),
                ),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Request body errors ---
            AppError::JsonBody(rejection) => {
                let status = match rejection.status() {
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, json!({ NON_FIELD_ERRORS: [rejection.body_text()] }))
            }
            AppError::MultipartBody(rejection) => (
                rejection.status(),
                json!({ NON_FIELD_ERRORS: [rejection.body_text()] }),
            ),
            AppError::Multipart(err) => {
                (err.status(), json!({ NON_FIELD_ERRORS: [err.body_text()] }))
            }

            // --- HTTP-specific errors ---
            AppError::InvalidId { entity, rejection } => {
                tracing::debug!(entity, error = %rejection, "Unparseable id in path");
                error_body(StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn error_body(status: StatusCode, message: String) -> (StatusCode, Value) {
    (status, json!({ "error": message }))
}

fn internal() -> (StatusCode, Value) {
    error_body(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
}

/// Classify a sqlx error into an HTTP status and JSON body.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, Value) {
    match err {
        sqlx::Error::RowNotFound => {
            error_body(StatusCode::NOT_FOUND, "Resource not found".to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
