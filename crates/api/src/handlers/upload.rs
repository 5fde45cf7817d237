//! Handler for `POST /upload/`.
//!
//! Accepts one multipart part named `file`, checks that it is a PDF, and
//! streams it to the configured PDF directory under a fresh identifier.
//! Page extraction is not performed; `pages` is always empty.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use voice2pdf_core::pdf_upload::{self, UPLOAD_FIELD};

use crate::error::AppResult;
use crate::state::AppState;

/// Response body for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub upload_id: String,
    /// Placeholder for extracted page data.
    pub pages: Vec<serde_json::Value>,
}

/// POST /upload/
pub async fn upload_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        pdf_upload::validate_metadata(field.file_name(), field.content_type())?;

        let upload_id = pdf_upload::new_upload_id();
        let stored = state.pdf_store.save(upload_id, field).await?;

        tracing::info!(
            upload_id = %stored.upload_id,
            path = %stored.path.display(),
            size_bytes = stored.size_bytes,
            "PDF uploaded"
        );

        return Ok(Json(UploadResponse {
            upload_id: stored.upload_id.to_string(),
            pages: Vec::new(),
        }));
    }

    Err(pdf_upload::missing_file().into())
}
