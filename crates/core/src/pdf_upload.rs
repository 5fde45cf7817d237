//! Acceptance rules for uploaded PDF files.
//!
//! The client-declared filename and content type are checked first, before
//! any byte is written. The leading bytes are then matched against the PDF
//! signature so a renamed text file is refused even with correct metadata.

use std::path::Path;

use uuid::Uuid;

use crate::error::CoreError;
use crate::field_errors::FieldErrors;

/// Name of the multipart part carrying the document.
pub const UPLOAD_FIELD: &str = "file";

/// Message for any rejected file. Clients match on this exact string.
pub const MSG_ONLY_PDF: &str = "Only PDF files are allowed.";

/// Message for a request without a `file` part.
pub const MSG_NO_FILE: &str = "No file was submitted.";

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

pub const PDF_EXTENSION: &str = "pdf";

/// Every PDF starts with this header.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// True when `filename` ends in `.pdf`, ignoring ASCII case.
///
/// A bare `.pdf` (no stem) has no extension and is refused.
pub fn has_pdf_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}

/// True when the declared media type is `application/pdf`.
///
/// Parameters such as `; charset=binary` are ignored.
pub fn is_pdf_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|essence| essence.eq_ignore_ascii_case(PDF_CONTENT_TYPE))
}

/// True when `head` begins with [`PDF_SIGNATURE`].
pub fn has_pdf_signature(head: &[u8]) -> bool {
    head.starts_with(PDF_SIGNATURE)
}

/// Validate the metadata a client sent along with the file.
pub fn validate_metadata(filename: Option<&str>, content_type: Option<&str>) -> Result<(), CoreError> {
    let extension_ok = filename.is_some_and(has_pdf_extension);
    let content_type_ok = content_type.is_some_and(is_pdf_content_type);

    if extension_ok && content_type_ok {
        Ok(())
    } else {
        Err(rejected())
    }
}

/// Validate the first bytes of the body.
pub fn validate_signature(head: &[u8]) -> Result<(), CoreError> {
    if has_pdf_signature(head) {
        Ok(())
    } else {
        Err(rejected())
    }
}

/// Error for a request that carried no `file` part.
pub fn missing_file() -> CoreError {
    FieldErrors::single(UPLOAD_FIELD, MSG_NO_FILE).into()
}

fn rejected() -> CoreError {
    FieldErrors::single(UPLOAD_FIELD, MSG_ONLY_PDF).into()
}

/// Generate an identifier for a new upload.
pub fn new_upload_id() -> Uuid {
    Uuid::new_v4()
}

/// File name under which an upload is stored.
pub fn stored_file_name(upload_id: &Uuid) -> String {
    format!("{upload_id}.{PDF_EXTENSION}")
}
