use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Mount the upload route at root level.
///
/// Raises the request body limit to `max_upload_bytes` for this route only;
/// the framework default is far smaller than typical PDFs.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload/", post(upload::upload_pdf))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
