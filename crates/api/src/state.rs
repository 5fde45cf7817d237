use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::PdfStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: voice2pdf_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Destination for uploaded PDFs.
    pub pdf_store: Arc<PdfStore>,
}
