pub mod health;
pub mod templates;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /templates/                 create (POST)
/// /templates/{id}/            get, replace fields, delete (GET, PUT, DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(templates::router())
}
