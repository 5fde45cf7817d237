use axum::routing::{get, post};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Mount template routes (intended for nesting under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/templates/", post(templates::create_template))
        .route(
            "/templates/{id}/",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
}
