//! Route definitions for the `/services` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::service;
use crate::state::AppState;

/// Routes mounted at `/services`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /summary           -> summary
/// GET    /grouped           -> grouped
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service::list).post(service::create))
        .route("/summary", get(service::summary))
        .route("/grouped", get(service::grouped))
        .route(
            "/{id}",
            get(service::get_by_id)
                .put(service::update)
                .delete(service::delete),
        )
}
