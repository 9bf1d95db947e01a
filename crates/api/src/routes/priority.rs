use axum::routing::post;
use axum::Router;

use crate::handlers::priority;
use crate::state::AppState;

/// Routes mounted at `/priority`.
pub fn router() -> Router<AppState> {
    Router::new().route("/preview", post(priority::preview))
}
