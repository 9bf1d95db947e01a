pub mod clients;
pub mod health;
pub mod priority;
pub mod services;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                   service and database health
///
/// /clients                                  list, register
/// /clients/{id}                             get, delete (cascades to services)
/// /clients/{id}/services                    the client's services, display order
///
/// /intake                                   register client with services (POST)
///
/// /services                                 list (filtered, display order), create
/// /services/summary                         dashboard counts
/// /services/grouped                         display order grouped by client
/// /services/{id}                            get, update, delete
///
/// /service-types                            service catalog
///
/// /priority/preview                         deadline assessment for a form (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/clients", clients::router())
        .route("/intake", post(handlers::intake::create))
        .nest("/services", services::router())
        .route("/service-types", get(handlers::service::service_types))
        .nest("/priority", priority::router())
}
