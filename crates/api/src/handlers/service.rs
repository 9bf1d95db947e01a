//! Handlers for the `/services` resource and the dashboard views.
//!
//! Every write re-resolves the stored priority against today's date before
//! it reaches the repository.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clientdesk_core::error::CoreError;
use clientdesk_core::intake::{CreateService, ServiceChanges};
use clientdesk_core::service::{
    client_names, display_views, group_by_client, ClientGroup, ServiceFilter, ServiceSummary,
    ServiceType, ServiceView,
};
use clientdesk_core::types::EntityId;
use clientdesk_db::repositories::{ClientRepo, ServiceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/services
///
/// Filters by `priority`, `status`, `clientId` and `clientName`, then
/// orders for display.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ServiceFilter>,
) -> AppResult<Json<Vec<ServiceView>>> {
    let records = ServiceRepo::list(&state.pool, &filter).await?;
    Ok(Json(display_views(records, state.today())))
}

/// POST /api/services
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<ServiceView>)> {
    let today = state.today();
    let prepared = input.prepare(today)?;

    let client = ClientRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: input.client_id,
        }))?;

    let record = ServiceRepo::create(&state.pool, &prepared.with_client_name(client.name)).await?;
    tracing::info!(
        service_id = %record.id,
        client_id = %record.client_id,
        priority = %record.priority,
        "Service created"
    );
    Ok((StatusCode::CREATED, Json(ServiceView::new(record, today))))
}

/// GET /api/services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ServiceView>> {
    let record = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ServiceView::new(record, state.today())))
}

/// PUT /api/services/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(changes): Json<ServiceChanges>,
) -> AppResult<Json<ServiceView>> {
    let today = state.today();
    let current = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let update = changes.apply(&current, today)?;
    if changes.priority.is_some_and(|chosen| chosen != update.priority) {
        tracing::debug!(
            service_id = %id,
            chosen = ?changes.priority,
            "Chosen priority overridden inside lock window"
        );
    }

    let record = ServiceRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(service_id = %id, priority = %record.priority, "Service updated");
    Ok(Json(ServiceView::new(record, today)))
}

/// DELETE /api/services/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    if ServiceRepo::delete(&state.pool, id).await? {
        tracing::info!(service_id = %id, "Service deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard header: counts plus the names for the client filter menu.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub counts: ServiceSummary,
    pub client_names: Vec<String>,
}

/// GET /api/services/summary
pub async fn summary(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SummaryResponse>>> {
    let records = ServiceRepo::list(&state.pool, &ServiceFilter::default()).await?;
    Ok(Json(DataResponse {
        data: SummaryResponse {
            counts: ServiceSummary::from_records(&records, state.today()),
            client_names: client_names(&records),
        },
    }))
}

/// GET /api/services/grouped
pub async fn grouped(
    State(state): State<AppState>,
    Query(filter): Query<ServiceFilter>,
) -> AppResult<Json<DataResponse<Vec<ClientGroup<ServiceView>>>>> {
    let records = ServiceRepo::list(&state.pool, &filter).await?;
    let views = display_views(records, state.today());
    Ok(Json(DataResponse {
        data: group_by_client(views, |v| v.record.client_name.as_str()),
    }))
}

/// GET /api/service-types
pub async fn service_types() -> Json<DataResponse<Vec<ServiceType>>> {
    Json(DataResponse {
        data: ServiceType::ALL.to_vec(),
    })
}
