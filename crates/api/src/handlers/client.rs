//! Handlers for the `/clients` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientdesk_core::error::CoreError;
use clientdesk_core::service::{display_views, ServiceFilter, ServiceView};
use clientdesk_core::types::EntityId;
use clientdesk_db::models::client::{Client, CreateClient};
use clientdesk_db::repositories::{ClientRepo, ServiceRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Client",
        id,
    })
}

/// POST /api/clients
///
/// Registering an id that already exists returns the stored client with
/// 200 instead of 201.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Client name is required".to_string()).into());
    }
    let id = input.id.unwrap_or_else(EntityId::new_v4);

    let (client, inserted) = ClientRepo::create_if_absent(&state.pool, id, name).await?;
    let status = if inserted {
        tracing::info!(client_id = %client.id, "Client registered");
        StatusCode::CREATED
    } else {
        tracing::debug!(client_id = %client.id, "Client already registered");
        StatusCode::OK
    };
    Ok((status, Json(client)))
}

/// GET /api/clients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let clients = ClientRepo::list(&state.pool).await?;
    Ok(Json(clients))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(client))
}

/// DELETE /api/clients/{id}
///
/// Removes the client and every service recorded for it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    if ClientRepo::delete(&state.pool, id).await? {
        tracing::info!(client_id = %id, "Client and services deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/clients/{id}/services
pub async fn list_services(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Vec<ServiceView>>> {
    ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let filter = ServiceFilter {
        client_id: Some(id),
        ..ServiceFilter::default()
    };
    let records = ServiceRepo::list(&state.pool, &filter).await?;
    Ok(Json(display_views(records, state.today())))
}
