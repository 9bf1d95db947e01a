//! Handler for registering a client together with its services.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientdesk_core::intake::ClientIntake;
use clientdesk_core::service::{display_views, ServiceView};
use clientdesk_core::types::EntityId;
use clientdesk_db::models::client::Client;
use clientdesk_db::repositories::ClientRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    pub client: Client,
    pub services: Vec<ServiceView>,
}

/// POST /api/intake
///
/// Validates the whole form before writing anything; the client and all of
/// its services are then inserted in a single transaction.
pub async fn create(
    State(state): State<AppState>,
    Json(intake): Json<ClientIntake>,
) -> AppResult<(StatusCode, Json<IntakeResponse>)> {
    let today = state.today();
    let prepared = intake.prepare(EntityId::new_v4(), today)?;

    let (client, services) = ClientRepo::create_with_services(&state.pool, &prepared).await?;
    tracing::info!(
        client_id = %client.id,
        service_count = services.len(),
        "Client intake recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(IntakeResponse {
            client,
            services: display_views(services, today),
        }),
    ))
}
