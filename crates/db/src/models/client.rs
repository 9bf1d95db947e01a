//! Client entity model and DTOs.

use clientdesk_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: EntityId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for registering a client.
///
/// `id` may be minted by the caller; creating the same id twice returns the
/// stored client instead of failing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    pub id: Option<EntityId>,
    pub name: String,
}
