//! Service row model.
//!
//! The table stores priority and status as lookup ids; [`ServiceRow`]
//! converts into [`ServiceRecord`] with the typed enums.

use chrono::NaiveDate;
use clientdesk_core::error::CoreError;
use clientdesk_core::priority::Priority;
use clientdesk_core::service::{ServiceRecord, ServiceStatus, ServiceType};
use clientdesk_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceRow {
    pub id: EntityId,
    pub client_id: EntityId,
    pub client_name: String,
    pub service_name: String,
    pub work_name: String,
    pub submission_date: NaiveDate,
    pub priority_id: i16,
    pub status_id: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ServiceRow> for ServiceRecord {
    type Error = CoreError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        let priority = Priority::from_id(row.priority_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "service {} has unknown priority id {}",
                row.id, row.priority_id
            ))
        })?;
        let status = ServiceStatus::from_id(row.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "service {} has unknown status id {}",
                row.id, row.status_id
            ))
        })?;
        let service_name: ServiceType = row
            .service_name
            .parse()
            .map_err(|_| {
                CoreError::Internal(format!(
                    "service {} has unknown service name '{}'",
                    row.id, row.service_name
                ))
            })?;

        Ok(ServiceRecord {
            id: row.id,
            client_id: row.client_id,
            client_name: row.client_name,
            service_name,
            work_name: row.work_name,
            submission_date: row.submission_date,
            priority,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Convert a batch of rows, surfacing the first bad row as a decode error.
pub(crate) fn into_records(rows: Vec<ServiceRow>) -> Result<Vec<ServiceRecord>, sqlx::Error> {
    rows.into_iter().map(into_record).collect()
}

pub(crate) fn into_record(row: ServiceRow) -> Result<ServiceRecord, sqlx::Error> {
    ServiceRecord::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
