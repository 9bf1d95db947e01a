//! Repository for the `services` table.
//!
//! Rows are returned as [`ServiceRecord`]s in creation order. Display
//! ordering is the caller's job (see `clientdesk_core::priority`).

use clientdesk_core::intake::{NewService, ServiceUpdate};
use clientdesk_core::service::{ServiceFilter, ServiceRecord};
use clientdesk_core::types::EntityId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::service::{into_record, into_records, ServiceRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, client_name, service_name, work_name, submission_date, \
                       priority_id, status_id, created_at, updated_at";

/// Provides CRUD operations for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a service whose priority has already been resolved.
    pub async fn create(pool: &PgPool, input: &NewService) -> Result<ServiceRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let record = Self::insert_with(&mut tx, input).await?;
        tx.commit().await?;
        Ok(record)
    }

    pub(crate) async fn insert_with(
        tx: &mut Transaction<'_, Postgres>,
        input: &NewService,
    ) -> Result<ServiceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO services
                (id, client_id, client_name, service_name, work_name,
                 submission_date, priority_id, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ServiceRow>(&query)
            .bind(EntityId::new_v4())
            .bind(input.client_id)
            .bind(&input.client_name)
            .bind(input.service_name.as_str())
            .bind(&input.work_name)
            .bind(input.submission_date)
            .bind(input.priority.id())
            .bind(input.status.id())
            .fetch_one(&mut **tx)
            .await?;
        into_record(row)
    }

    /// Find a service by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<ServiceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, ServiceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(into_record)
            .transpose()
    }

    /// List services matching `filter`, oldest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ServiceFilter,
    ) -> Result<Vec<ServiceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services
             WHERE ($1::SMALLINT IS NULL OR priority_id = $1)
               AND ($2::SMALLINT IS NULL OR status_id = $2)
               AND ($3::UUID IS NULL OR client_id = $3)
               AND ($4::TEXT IS NULL OR client_name = $4)
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, ServiceRow>(&query)
            .bind(filter.priority.map(|p| p.id()))
            .bind(filter.status.map(|s| s.id()))
            .bind(filter.client_id)
            .bind(filter.client_name.as_deref())
            .fetch_all(pool)
            .await?;
        into_records(rows)
    }

    /// Overwrite the editable fields of a service.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &ServiceUpdate,
    ) -> Result<Option<ServiceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                work_name = $2,
                submission_date = $3,
                priority_id = $4,
                status_id = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRow>(&query)
            .bind(id)
            .bind(&input.work_name)
            .bind(input.submission_date)
            .bind(input.priority.id())
            .bind(input.status.id())
            .fetch_optional(pool)
            .await?
            .map(into_record)
            .transpose()
    }

    /// Delete a service. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
