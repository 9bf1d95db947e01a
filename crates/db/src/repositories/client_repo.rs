//! Repository for the `clients` table.

use clientdesk_core::intake::PreparedIntake;
use clientdesk_core::service::ServiceRecord;
use clientdesk_core::types::EntityId;
use sqlx::PgPool;

use crate::models::client::Client;
use crate::repositories::ServiceRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a client unless one with the same id already exists.
    ///
    /// Returns the stored row and `true` when a new row was inserted.
    pub async fn create_if_absent(
        pool: &PgPool,
        id: EntityId,
        name: &str,
    ) -> Result<(Client, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (id, name) VALUES ($1, $2)
             ON CONFLICT (id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(client) => Ok((client, true)),
            None => {
                let existing = Self::find_by_id(pool, id)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((existing, false))
            }
        }
    }

    /// Insert a client and all of its services in one transaction.
    pub async fn create_with_services(
        pool: &PgPool,
        intake: &PreparedIntake,
    ) -> Result<(Client, Vec<ServiceRecord>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO clients (id, name) VALUES ($1, $2) RETURNING {COLUMNS}");
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(intake.client_id)
            .bind(&intake.client_name)
            .fetch_one(&mut *tx)
            .await?;

        let mut services = Vec::with_capacity(intake.services.len());
        for service in &intake.services {
            services.push(ServiceRepo::insert_with(&mut tx, service).await?);
        }

        tx.commit().await?;
        tracing::debug!(
            client_id = %client.id,
            service_count = services.len(),
            "Intake transaction committed"
        );
        Ok((client, services))
    }

    /// Find a client by id.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all clients, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY created_at, id");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Delete a client. Its services go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
