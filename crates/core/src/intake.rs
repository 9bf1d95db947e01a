//! Form input for registering clients and editing services.
//!
//! Every path that sets a submission date or a priority goes through
//! [`resolve_effective_priority`](crate::priority::resolve_effective_priority)
//! here, so the persisted priority always honours the forcing rule.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::priority::{parse_submission_date, resolve_effective_priority, Priority};
use crate::service::{ServiceRecord, ServiceStatus, ServiceType};
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// One service row of the intake form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIntake {
    pub service_name: String,
    #[validate(length(min = 1, max = 500, message = "Work name is required"))]
    pub work_name: String,
    #[validate(length(min = 1, message = "Submission date is required"))]
    pub submission_date: String,
    /// Defaults to Medium when omitted.
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// A new client together with the services ordered for them.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientIntake {
    #[validate(length(min = 1, max = 200, message = "Client name is required"))]
    pub client_name: String,
    pub services: Vec<ServiceIntake>,
}

/// Body of `POST /services`: one service for an existing client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    pub client_id: EntityId,
    #[serde(flatten)]
    pub service: ServiceIntake,
    #[serde(default)]
    pub status: Option<ServiceStatus>,
}

/// Edit form payload. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChanges {
    #[validate(length(min = 1, max = 500, message = "Work name is required"))]
    pub work_name: Option<String>,
    pub submission_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<ServiceStatus>,
}

// ---------------------------------------------------------------------------
// Prepared output
// ---------------------------------------------------------------------------

/// A validated service ready to insert, with its priority already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    pub client_id: EntityId,
    pub client_name: String,
    pub service_name: ServiceType,
    pub work_name: String,
    pub submission_date: NaiveDate,
    pub priority: Priority,
    pub status: ServiceStatus,
}

/// A validated intake: the client row plus its services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedIntake {
    pub client_id: EntityId,
    pub client_name: String,
    pub services: Vec<NewService>,
}

/// Full replacement values for an existing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUpdate {
    pub work_name: String,
    pub submission_date: NaiveDate,
    pub priority: Priority,
    pub status: ServiceStatus,
}

// ---------------------------------------------------------------------------
// Preparation
// ---------------------------------------------------------------------------

impl ServiceIntake {
    fn normalized(&self) -> Self {
        Self {
            service_name: self.service_name.trim().to_string(),
            work_name: self.work_name.trim().to_string(),
            submission_date: self.submission_date.trim().to_string(),
            priority: self.priority,
        }
    }

    /// Validate and resolve into an insertable service for `client_id`.
    pub fn prepare(
        &self,
        client_id: EntityId,
        client_name: &str,
        status: ServiceStatus,
        today: NaiveDate,
    ) -> Result<NewService, CoreError> {
        let input = self.normalized();
        input.validate()?;

        let service_name: ServiceType = input.service_name.parse()?;
        let submission_date = parse_submission_date(&input.submission_date)?;
        let chosen = input.priority.unwrap_or_default();

        Ok(NewService {
            client_id,
            client_name: client_name.to_string(),
            service_name,
            work_name: input.work_name,
            submission_date,
            priority: resolve_effective_priority(submission_date, chosen, today),
            status,
        })
    }
}

impl ClientIntake {
    /// Validate the whole form and resolve every service's priority.
    ///
    /// New services always start `Active`.
    pub fn prepare(&self, client_id: EntityId, today: NaiveDate) -> Result<PreparedIntake, CoreError> {
        let client_name = self.client_name.trim().to_string();
        Self {
            client_name: client_name.clone(),
            services: Vec::new(),
        }
        .validate()?;

        if self.services.is_empty() {
            return Err(CoreError::Validation(
                "Select at least one service".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut services = Vec::with_capacity(self.services.len());
        for intake in &self.services {
            let prepared = intake.prepare(client_id, &client_name, ServiceStatus::Active, today)?;
            if !seen.insert(prepared.service_name) {
                return Err(CoreError::Validation(format!(
                    "Service '{}' is listed more than once",
                    prepared.service_name
                )));
            }
            services.push(prepared);
        }

        Ok(PreparedIntake {
            client_id,
            client_name,
            services,
        })
    }
}

impl CreateService {
    /// Validate and resolve without touching storage.
    ///
    /// The client name is left empty; attach the stored name with
    /// [`NewService::with_client_name`] once the client has been looked up.
    pub fn prepare(&self, today: NaiveDate) -> Result<NewService, CoreError> {
        self.service.prepare(
            self.client_id,
            "",
            self.status.unwrap_or_default(),
            today,
        )
    }
}

impl NewService {
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }
}

impl ServiceChanges {
    /// Merge the changes onto `current` and re-resolve the priority.
    ///
    /// The forcing rule is applied on every edit, even when neither the date
    /// nor the priority changed, since the lock window moves with `today`.
    pub fn apply(&self, current: &ServiceRecord, today: NaiveDate) -> Result<ServiceUpdate, CoreError> {
        let work_name = self.work_name.as_deref().map(str::trim).map(str::to_string);
        Self {
            work_name: work_name.clone(),
            ..Self::default()
        }
        .validate()?;

        let submission_date = match &self.submission_date {
            Some(raw) => parse_submission_date(raw)?,
            None => current.submission_date,
        };
        let chosen = self.priority.unwrap_or(current.priority);

        Ok(ServiceUpdate {
            work_name: work_name.unwrap_or_else(|| current.work_name.clone()),
            submission_date,
            priority: resolve_effective_priority(submission_date, chosen, today),
            status: self.status.unwrap_or(current.status),
        })
    }
}
