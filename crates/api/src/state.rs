use std::sync::Arc;

use chrono::NaiveDate;
use clientdesk_core::clock::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: clientdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Reference date source for the priority policy.
    pub clock: Clock,
}

impl AppState {
    /// Today's date, read once per request and passed down explicitly.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
