/// Clients and services are keyed by UUIDs so callers can mint ids up front.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
