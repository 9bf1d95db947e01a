//! Service records and the dashboard views derived from them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::priority::{self, Deadlined, Priority};
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Work status of a service. Only used for filtering, never for priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[default]
    Active,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 3] = [
        ServiceStatus::Active,
        ServiceStatus::Completed,
        ServiceStatus::OnHold,
    ];

    /// Lookup id matching the `service_statuses` seed data.
    pub fn id(self) -> i16 {
        match self {
            ServiceStatus::Active => 1,
            ServiceStatus::Completed => 2,
            ServiceStatus::OnHold => 3,
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceStatus::Active => "Active",
            ServiceStatus::Completed => "Completed",
            ServiceStatus::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: Active, Completed, On Hold"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Service catalog
// ---------------------------------------------------------------------------

/// The services the agency offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Branding,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "SEO")]
    Seo,
    #[serde(rename = "SMM")]
    Smm,
    #[serde(rename = "Google Ads")]
    GoogleAds,
    #[serde(rename = "Meta Ads")]
    MetaAds,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::Branding,
        ServiceType::WebDevelopment,
        ServiceType::Seo,
        ServiceType::Smm,
        ServiceType::GoogleAds,
        ServiceType::MetaAds,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Branding => "Branding",
            ServiceType::WebDevelopment => "Web Development",
            ServiceType::Seo => "SEO",
            ServiceType::Smm => "SMM",
            ServiceType::GoogleAds => "Google Ads",
            ServiceType::MetaAds => "Meta Ads",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|t| t.as_str()).collect();
                CoreError::Validation(format!(
                    "Unknown service '{s}'. Must be one of: {}",
                    names.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A piece of work being performed for a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: EntityId,
    pub client_id: EntityId,
    pub client_name: String,
    pub service_name: ServiceType,
    pub work_name: String,
    pub submission_date: NaiveDate,
    pub priority: Priority,
    pub status: ServiceStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Deadlined for ServiceRecord {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn submission_date(&self) -> NaiveDate {
        self.submission_date
    }
}

/// A service record with its deadline figures for a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceView {
    #[serde(flatten)]
    pub record: ServiceRecord,
    pub days_until: i64,
    pub days_label: String,
    pub priority_editable: bool,
    pub suggested_priority: Priority,
}

impl ServiceView {
    pub fn new(record: ServiceRecord, today: NaiveDate) -> Self {
        let days_until = priority::days_until(record.submission_date, today);
        Self {
            days_until,
            days_label: priority::days_remaining_label(days_until),
            priority_editable: priority::is_priority_editable(record.submission_date, today),
            suggested_priority: priority::suggested_priority(record.submission_date, today),
            record,
        }
    }
}

impl Deadlined for ServiceView {
    fn priority(&self) -> Priority {
        self.record.priority
    }

    fn submission_date(&self) -> NaiveDate {
        self.record.submission_date
    }
}

/// Build display-ordered views from records.
pub fn display_views(records: Vec<ServiceRecord>, today: NaiveDate) -> Vec<ServiceView> {
    let mut views: Vec<_> = records
        .into_iter()
        .map(|r| ServiceView::new(r, today))
        .collect();
    priority::sort_for_display(&mut views);
    views
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Dashboard filters. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFilter {
    pub priority: Option<Priority>,
    pub status: Option<ServiceStatus>,
    pub client_id: Option<EntityId>,
    pub client_name: Option<String>,
}

impl ServiceFilter {
    pub fn matches(&self, record: &ServiceRecord) -> bool {
        self.priority.map_or(true, |p| record.priority == p)
            && self.status.map_or(true, |s| record.status == s)
            && self.client_id.map_or(true, |id| record.client_id == id)
            && self
                .client_name
                .as_deref()
                .map_or(true, |name| record.client_name == name)
    }

    /// Keep only matching records, preserving order.
    pub fn apply(&self, records: Vec<ServiceRecord>) -> Vec<ServiceRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

// ---------------------------------------------------------------------------
// Dashboard aggregates
// ---------------------------------------------------------------------------

/// Headline counts for the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub active: usize,
    pub completed: usize,
    pub on_hold: usize,
    /// Past their deadline and not completed.
    pub overdue: usize,
}

impl ServiceSummary {
    pub fn from_records(records: &[ServiceRecord], today: NaiveDate) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.priority {
                Priority::High => summary.high += 1,
                Priority::Medium => summary.medium += 1,
                Priority::Low => summary.low += 1,
            }
            match record.status {
                ServiceStatus::Active => summary.active += 1,
                ServiceStatus::Completed => summary.completed += 1,
                ServiceStatus::OnHold => summary.on_hold += 1,
            }
            if record.status != ServiceStatus::Completed
                && priority::days_until(record.submission_date, today) < 0
            {
                summary.overdue += 1;
            }
        }
        summary
    }
}

/// Services belonging to one client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientGroup<T> {
    pub client_name: String,
    pub services: Vec<T>,
}

/// Group items by client name.
///
/// Groups appear in the order their first item appears, and items keep their
/// relative order, so grouping an already sorted list keeps it sorted.
pub fn group_by_client<T>(items: Vec<T>, client_name: impl Fn(&T) -> &str) -> Vec<ClientGroup<T>> {
    let mut groups: Vec<ClientGroup<T>> = Vec::new();
    for item in items {
        let name = client_name(&item);
        match groups.iter_mut().find(|g| g.client_name == name) {
            Some(group) => group.services.push(item),
            None => groups.push(ClientGroup {
                client_name: name.to_string(),
                services: vec![item],
            }),
        }
    }
    groups
}

/// Distinct client names, sorted, for the client filter menu.
pub fn client_names(records: &[ServiceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.client_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        priority::parse_submission_date(s).unwrap()
    }

    fn today() -> NaiveDate {
        date("2024-06-01")
    }

    fn record(client: &str, priority: Priority, status: ServiceStatus, d: &str) -> ServiceRecord {
        let now = Utc::now();
        ServiceRecord {
            id: EntityId::new_v4(),
            client_id: EntityId::new_v4(),
            client_name: client.to_string(),
            service_name: ServiceType::Seo,
            work_name: format!("{client} work"),
            submission_date: date(d),
            priority,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    // -----------------------------------------------------------------------
    // Enums
    // -----------------------------------------------------------------------

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_string(&ServiceStatus::OnHold).unwrap(), "\"On Hold\"");
        let parsed: ServiceStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(parsed, ServiceStatus::Completed);
    }

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(ServiceStatus::Active.id(), 1);
        assert_eq!(ServiceStatus::Completed.id(), 2);
        assert_eq!(ServiceStatus::OnHold.id(), 3);
        assert_eq!(ServiceStatus::from_id(3), Some(ServiceStatus::OnHold));
        assert_eq!(ServiceStatus::from_id(9), None);
    }

    #[test]
    fn status_from_str() {
        assert_eq!("on hold".parse::<ServiceStatus>().unwrap(), ServiceStatus::OnHold);
        assert_matches!("paused".parse::<ServiceStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn service_type_round_trips_through_display_name() {
        for t in ServiceType::ALL {
            assert_eq!(t.as_str().parse::<ServiceType>().unwrap(), t);
        }
        assert_eq!(
            serde_json::to_string(&ServiceType::WebDevelopment).unwrap(),
            "\"Web Development\""
        );
    }

    #[test]
    fn unknown_service_type_lists_catalog() {
        let err = "Podcasting".parse::<ServiceType>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Meta Ads"));
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    #[test]
    fn view_carries_deadline_figures() {
        let view = ServiceView::new(
            record("Acme", Priority::High, ServiceStatus::Active, "2024-06-05"),
            today(),
        );
        assert_eq!(view.days_until, 4);
        assert_eq!(view.days_label, "4 days remaining");
        assert!(!view.priority_editable);
        assert_eq!(view.suggested_priority, Priority::High);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["clientName"], "Acme");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["submissionDate"], "2024-06-05");
        assert_eq!(json["daysUntil"], 4);
    }

    #[test]
    fn display_views_are_sorted() {
        let views = display_views(
            vec![
                record("A", Priority::High, ServiceStatus::Active, "2024-07-01"),
                record("B", Priority::High, ServiceStatus::Active, "2024-06-15"),
                record("C", Priority::Medium, ServiceStatus::Active, "2024-06-01"),
            ],
            today(),
        );
        let names: Vec<_> = views.iter().map(|v| v.record.client_name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    // -----------------------------------------------------------------------
    // Filtering
    // -----------------------------------------------------------------------

    #[test]
    fn empty_filter_matches_everything() {
        let r = record("Acme", Priority::Low, ServiceStatus::OnHold, "2024-08-01");
        assert!(ServiceFilter::default().matches(&r));
    }

    #[test]
    fn filter_combines_fields() {
        let records = vec![
            record("Acme", Priority::High, ServiceStatus::Active, "2024-06-03"),
            record("Acme", Priority::High, ServiceStatus::Completed, "2024-06-04"),
            record("Globex", Priority::High, ServiceStatus::Active, "2024-06-05"),
            record("Acme", Priority::Low, ServiceStatus::Active, "2024-09-01"),
        ];
        let filter = ServiceFilter {
            priority: Some(Priority::High),
            status: Some(ServiceStatus::Active),
            client_name: Some("Acme".into()),
            ..ServiceFilter::default()
        };
        let kept = filter.apply(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].submission_date, date("2024-06-03"));
    }

    #[test]
    fn filter_by_client_id() {
        let a = record("Acme", Priority::High, ServiceStatus::Active, "2024-06-03");
        let b = record("Acme", Priority::High, ServiceStatus::Active, "2024-06-03");
        let filter = ServiceFilter {
            client_id: Some(a.client_id),
            ..ServiceFilter::default()
        };
        assert!(filter.matches(&a));
        assert!(!filter.matches(&b));
    }

    #[test]
    fn filter_deserializes_from_query_names() {
        let filter: ServiceFilter =
            serde_json::from_str(r#"{"priority":"Medium","status":"On Hold"}"#).unwrap();
        assert_eq!(filter.priority, Some(Priority::Medium));
        assert_eq!(filter.status, Some(ServiceStatus::OnHold));
        assert_eq!(filter.client_name, None);
    }

    // -----------------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------------

    #[test]
    fn summary_counts() {
        let records = vec![
            record("A", Priority::High, ServiceStatus::Active, "2024-05-30"),
            record("A", Priority::High, ServiceStatus::Completed, "2024-05-01"),
            record("B", Priority::Medium, ServiceStatus::OnHold, "2024-05-31"),
            record("C", Priority::Low, ServiceStatus::Active, "2024-07-01"),
        ];
        let summary = ServiceSummary::from_records(&records, today());
        assert_eq!(
            summary,
            ServiceSummary {
                total: 4,
                high: 2,
                medium: 1,
                low: 1,
                active: 2,
                completed: 1,
                on_hold: 1,
                overdue: 2,
            }
        );
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(ServiceSummary::from_records(&[], today()), ServiceSummary::default());
    }

    #[test]
    fn grouping_keeps_sorted_order() {
        let views = display_views(
            vec![
                record("Globex", Priority::Low, ServiceStatus::Active, "2024-08-01"),
                record("Acme", Priority::Medium, ServiceStatus::Active, "2024-06-20"),
                record("Globex", Priority::High, ServiceStatus::Active, "2024-06-02"),
                record("Acme", Priority::High, ServiceStatus::Active, "2024-06-03"),
            ],
            today(),
        );
        let groups = group_by_client(views, |v| v.record.client_name.as_str());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].client_name, "Globex");
        let globex: Vec<_> = groups[0].services.iter().map(|v| v.record.priority).collect();
        assert_eq!(globex, [Priority::High, Priority::Low]);
        assert_eq!(groups[1].client_name, "Acme");
        let acme: Vec<_> = groups[1].services.iter().map(|v| v.record.priority).collect();
        assert_eq!(acme, [Priority::High, Priority::Medium]);
    }

    #[test]
    fn client_names_sorted_and_unique() {
        let records = vec![
            record("Globex", Priority::Low, ServiceStatus::Active, "2024-08-01"),
            record("Acme", Priority::Low, ServiceStatus::Active, "2024-08-01"),
            record("Globex", Priority::Low, ServiceStatus::Active, "2024-08-01"),
        ];
        assert_eq!(client_names(&records), ["Acme", "Globex"]);
    }
}
