//! Deadline-driven priority policy.
//!
//! Computes days remaining until a submission date, the suggested priority
//! tier, whether a user may override the stored priority, and the display
//! ordering of service records. Every function takes `today` explicitly.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Deadlines at most this many days away are suggested as High.
pub const SUGGEST_HIGH_MAX_DAYS: i64 = 7;

/// Deadlines at most this many days away are suggested as Medium.
pub const SUGGEST_MEDIUM_MAX_DAYS: i64 = 14;

/// With fewer days than this remaining, priority is forced to High and
/// cannot be edited.
///
/// Independent of [`SUGGEST_HIGH_MAX_DAYS`]: a deadline exactly 7 days out
/// is suggested High and also locked, while one 8 days out is suggested
/// Medium and editable. Do not derive one constant from the other.
pub const PRIORITY_LOCK_DAYS: i64 = 8;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Stored priority tier of a service record.
///
/// Defaults to Medium, the value the intake form preselects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Display rank. Higher ranks sort first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Lookup id matching the `priorities` seed data.
    pub fn id(self) -> i16 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid priority '{s}'. Must be one of: High, Medium, Low"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse a submission date from form input.
///
/// Accepts `YYYY-MM-DD`. An RFC 3339 timestamp is also accepted and reduced
/// to its calendar date so that a time of day can never leak into the day
/// arithmetic.
pub fn parse_submission_date(input: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(trimmed)
        .map(|ts| ts.date_naive())
        .map_err(|_| CoreError::InvalidDate(format!("'{input}' is not a YYYY-MM-DD date")))
}

/// Whole calendar days from `today` until `submission_date`.
///
/// Negative once the deadline has passed, zero when it is due today.
pub fn days_until(submission_date: NaiveDate, today: NaiveDate) -> i64 {
    submission_date.signed_duration_since(today).num_days()
}

/// Advisory tier proposed when a deadline is first entered.
pub fn suggested_priority(submission_date: NaiveDate, today: NaiveDate) -> Priority {
    let days = days_until(submission_date, today);
    if days <= SUGGEST_HIGH_MAX_DAYS {
        Priority::High
    } else if days <= SUGGEST_MEDIUM_MAX_DAYS {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Whether a user may choose the priority for this deadline.
pub fn is_priority_editable(submission_date: NaiveDate, today: NaiveDate) -> bool {
    days_until(submission_date, today) >= PRIORITY_LOCK_DAYS
}

/// The priority that must be persisted: High inside the lock window,
/// otherwise whatever the user chose.
pub fn resolve_effective_priority(
    submission_date: NaiveDate,
    chosen: Priority,
    today: NaiveDate,
) -> Priority {
    if is_priority_editable(submission_date, today) {
        chosen
    } else {
        Priority::High
    }
}

/// Human-readable countdown shown next to a deadline.
pub fn days_remaining_label(days: i64) -> String {
    match days {
        d if d < 0 => format!("{} days overdue", d.unsigned_abs()),
        0 => "Due today".to_string(),
        1 => "1 day remaining".to_string(),
        d => format!("{d} days remaining"),
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// A record with a deadline and a stored priority.
pub trait Deadlined {
    fn priority(&self) -> Priority;
    fn submission_date(&self) -> NaiveDate;
}

/// Priority rank descending, then earliest deadline first.
pub fn compare_for_display<T: Deadlined + ?Sized>(a: &T, b: &T) -> Ordering {
    b.priority()
        .rank()
        .cmp(&a.priority().rank())
        .then_with(|| a.submission_date().cmp(&b.submission_date()))
}

/// Sort records for display. Stable: full ties keep their input order.
pub fn sort_for_display<T: Deadlined>(records: &mut [T]) {
    records.sort_by(|a, b| compare_for_display(a, b));
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// Everything the forms need to render feedback for a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAssessment {
    pub submission_date: NaiveDate,
    pub days_until: i64,
    pub days_label: String,
    pub suggested_priority: Priority,
    pub priority_editable: bool,
    pub effective_priority: Priority,
}

pub fn assess(submission_date: NaiveDate, chosen: Priority, today: NaiveDate) -> PriorityAssessment {
    let days = days_until(submission_date, today);
    PriorityAssessment {
        submission_date,
        days_until: days,
        days_label: days_remaining_label(days),
        suggested_priority: suggested_priority(submission_date, today),
        priority_editable: is_priority_editable(submission_date, today),
        effective_priority: resolve_effective_priority(submission_date, chosen, today),
    }
}
