//! Source of "today" for the priority policy.
//!
//! Handlers read the clock once per request and pass the resulting date
//! down; the policy functions never look at the wall clock themselves.

use chrono::{NaiveDate, Utc};

/// Produces the reference date used for deadline arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Current UTC calendar date.
    #[default]
    System,
    /// A pinned date, for tests and reproducible demos.
    Fixed(NaiveDate),
}

impl Clock {
    /// The current calendar date, with any time of day discarded.
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}
