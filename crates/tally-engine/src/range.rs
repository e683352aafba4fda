//! Caller-side date range scoping for calendar queries.
//!
//! Range validation belongs to the caller, not the aggregation engine: the
//! engine accepts whatever event list the caller materialized for a range.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::event::CalendarEvent;

/// The date range a calendar query is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Build a validated range.
    ///
    /// # Errors
    /// Returns [`TallyError::InvalidRange`] unless `end > start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(TallyError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar year containing `now`: January 1 00:00:00 through
    /// December 31 23:59:59 UTC.
    pub fn current_year(now: DateTime<Utc>) -> Self {
        let year = now.year();
        // Fixed UTC timestamps are always representable.
        let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(year, 12, 31, 23, 59, 59).unwrap();
        Self { start, end }
    }

    /// Whether `event` overlaps this range.
    ///
    /// Overlap, not containment: an event straddling either boundary is
    /// included, matching how calendar stores answer interval queries. An
    /// event that only touches a boundary does not overlap.
    pub fn contains_event(&self, event: &CalendarEvent) -> bool {
        event.start < self.end && event.end > self.start
    }
}
