//! Calendar event input model.
//!
//! Events arrive from an external calendar source already materialized in
//! memory. The engine treats them as read-only input; nothing here is
//! fetched or persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single event instance supplied by the caller.
///
/// `end >= start` is not guaranteed by input. Duration computations clamp
/// negative spans to zero rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Raw title as supplied by the source. May be missing or blank.
    #[serde(default)]
    pub title: Option<String>,
    /// Instance start time.
    pub start: DateTime<Utc>,
    /// Instance end time.
    pub end: DateTime<Utc>,
    /// Whether this is an all-day event.
    #[serde(default)]
    pub is_all_day: bool,
    /// Stable identifier assigned by the external source, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Identifier of this concrete instance. Recurring events share an
    /// `external_id` but carry distinct instance identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    /// Identifier of the calendar this event belongs to. Used only by
    /// caller-side selection; the engine ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
}

/// Parse a JSON array of events into a materialized list.
///
/// # Errors
/// Returns [`crate::TallyError::Parse`] if the input is not a valid JSON
/// array of event objects.
pub fn parse_events(json: &str) -> Result<Vec<CalendarEvent>> {
    Ok(serde_json::from_str(json)?)
}
