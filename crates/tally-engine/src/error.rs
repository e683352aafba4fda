//! Error types for tally-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    /// The caller supplied a range whose end does not follow its start.
    #[error("end date {end} must be after start date {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The event list input was not a valid JSON array of events.
    #[error("event list parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TallyError>;
