//! Group events by normalized title and total their adjusted durations.
//!
//! The engine is pure and stateless: events in, ordered summary out.
//! All-day filtering, per-instance deduction, display-title selection, and
//! ordering all happen here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::deduction::DeductionTable;
use crate::event::CalendarEvent;
use crate::interval::duration_seconds;
use crate::title::{capitalize_words, normalize_title, UNTITLED};

/// Aggregated totals for all events sharing a normalized title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleGroup {
    /// Normalized title -- the group's stable identity, unique per summary.
    pub key: String,
    /// Human-presentable title, taken from the group's first member when it
    /// has a usable title, else a capitalized form of the key.
    pub display_title: String,
    /// Number of member event instances.
    pub count: usize,
    /// Sum of member adjusted durations.
    pub total_seconds: i64,
}

/// Ordered groups plus the running grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSummary {
    /// Groups sorted by display title, case-insensitive ascending.
    pub groups: Vec<TitleGroup>,
    /// Sum of all groups' `total_seconds`.
    pub grand_total_seconds: i64,
}

/// Per-instance diagnostic record emitted through the trace hook.
///
/// Emitted once for every instance whose title carries a deduction policy,
/// whether or not the deduction fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceTrace {
    /// Normalized title of the instance.
    pub key: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Duration before adjustment, clamped at zero.
    pub raw_seconds: i64,
    /// Duration after adjustment.
    pub adjusted_seconds: i64,
}

impl InstanceTrace {
    /// Whether the deduction actually fired for this instance.
    pub fn deduction_applied(&self) -> bool {
        self.adjusted_seconds != self.raw_seconds
    }
}

/// Aggregate events into per-title groups.
///
/// Steps: drop all-day events unless `include_all_day`; bucket the rest by
/// [`normalize_title`]; adjust each instance's duration through `rules`;
/// synthesize one [`TitleGroup`] per bucket; sort groups by display title,
/// case-insensitive ascending. Every filtered event lands in exactly one
/// group, and the grand total equals the sum of group totals.
///
/// An empty input yields an empty summary with a grand total of 0 -- a
/// selection that matches nothing is a valid result, not an error.
pub fn aggregate_by_title(
    events: &[CalendarEvent],
    include_all_day: bool,
    rules: &DeductionTable,
) -> TitleSummary {
    aggregate_by_title_traced(events, include_all_day, rules, |_| {})
}

/// Aggregate events into per-title groups, reporting each policy-bearing
/// instance through `trace`.
///
/// Identical to [`aggregate_by_title`] except that every instance whose
/// normalized title has an entry in `rules` produces one [`InstanceTrace`]
/// callback before its group is synthesized.
pub fn aggregate_by_title_traced(
    events: &[CalendarEvent],
    include_all_day: bool,
    rules: &DeductionTable,
    mut trace: impl FnMut(&InstanceTrace),
) -> TitleSummary {
    // Bucket by normalized title. Member order within a bucket follows the
    // input, so the first member is the first occurrence.
    let mut buckets: HashMap<String, Vec<&CalendarEvent>> = HashMap::new();
    for event in events {
        if !include_all_day && event.is_all_day {
            continue;
        }
        buckets
            .entry(normalize_title(event.title.as_deref()))
            .or_default()
            .push(event);
    }

    let mut groups: Vec<TitleGroup> = buckets
        .into_iter()
        .map(|(key, members)| {
            let display_title = display_title_for(&key, &members);
            let traced = rules.policy_for(&key).is_some();

            let mut total_seconds = 0;
            for event in &members {
                let raw = duration_seconds(event);
                let adjusted = rules.adjusted_seconds(&key, raw);
                total_seconds += adjusted;

                if traced {
                    trace(&InstanceTrace {
                        key: key.clone(),
                        start: event.start,
                        end: event.end,
                        raw_seconds: raw,
                        adjusted_seconds: adjusted,
                    });
                }
            }

            TitleGroup {
                display_title,
                count: members.len(),
                total_seconds,
                key,
            }
        })
        .collect();

    // Case-insensitive lexicographic order on the presentable title.
    groups.sort_by_key(|g| g.display_title.to_lowercase());

    let grand_total_seconds = groups.iter().map(|g| g.total_seconds).sum();

    TitleSummary {
        groups,
        grand_total_seconds,
    }
}

/// Pick the presentable title for a bucket.
///
/// The first member's trimmed raw title wins when non-empty. Otherwise the
/// untitled sentinel passes through as-is and any other key is capitalized.
fn display_title_for(key: &str, members: &[&CalendarEvent]) -> String {
    if let Some(first) = members.first() {
        if let Some(title) = first.title.as_deref() {
            let trimmed = title.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    if key == UNTITLED {
        UNTITLED.to_string()
    } else {
        capitalize_words(key)
    }
}
