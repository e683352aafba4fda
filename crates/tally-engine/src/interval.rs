//! Interval utilities -- duration, overlap-union totals, instance dedup.
//!
//! Pure helpers over event lists. The main aggregation path does not call
//! them; they stand alone for overlap-aware totals and defensive dedup of
//! exact repeated instances.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::event::CalendarEvent;

/// Duration of a single event in whole seconds, clamped to zero.
pub fn duration_seconds(event: &CalendarEvent) -> i64 {
    (event.end - event.start).num_seconds().max(0)
}

/// Drop events that repeat an identical `(identifier, start, end)` triple.
///
/// The identifier is `external_id`, falling back to `instance_id`, falling
/// back to `"NA"`. Timestamps compare at whole-second resolution. The first
/// occurrence of each key wins; survivor order follows the input.
pub fn dedup_by_instance(events: &[CalendarEvent]) -> Vec<CalendarEvent> {
    let mut seen: HashSet<String> = HashSet::new();
    events
        .iter()
        .filter(|e| {
            let uid = e
                .external_id
                .as_deref()
                .or(e.instance_id.as_deref())
                .unwrap_or("NA");
            let key = format!("{}|{}|{}", uid, e.start.timestamp(), e.end.timestamp());
            seen.insert(key)
        })
        .cloned()
        .collect()
}

/// Total covered time in seconds with overlaps counted once.
///
/// Zero- and negative-duration events are dropped, the rest are sorted by
/// start time (then end time for stability), and a single scan merges while
/// `next.start <= current.end`. Returns 0 for an empty input.
pub fn union_duration_seconds(events: &[CalendarEvent]) -> i64 {
    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = events
        .iter()
        .filter(|e| e.end > e.start)
        .map(|e| (e.start, e.end))
        .collect();

    if intervals.is_empty() {
        return 0;
    }

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut total = 0;
    let (mut current_start, mut current_end) = intervals[0];

    for &(start, end) in &intervals[1..] {
        if start <= current_end {
            // Overlapping or adjacent -- extend the current interval.
            current_end = current_end.max(end);
        } else {
            total += (current_end - current_start).num_seconds();
            current_start = start;
            current_end = end;
        }
    }

    total + (current_end - current_start).num_seconds()
}
