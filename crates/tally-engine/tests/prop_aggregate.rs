//! Property-based tests for aggregation and the interval utilities.
//!
//! These verify invariants that should hold for *any* event list, not just
//! the specific examples in the per-module test files.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tally_engine::{
    aggregate_by_title, dedup_by_instance, duration_seconds, normalize_title,
    union_duration_seconds, CalendarEvent, DeductionTable,
};

// ---------------------------------------------------------------------------
// Strategies -- generate event lists with colliding titles and identifiers
// ---------------------------------------------------------------------------

fn arb_title() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("   ".to_string())),
        Just(Some("Standup".to_string())),
        Just(Some("standup".to_string())),
        Just(Some(" Deep Work ".to_string())),
        Just(Some("deep work".to_string())),
        Just(Some("MarryBrown Dandenong (PC)".to_string())),
        Just(Some("marrybrown dandenong (pc)".to_string())),
    ]
}

fn arb_id() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("ev-a".to_string())),
        Just(Some("ev-b".to_string())),
    ]
}

/// Events start within a two-week window; durations range from negative
/// (malformed input) to ten hours.
fn arb_event() -> impl Strategy<Value = CalendarEvent> {
    (
        arb_title(),
        0i64..14 * 86_400,
        -7_200i64..36_000,
        any::<bool>(),
        arb_id(),
        arb_id(),
    )
        .prop_map(|(title, offset, dur, is_all_day, external_id, instance_id)| {
            let start = base_time() + Duration::seconds(offset);
            CalendarEvent {
                title,
                start,
                end: start + Duration::seconds(dur),
                is_all_day,
                external_id,
                instance_id,
                calendar_id: None,
            }
        })
}

fn arb_events() -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec(arb_event(), 0..64)
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap()
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Group counts partition the filtered input
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn group_counts_sum_to_filtered_input(events in arb_events(), include_all_day in any::<bool>()) {
        let rules = DeductionTable::standard();
        let summary = aggregate_by_title(&events, include_all_day, &rules);

        let expected = events
            .iter()
            .filter(|e| include_all_day || !e.is_all_day)
            .count();
        let counted: usize = summary.groups.iter().map(|g| g.count).sum();
        prop_assert_eq!(counted, expected);

        // Keys are unique within a summary.
        let mut keys: Vec<&str> = summary.groups.iter().map(|g| g.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), summary.groups.len());
    }
}

// ---------------------------------------------------------------------------
// Property 2: Grand total equals the per-instance adjusted sum
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn grand_total_matches_instancewise_sum(events in arb_events()) {
        let rules = DeductionTable::standard();
        let summary = aggregate_by_title(&events, false, &rules);

        let expected: i64 = events
            .iter()
            .filter(|e| !e.is_all_day)
            .map(|e| {
                let key = normalize_title(e.title.as_deref());
                rules.adjusted_seconds(&key, duration_seconds(e))
            })
            .sum();

        prop_assert_eq!(summary.grand_total_seconds, expected);

        let group_sum: i64 = summary.groups.iter().map(|g| g.total_seconds).sum();
        prop_assert_eq!(summary.grand_total_seconds, group_sum);

        for group in &summary.groups {
            prop_assert!(group.total_seconds >= 0, "negative total for {:?}", group.key);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Groups come out sorted case-insensitively
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn groups_are_sorted_case_insensitively(events in arb_events()) {
        let summary = aggregate_by_title(&events, true, &DeductionTable::standard());

        for window in summary.groups.windows(2) {
            prop_assert!(
                window[0].display_title.to_lowercase() <= window[1].display_title.to_lowercase(),
                "groups out of order: {:?} before {:?}",
                window[0].display_title,
                window[1].display_title
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Union duration is bounded by the sum and by the span
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn union_bounded_by_sum_and_span(events in arb_events()) {
        let union = union_duration_seconds(&events);
        prop_assert!(union >= 0);

        let sum: i64 = events.iter().map(duration_seconds).sum();
        prop_assert!(union <= sum, "union {} exceeds sum {}", union, sum);

        // The union can never exceed the earliest-start-to-latest-end span
        // of the positive-duration events.
        let positive: Vec<&CalendarEvent> = events.iter().filter(|e| e.end > e.start).collect();
        if let (Some(min_start), Some(max_end)) = (
            positive.iter().map(|e| e.start).min(),
            positive.iter().map(|e| e.end).max(),
        ) {
            let span = (max_end - min_start).num_seconds();
            prop_assert!(union <= span, "union {} exceeds span {}", union, span);
        } else {
            prop_assert_eq!(union, 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Instance dedup is idempotent and never grows the list
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn dedup_is_idempotent(events in arb_events()) {
        let once = dedup_by_instance(&events);
        prop_assert!(once.len() <= events.len());

        let twice = dedup_by_instance(&once);
        prop_assert_eq!(once, twice);
    }
}
