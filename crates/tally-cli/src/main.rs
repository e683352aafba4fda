//! `tally` CLI -- per-title duration reports over calendar event lists.
//!
//! ## Usage
//!
//! ```sh
//! # Report per-title totals (stdin -> stdout)
//! cat events.json | tally report
//!
//! # Report from a file, scoped to one calendar and a date range
//! tally report -i events.json --calendar work \
//!     --from 2026-01-01T00:00:00Z --to 2026-12-31T23:59:59Z
//!
//! # Include all-day events, dedup exact repeated instances first
//! tally report -i events.json --include-all-day --dedup
//!
//! # Machine-readable summary
//! tally report -i events.json --json
//!
//! # Overlap-aware total (overlapping time counted once)
//! tally union -i events.json
//!
//! # List the calendars present in the event list
//! tally calendars -i events.json
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tally_engine::{
    aggregate_by_title_traced, dedup_by_instance, duration_seconds, format_hours_minutes,
    parse_events, union_duration_seconds, CalendarEvent, DateRange, DeductionTable, TitleSummary,
};

#[derive(Parser)]
#[command(name = "tally", version, about = "Per-title calendar duration reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group events by title and report count and total duration per title
    Report {
        /// Input JSON event list (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only include events from this calendar
        #[arg(long)]
        calendar: Option<String>,
        /// Range start, RFC 3339 (requires --to)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Range end, RFC 3339 (requires --from)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Include all-day events (excluded by default)
        #[arg(long)]
        include_all_day: bool,
        /// Drop exact repeated instances before aggregating
        #[arg(long)]
        dedup: bool,
        /// Emit the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Print per-instance deduction details to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Total covered time with overlapping events counted once
    Union {
        /// Input JSON event list (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only include events from this calendar
        #[arg(long)]
        calendar: Option<String>,
        /// Range start, RFC 3339 (requires --to)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Range end, RFC 3339 (requires --from)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Include all-day events (excluded by default)
        #[arg(long)]
        include_all_day: bool,
        /// Drop exact repeated instances before totalling
        #[arg(long)]
        dedup: bool,
    },
    /// List the distinct calendar identifiers present in the event list
    Calendars {
        /// Input JSON event list (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            calendar,
            from,
            to,
            include_all_day,
            dedup,
            json,
            verbose,
        } => {
            let events = load_events(input.as_deref())?;
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let events = scope_events(events, calendar.as_deref(), range, dedup);

            let rules = DeductionTable::standard();
            let summary = aggregate_by_title_traced(&events, include_all_day, &rules, |t| {
                if verbose {
                    let note = if t.deduction_applied() {
                        format!("adjusted to {:.2}h", t.adjusted_seconds as f64 / 3600.0)
                    } else {
                        "no deduction".to_string()
                    };
                    eprintln!(
                        "{}  {} -> {}  {:.2}h  {}",
                        t.key,
                        t.start.format("%Y-%m-%d %H:%M"),
                        t.end.format("%Y-%m-%d %H:%M"),
                        t.raw_seconds as f64 / 3600.0,
                        note
                    );
                }
            });

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_report(&summary, &rules);
            }
        }
        Commands::Union {
            input,
            calendar,
            from,
            to,
            include_all_day,
            dedup,
        } => {
            let events = load_events(input.as_deref())?;
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let mut events = scope_events(events, calendar.as_deref(), range, dedup);
            if !include_all_day {
                events.retain(|e| !e.is_all_day);
            }

            let union = union_duration_seconds(&events);
            let summed: i64 = events.iter().map(duration_seconds).sum();
            println!("Union duration: {}", format_hours_minutes(union));
            println!("Summed duration: {}", format_hours_minutes(summed));
        }
        Commands::Calendars { input } => {
            let events = load_events(input.as_deref())?;

            let mut calendars: Vec<String> = events
                .iter()
                .filter_map(|e| e.calendar_id.clone())
                .collect();
            calendars.sort_by_key(|c| c.to_lowercase());
            calendars.dedup();

            if calendars.is_empty() {
                println!("No calendars found.");
            } else {
                for calendar in calendars {
                    println!("{}", calendar);
                }
            }
        }
    }

    Ok(())
}

/// Read and deserialize the event list from a file or stdin.
fn load_events(path: Option<&str>) -> Result<Vec<CalendarEvent>> {
    let json = read_input(path)?;
    parse_events(&json).context("Failed to parse event list")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Build a validated range from the paired `--from`/`--to` flags.
fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>> {
    match (from, to) {
        (Some(from), Some(to)) => {
            let start = parse_timestamp(from)?;
            let end = parse_timestamp(to)?;
            let range = DateRange::new(start, end).context("Invalid date range")?;
            Ok(Some(range))
        }
        // clap enforces that the flags come as a pair.
        _ => Ok(None),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid RFC 3339 timestamp: {}", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

/// Apply caller-side scoping: calendar selection, date range overlap, and
/// optional defensive dedup. The engine itself sees only the survivors.
fn scope_events(
    events: Vec<CalendarEvent>,
    calendar: Option<&str>,
    range: Option<DateRange>,
    dedup: bool,
) -> Vec<CalendarEvent> {
    let events: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|e| calendar.is_none_or(|id| e.calendar_id.as_deref() == Some(id)))
        .filter(|e| range.is_none_or(|r| r.contains_event(e)))
        .collect();

    if dedup {
        dedup_by_instance(&events)
    } else {
        events
    }
}

/// Render the human-readable report table and status lines.
fn print_report(summary: &TitleSummary, rules: &DeductionTable) {
    for group in &summary.groups {
        println!(
            "{:<40} {:>5}  {}",
            group.display_title,
            format!("{}x", group.count),
            format_hours_minutes(group.total_seconds)
        );
    }

    if !summary.groups.is_empty() {
        println!();
    }
    println!("Found {} unique title(s).", summary.groups.len());

    for group in &summary.groups {
        if let Some(policy) = rules.policy_for(&group.key) {
            println!(
                "For \"{}\", deducted {} from each instance with duration >= {}.",
                group.display_title,
                hours_label(policy.deduction_seconds),
                hours_label(policy.threshold_seconds)
            );
        }
    }

    println!("Total: {}", format_hours_minutes(summary.grand_total_seconds));
}

/// Compact hour label for status lines: whole hours stay integral, anything
/// else keeps one decimal ("5h", "0.5h").
fn hours_label(seconds: i64) -> String {
    if seconds % 3600 == 0 {
        format!("{}h", seconds / 3600)
    } else {
        format!("{:.1}h", seconds as f64 / 3600.0)
    }
}
