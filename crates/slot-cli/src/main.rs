//! `slot` CLI: find an open slot for a task in a calendar export.
//!
//! ## Usage
//!
//! ```sh
//! # First 2-hour slot in the next sprint (default: 14 days from today)
//! slot find --calendar events.json --duration 2
//!
//! # Afternoon slot between two dates, reading the calendar from stdin
//! cat events.json | slot find -d 1.5 -p afternoon --from 2026-03-16 --to 2026-03-22
//!
//! # Use a configuration file and emit the event body for the task
//! slot find -c events.json -d 3 --config slot.toml --summary "Write report"
//!
//! # Show the free gaps of one day
//! slot gaps -c events.json --date 2026-03-16 --work-start 8 --work-end 18
//! ```

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Weekday};
use clap::{Parser, Subcommand};
use serde_json::json;
use slot_engine::{
    compute_gaps, parse_calendar, BusySource, InMemoryCalendar, Preference, SchedulerConfig,
    TaskEvent, WorkWindow,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slot",
    version,
    about = "Find an open calendar slot for a task across a sprint"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log scheduling decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Settings shared by every subcommand that reads a calendar.
#[derive(clap::Args)]
struct CalendarArgs {
    /// Event listing JSON (reads from stdin if omitted)
    #[arg(short, long)]
    calendar: Option<String>,
    /// Scheduler configuration TOML
    #[arg(long)]
    config: Option<String>,
    /// First schedulable hour of a day (overrides config)
    #[arg(long)]
    work_start: Option<u32>,
    /// Hour the work day closes (overrides config)
    #[arg(long)]
    work_end: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the first slot for a task across a sprint
    Find {
        #[command(flatten)]
        calendar: CalendarArgs,
        /// Task length in hours (fractions allowed)
        #[arg(short, long)]
        duration: f64,
        /// Scheduling preference: none, morning or afternoon (overrides config)
        #[arg(short, long)]
        preference: Option<Preference>,
        /// First sprint day (defaults to today in the configured time zone)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last sprint day (defaults to the configured sprint length)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Comma-separated weekdays never scheduled on, or "none" (overrides config)
        #[arg(long)]
        exclude: Option<String>,
        /// Print the event body for a task with this summary instead of the bare slot
        #[arg(long)]
        summary: Option<String>,
    },
    /// List the free gaps of one day's work window
    Gaps {
        #[command(flatten)]
        calendar: CalendarArgs,
        /// Day to inspect
        #[arg(long)]
        date: NaiveDate,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Find {
            calendar,
            duration,
            preference,
            from,
            to,
            exclude,
            summary,
        } => {
            let mut config = load_config(&calendar)?;
            if let Some(preference) = preference {
                config.preference = preference;
            }
            if let Some(raw) = exclude.as_deref() {
                config.excluded_weekdays = parse_weekdays(raw)?;
            }
            config.validate().context("Invalid scheduler configuration")?;

            let sprint_start = match from {
                Some(date) => date,
                None => config.today()?,
            };
            let mut request = config.request_for(duration, sprint_start)?;
            if let Some(to) = to {
                request.sprint_end = to;
            }
            debug!(?request, "scheduling request");

            let source = load_calendar(calendar.calendar.as_deref())?
                .upcoming_from(sprint_start.and_time(NaiveTime::MIN));
            let slot = config
                .walker(&source)
                .find_slot(&request)
                .context("Failed to find a slot")?;

            let output = match (slot, summary) {
                (Some(slot), Some(summary)) => {
                    serde_json::to_value(TaskEvent::for_slot(summary, &slot, config.time_zone()?))?
                }
                (Some(slot), None) => json!({
                    "status": "found",
                    "start": slot.start,
                    "end": slot.end,
                    "timeZone": config.time_zone,
                }),
                (None, _) => json!({ "status": "not_found" }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Gaps { calendar, date } => {
            let config = load_config(&calendar)?;
            let window = WorkWindow::new(date, config.work_start_hour, config.work_end_hour)?;
            let source = load_calendar(calendar.calendar.as_deref())?;
            let busy = source
                .query_busy(&window)
                .context("Failed to query busy intervals")?;

            let gaps: Vec<_> = compute_gaps(&busy, &window)
                .iter()
                .map(|gap| {
                    json!({
                        "start": gap.start,
                        "end": gap.end,
                        "minutes": gap.duration_minutes(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&gaps)?);
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `--verbose` wins over `RUST_LOG`; otherwise
/// `RUST_LOG` applies, defaulting to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Configuration from `--config` (or defaults) with work-hour flags applied.
fn load_config(args: &CalendarArgs) -> Result<SchedulerConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => SchedulerConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => SchedulerConfig::default(),
    };
    if let Some(hour) = args.work_start {
        config.work_start_hour = hour;
    }
    if let Some(hour) = args.work_end {
        config.work_end_hour = hour;
    }
    Ok(config)
}

fn load_calendar(path: Option<&str>) -> Result<InMemoryCalendar> {
    let json = read_input(path)?;
    let busy = parse_calendar(&json).context("Failed to parse calendar")?;
    debug!(events = busy.len(), "calendar loaded");
    Ok(InMemoryCalendar::new(busy))
}

/// Parse `--exclude`.
///
/// - `fri,sat` produces `[Fri, Sat]`
/// - `none` or an empty string produces no exclusions
fn parse_weekdays(raw: &str) -> Result<Vec<Weekday>> {
    if raw.trim().eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<Weekday>()
                .map_err(|_| anyhow::anyhow!("Unknown weekday: '{}'", part))
        })
        .collect()
}

/// Calendar JSON from `path`, or from stdin when no path is given.
fn read_input(path: Option<&str>) -> Result<String> {
    let Some(path) = path else {
        return io::read_to_string(io::stdin()).context("Failed to read calendar from stdin");
    };
    std::fs::read_to_string(path).with_context(|| format!("Failed to read calendar: {}", path))
}
