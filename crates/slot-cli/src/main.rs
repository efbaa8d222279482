//! `slots` CLI — find time that is free for every party in a set of schedules.
//!
//! ## Usage
//!
//! ```sh
//! # Common free slots for all parties (stdin → stdout, JSON)
//! slots free < schedule.json
//!
//! # Only slots of at least 45 minutes, at most 5 of them, as text
//! slots free -i schedule.json --min-duration 45 --limit 5 --format text
//!
//! # Free intervals of a single party
//! slots subtract -i party.json
//!
//! # Availability windows overlapping a range
//! slots overlap -i schedule.json --start 2024-11-20T00:00:00 --end 2024-11-20T23:59:00
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `-v` for more detail.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use serde::Serialize;
use slot_engine::schedule::TimeInterval;
use slot_engine::{
    find_common_slots, subtract, subtract_merged, FreeSlot, Interval, IntervalTree, Party,
    SlotRequest,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find time slots that are free for everyone"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find slots free for every party in a schedule file
    Free {
        /// Input JSON schedule (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Minimum slot length in minutes (overrides the schedule file)
        #[arg(long)]
        min_duration: Option<i64>,
        /// Maximum number of slots (overrides the schedule file)
        #[arg(long)]
        limit: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Remove a single party's busy blocks from its availability
    Subtract {
        /// Input JSON party (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Sweep busy blocks in the given order instead of sorting and merging them first
        #[arg(long)]
        raw: bool,
    },
    /// List availability windows overlapping a time range
    Overlap {
        /// Input JSON schedule (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Range start (RFC 3339, or naive local time read as UTC)
        #[arg(long, value_parser = parse_datetime)]
        start: DateTime<Utc>,
        /// Range end (RFC 3339, or naive local time read as UTC)
        #[arg(long, value_parser = parse_datetime)]
        end: DateTime<Utc>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Free {
            input,
            output,
            min_duration,
            limit,
            format,
        } => {
            let raw = read_input(input.as_deref())?;
            let mut request: SlotRequest =
                serde_json::from_str(&raw).context("Failed to parse schedule JSON")?;
            if min_duration.is_some() {
                request.min_duration_minutes = min_duration;
            }
            if limit.is_some() {
                request.limit = limit;
            }
            info!("searching common free time for {} parties", request.parties.len());

            let slots = find_common_slots(&request).context("Failed to find common free slots")?;
            let rendered = match format {
                Format::Json => to_json(&slots)?,
                Format::Text => render_text(&slots),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Subtract { input, output, raw } => {
            let json = read_input(input.as_deref())?;
            let party: Party = serde_json::from_str(&json).context("Failed to parse party JSON")?;
            party.validate()?;

            let free = if raw {
                subtract(&party.available, &party.busy)
            } else {
                subtract_merged(&party.available, &party.busy)
            };
            debug!("party '{}': {} free intervals", party.id, free.len());
            write_output(output.as_deref(), &to_json(&free)?)?;
        }
        Commands::Overlap { input, start, end } => {
            if start > end {
                anyhow::bail!("--start ({}) must not be after --end ({})", start, end);
            }
            let json = read_input(input.as_deref())?;
            let request: SlotRequest =
                serde_json::from_str(&json).context("Failed to parse schedule JSON")?;

            let tree: IntervalTree<DateTime<Utc>> = request
                .parties
                .iter()
                .flat_map(|p| p.available.iter().copied())
                .collect();
            let mut hits: Vec<TimeInterval> = tree.query_interval(&Interval::new(start, end));
            hits.sort();
            debug!("{} of {} windows overlap", hits.len(), tree.len());
            write_output(None, &to_json(&hits)?)?;
        }
    }

    Ok(())
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (e.g. "2024-11-20T09:00:00+01:00") and naive local time
/// (e.g. "2024-11-20T09:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

/// One `start - end (N min)` line per slot.
fn render_text(slots: &[FreeSlot]) -> String {
    if slots.is_empty() {
        return "No common free slots\n".to_string();
    }
    slots
        .iter()
        .map(|slot| {
            format!(
                "{} - {} ({} min)\n",
                slot.start.to_rfc3339(),
                slot.end.to_rfc3339(),
                slot.duration_minutes
            )
        })
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
