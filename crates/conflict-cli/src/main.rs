//! `conflicts` CLI — annotate an already-fetched event list with scheduling conflicts.
//!
//! ## Usage
//!
//! ```sh
//! # Detect overlaps (stdin → stdout)
//! cat events.json | conflicts detect
//!
//! # Also flag meetings with less than 15 minutes between them
//! conflicts detect -i events.json --buffer-minutes 15
//!
//! # Resolve all-day dates in a specific zone and pretty-print to a file
//! conflicts detect -i events.json --timezone Europe/Berlin --pretty -o annotated.json
//! ```
//!
//! Input is a JSON array of events with `id`, `start`, `end` and optional
//! `all_day`. Any other fields are passed through untouched. Output is the
//! annotated list with `count`, `conflicts` and `has_conflicts`.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use conflict_engine::{CalendarEvent, DetectOptions, EventList, RawEvent};
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "conflicts",
    version,
    about = "Detect overlapping and insufficiently buffered calendar events"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a JSON event list with conflicts
    Detect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Minimum minutes required between meetings (0 disables buffer checks)
        #[arg(long, env = "CONFLICTS_BUFFER_MINUTES", default_value_t = 0)]
        buffer_minutes: u32,
        /// IANA timezone used to resolve events (e.g., "America/New_York")
        #[arg(long, env = "CONFLICTS_TIMEZONE", default_value = "UTC")]
        timezone: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Re-parse with --help to show usage (clap handles this)
            Cli::parse_from(["conflicts", "--help"]);
            unreachable!();
        }
    };

    match command {
        Commands::Detect {
            input,
            output,
            buffer_minutes,
            timezone,
            pretty,
        } => {
            let tz = parse_timezone(&timezone)?;
            let json = read_input(input.as_deref())?;
            let events: Vec<CalendarEvent> =
                serde_json::from_str(&json).context("Failed to parse event list JSON")?;
            tracing::debug!(events = events.len(), %timezone, buffer_minutes, "loaded events");

            let raw: Vec<RawEvent> = events.iter().map(|e| e.event.clone()).collect();
            let options = DetectOptions::with_buffer(buffer_minutes);
            let result = conflict_engine::detect_conflicts(&raw, tz, &options)
                .context("Failed to detect conflicts")?;

            if result.has_conflicts {
                tracing::info!(conflicts = result.conflicts.len(), "conflicts detected");
            }

            let list = EventList::new(events, result);
            let rendered = if pretty {
                serde_json::to_string_pretty(&list)?
            } else {
                serde_json::to_string(&list)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable JSON.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=warn,conflict_engine=warn", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| {
        anyhow::anyhow!(
            "Unknown timezone: '{}'. Use an IANA name such as 'UTC' or 'Europe/Berlin'",
            name
        )
    })
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
            println!("{}", content);
        }
    }
    Ok(())
}
