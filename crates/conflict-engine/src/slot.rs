//! Time-slot normalization -- converts raw event strings into timezone-resolved
//! intervals with exclusive-end semantics.
//!
//! Timed events are parsed as RFC 3339 and converted into the target zone.
//! All-day events are parsed as `YYYY-MM-DD` and pinned to local midnight. The
//! all-day end date is used as given: it is assumed to already be exclusive
//! (the day after the last included day), and no day is added or removed here.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{ConflictError, Result};
use crate::event::RawEvent;

const RFC3339_EXPECTED: &str = "RFC 3339 date-time with offset";
const DATE_EXPECTED: &str = "YYYY-MM-DD date";

/// A normalized event interval. `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    pub id: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub all_day: bool,
}

impl TimeSlot {
    pub fn new(id: impl Into<String>, start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            all_day: false,
        }
    }
}

/// Normalize raw events into time slots in the given timezone, preserving input order.
///
/// # Errors
/// Returns `ConflictError::Parse` for the first start or end value that does not
/// match the expected format. No partial list is returned.
pub fn normalize(events: &[RawEvent], tz: Tz) -> Result<Vec<TimeSlot>> {
    events.iter().map(|event| normalize_one(event, tz)).collect()
}

fn normalize_one(event: &RawEvent, tz: Tz) -> Result<TimeSlot> {
    let (start, end) = if event.all_day {
        (
            parse_date(&event.id, "start", &event.start, tz)?,
            parse_date(&event.id, "end", &event.end, tz)?,
        )
    } else {
        (
            parse_timestamp(&event.id, "start", &event.start, tz)?,
            parse_timestamp(&event.id, "end", &event.end, tz)?,
        )
    };

    Ok(TimeSlot {
        id: event.id.clone(),
        start,
        end,
        all_day: event.all_day,
    })
}

fn parse_timestamp(id: &str, field: &'static str, value: &str, tz: Tz) -> Result<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&tz))
        .map_err(|_| parse_error(id, field, value, RFC3339_EXPECTED))
}

fn parse_date(id: &str, field: &'static str, value: &str, tz: Tz) -> Result<DateTime<Tz>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| parse_error(id, field, value, DATE_EXPECTED))?;

    date.and_hms_opt(0, 0, 0)
        .and_then(|midnight| local_midnight(midnight, tz))
        .ok_or_else(|| parse_error(id, field, value, DATE_EXPECTED))
}

/// Resolve local midnight in `tz`.
///
/// Ambiguous midnights take the earlier instant. Midnights that fall in a DST gap
/// shift forward to the first valid local time after the gap.
fn local_midnight(midnight: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(&midnight).earliest() {
        return Some(dt);
    }

    // DST gaps are whole multiples of 15 minutes and never longer than two hours.
    (1..=8).find_map(|quarter| {
        tz.from_local_datetime(&(midnight + Duration::minutes(15 * quarter)))
            .earliest()
    })
}

fn parse_error(id: &str, field: &'static str, value: &str, expected: &'static str) -> ConflictError {
    ConflictError::Parse {
        id: id.to_string(),
        field,
        value: value.to_string(),
        expected,
    }
}
