//! Raw event descriptors as handed over by the event-fetching layer.

use serde::{Deserialize, Serialize};

/// One calendar event before normalization.
///
/// Timed events carry RFC 3339 timestamps (`2026-03-02T09:00:00+01:00`);
/// all-day events carry calendar dates (`2026-03-02`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub all_day: bool,
}

impl RawEvent {
    pub fn timed(id: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            all_day: false,
        }
    }

    pub fn all_day(id: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            all_day: true,
        }
    }
}
