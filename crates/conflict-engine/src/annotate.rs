//! Copy detection results back onto the events a presentation layer will render.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::conflict::{Conflict, DetectionResult};
use crate::event::RawEvent;

/// An event that can carry a list of conflicting event IDs.
pub trait Annotate {
    fn event_id(&self) -> &str;
    fn set_conflicts_with(&mut self, ids: Vec<String>);
}

/// A calendar event as displayed downstream.
///
/// Fields other than `id`, `start`, `end`, `all_day` and `conflicts_with` are kept
/// in `extra` in their original order, so annotating an event never drops data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(flatten)]
    pub event: RawEvent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalendarEvent {
    pub fn new(event: RawEvent) -> Self {
        Self {
            event,
            conflicts_with: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl From<RawEvent> for CalendarEvent {
    fn from(event: RawEvent) -> Self {
        Self::new(event)
    }
}

impl Annotate for CalendarEvent {
    fn event_id(&self) -> &str {
        &self.event.id
    }

    fn set_conflicts_with(&mut self, ids: Vec<String>) {
        self.conflicts_with = ids;
    }
}

/// Set every event's `conflicts_with` from the result's adjacency map.
///
/// Events with no entry get an empty list, so stale annotations from an earlier
/// run are cleared.
pub fn apply_to_events<T: Annotate>(events: &mut [T], result: &DetectionResult) {
    for event in events.iter_mut() {
        let ids = result.conflicts_for(event.event_id()).to_vec();
        event.set_conflicts_with(ids);
    }
}

/// Annotated events plus the flat conflict list, ready to serialize for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventList {
    pub events: Vec<CalendarEvent>,
    pub count: usize,
    pub conflicts: Vec<Conflict>,
    pub has_conflicts: bool,
}

impl EventList {
    /// Annotate `events` with `result` and wrap both into one envelope.
    pub fn new(mut events: Vec<CalendarEvent>, result: DetectionResult) -> Self {
        apply_to_events(&mut events, &result);
        Self {
            count: events.len(),
            events,
            conflicts: result.conflicts,
            has_conflicts: result.has_conflicts,
        }
    }
}
