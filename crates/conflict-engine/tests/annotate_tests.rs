//! Tests for annotating events with their conflicts.

use chrono_tz::UTC;
use conflict_engine::{
    apply_to_events, detect_conflicts, Annotate, CalendarEvent, DetectOptions, DetectionResult,
    EventList, RawEvent,
};

fn events() -> Vec<RawEvent> {
    vec![
        RawEvent::timed("a", "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z"),
        RawEvent::timed("b", "2026-03-02T09:30:00Z", "2026-03-02T10:30:00Z"),
        RawEvent::timed("c", "2026-03-02T13:00:00Z", "2026-03-02T14:00:00Z"),
    ]
}

/// A minimal annotation target, to check the trait works for caller-owned types.
#[derive(Default)]
struct Row {
    id: String,
    flagged: Vec<String>,
}

impl Annotate for Row {
    fn event_id(&self) -> &str {
        &self.id
    }

    fn set_conflicts_with(&mut self, ids: Vec<String>) {
        self.flagged = ids;
    }
}

#[test]
fn events_receive_their_adjacency_entry() {
    let raw = events();
    let result = detect_conflicts(&raw, UTC, &DetectOptions::default()).unwrap();
    let mut annotated: Vec<CalendarEvent> = raw.into_iter().map(CalendarEvent::from).collect();

    apply_to_events(&mut annotated, &result);

    assert_eq!(annotated[0].conflicts_with, vec!["b"]);
    assert_eq!(annotated[1].conflicts_with, vec!["a"]);
    assert!(annotated[2].conflicts_with.is_empty());
}

#[test]
fn absent_ids_are_cleared() {
    let mut rows = vec![Row {
        id: "gone".to_string(),
        flagged: vec!["stale".to_string()],
    }];

    apply_to_events(&mut rows, &DetectionResult::default());

    assert!(rows[0].flagged.is_empty());
}

#[test]
fn custom_annotation_targets_supported() {
    let result = detect_conflicts(&events(), UTC, &DetectOptions::default()).unwrap();
    let mut rows = vec![
        Row {
            id: "b".to_string(),
            ..Row::default()
        },
        Row {
            id: "unrelated".to_string(),
            ..Row::default()
        },
    ];

    apply_to_events(&mut rows, &result);

    assert_eq!(rows[0].flagged, vec!["a"]);
    assert!(rows[1].flagged.is_empty());
}

#[test]
fn calendar_event_keeps_extra_fields_in_order() {
    let json = r#"{"id":"a","summary":"Standup","start":"2026-03-02T09:00:00Z","end":"2026-03-02T10:00:00Z","location":"Room 1","attendees":["x","y"]}"#;

    let mut event: CalendarEvent = serde_json::from_str(json).unwrap();
    event.set_conflicts_with(vec!["b".to_string()]);

    assert_eq!(event.event.id, "a");
    assert!(!event.event.all_day);
    let keys: Vec<&str> = event.extra.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["summary", "location", "attendees"]);

    let out = serde_json::to_value(&event).unwrap();
    assert_eq!(out["summary"], "Standup");
    assert_eq!(out["conflicts_with"], serde_json::json!(["b"]));
}

#[test]
fn empty_conflicts_with_omitted_from_json() {
    let event = CalendarEvent::from(RawEvent::all_day("d", "2026-03-02", "2026-03-03"));

    let out = serde_json::to_value(&event).unwrap();

    assert!(out.get("conflicts_with").is_none());
    assert_eq!(out["all_day"], true);
}

#[test]
fn event_list_envelope() {
    let raw = events();
    let result = detect_conflicts(&raw, UTC, &DetectOptions::default()).unwrap();
    let annotated: Vec<CalendarEvent> = raw.into_iter().map(CalendarEvent::from).collect();

    let list = EventList::new(annotated, result);

    assert_eq!(list.count, 3);
    assert!(list.has_conflicts);
    assert_eq!(list.conflicts.len(), 1);
    assert_eq!(list.events[1].conflicts_with, vec!["a"]);
}
