//! WASM bindings for conflict-engine.
//!
//! Exposes conflict detection and event annotation to JavaScript via
//! `wasm-bindgen`. Events and results cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p conflict-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/conflict-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/conflict_engine_wasm.wasm
//! ```

use chrono_tz::Tz;
use conflict_engine::{CalendarEvent, DetectOptions, DetectionResult, EventList, RawEvent};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers (plain `String` errors so they can be tested off-wasm)
// ---------------------------------------------------------------------------

fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>().map_err(|_| format!("Invalid timezone: {}", name))
}

fn parse_events_json(json: &str) -> Result<Vec<CalendarEvent>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))
}

fn run_detection(
    events: &[CalendarEvent],
    timezone: &str,
    buffer_minutes: u32,
) -> Result<DetectionResult, String> {
    let tz = parse_timezone(timezone)?;
    let raw: Vec<RawEvent> = events.iter().map(|e| e.event.clone()).collect();
    conflict_engine::detect_conflicts(&raw, tz, &DetectOptions::with_buffer(buffer_minutes))
        .map_err(|e| e.to_string())
}

fn detect_json(events_json: &str, timezone: &str, buffer_minutes: u32) -> Result<String, String> {
    let events = parse_events_json(events_json)?;
    let result = run_detection(&events, timezone, buffer_minutes)?;
    serde_json::to_string(&result).map_err(|e| format!("Serialization error: {}", e))
}

fn annotate_json(events_json: &str, timezone: &str, buffer_minutes: u32) -> Result<String, String> {
    let events = parse_events_json(events_json)?;
    let result = run_detection(&events, timezone, buffer_minutes)?;
    serde_json::to_string(&EventList::new(events, result))
        .map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Detect conflicts among a list of events.
///
/// `events_json` must be a JSON array of `{id, start, end, all_day?}` objects.
/// Returns a JSON string with `conflicts`, `has_conflicts` and `adjacency`.
///
/// # Arguments
/// - `events_json` -- Events to check
/// - `timezone` -- IANA timezone used to resolve all-day dates (e.g., "Europe/Berlin")
/// - `buffer_minutes` -- Minimum gap between meetings; `0` disables buffer checks
#[wasm_bindgen(js_name = "detectConflicts")]
pub fn detect_conflicts(
    events_json: &str,
    timezone: &str,
    buffer_minutes: u32,
) -> Result<String, JsValue> {
    detect_json(events_json, timezone, buffer_minutes).map_err(|e| JsValue::from_str(&e))
}

/// Detect conflicts and return the events annotated with `conflicts_with`.
///
/// Takes the same arguments as [`detect_conflicts`]. Returns a JSON string with
/// `events`, `count`, `conflicts` and `has_conflicts`. Extra event fields are
/// passed through unchanged.
#[wasm_bindgen(js_name = "annotateEvents")]
pub fn annotate_events(
    events_json: &str,
    timezone: &str,
    buffer_minutes: u32,
) -> Result<String, JsValue> {
    annotate_json(events_json, timezone, buffer_minutes).map_err(|e| JsValue::from_str(&e))
}
