//! # conflict-engine
//!
//! Deterministic calendar-conflict detection.
//!
//! Given a batch of already-fetched calendar events, the engine finds every pair
//! that overlaps or that leaves less than a configured buffer between meetings,
//! and reports the result both as a flat conflict list and as a per-event
//! adjacency map. It does no I/O.
//!
//! ```rust
//! use conflict_engine::{detect_conflicts, DetectOptions, RawEvent};
//!
//! let events = vec![
//!     RawEvent::timed("standup", "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z"),
//!     RawEvent::timed("review", "2026-03-02T09:30:00Z", "2026-03-02T10:30:00Z"),
//! ];
//!
//! let result = detect_conflicts(&events, chrono_tz::UTC, &DetectOptions::default()).unwrap();
//! assert!(result.has_conflicts);
//! assert_eq!(result.conflicts_for("standup"), ["review".to_string()]);
//! ```
//!
//! ## Modules
//!
//! - [`event`] — Raw event descriptors from the fetching layer
//! - [`slot`] — Raw strings → timezone-resolved `TimeSlot`s
//! - [`conflict`] — Sorted sweep for overlaps and buffer violations
//! - [`annotate`] — Adjacency map → per-event `conflicts_with`
//! - [`error`] — Error types

pub mod annotate;
pub mod conflict;
pub mod error;
pub mod event;
pub mod slot;

pub use annotate::{apply_to_events, Annotate, CalendarEvent, EventList};
pub use conflict::{
    detect, detect_conflicts, Adjacency, Conflict, ConflictKind, DetectOptions, DetectionResult,
};
pub use error::ConflictError;
pub use event::RawEvent;
pub use slot::{normalize, TimeSlot};
