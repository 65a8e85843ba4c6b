//! Detect overlapping events and insufficient buffers between meetings.
//!
//! Slots are sorted by `(start, end)` and swept pairwise. For each slot `a`, later
//! slots are scanned until one starts at or after `a.end + buffer`; nothing past
//! that point can conflict with `a`. Worst case stays O(n^2) for dense clusters,
//! but a typical schedule costs close to O(n log n).
//!
//! Adjacent events (where one ends exactly when another starts) never overlap.
//! With a non-zero buffer they may still be an `insufficient_buffer` conflict.

use std::collections::BTreeMap;

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::event::RawEvent;
use crate::slot::{self, TimeSlot};

/// Event ID -> IDs of the events it conflicts with. Always symmetric.
pub type Adjacency = BTreeMap<String, Vec<String>>;

/// Detection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectOptions {
    /// Minimum gap required between the end of one meeting and the start of the
    /// next. `0` disables buffer checks.
    pub buffer_minutes: u32,
}

impl DetectOptions {
    pub fn with_buffer(buffer_minutes: u32) -> Self {
        Self { buffer_minutes }
    }

    fn buffer(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_minutes))
    }
}

/// What makes a pair of events conflict. A pair is classified as exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConflictKind {
    /// The two intervals share a positive-length intersection.
    Overlap { overlap_minutes: i64 },
    /// The events do not overlap, but the gap between them is below the buffer.
    InsufficientBuffer {
        gap_minutes: i64,
        required_buffer_minutes: u32,
    },
}

/// A detected conflict between two events.
///
/// `event_ids[0]` is the event that sorts first by `(start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(flatten)]
    pub kind: ConflictKind,
    pub event_ids: [String; 2],
}

impl Conflict {
    pub fn involves(&self, id: &str) -> bool {
        self.event_ids.iter().any(|e| e == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Conflicts in sweep discovery order.
    pub conflicts: Vec<Conflict>,
    pub has_conflicts: bool,
    pub adjacency: Adjacency,
}

impl DetectionResult {
    /// IDs conflicting with `id`, empty when it has none.
    pub fn conflicts_for(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Find every overlapping or insufficiently-buffered pair among `slots`.
///
/// Slots are sorted by start, then end. The sort is stable, so slots with identical
/// bounds keep their input order and the output is reproducible.
///
/// Two slots overlap when `a.start < b.end && b.start < a.end`. The overlap
/// duration is `min(a.end, b.end) - max(a.start, b.start)` in whole minutes.
/// When they don't overlap and `buffer_minutes > 0`, a gap `0 <= gap < buffer` is
/// reported as `insufficient_buffer`.
pub fn detect(slots: &[TimeSlot], options: &DetectOptions) -> DetectionResult {
    let mut result = DetectionResult::default();

    if slots.len() < 2 {
        return result;
    }

    let mut sorted: Vec<&TimeSlot> = slots.iter().collect();
    sorted.sort_by(|x, y| x.start.cmp(&y.start).then(x.end.cmp(&y.end)));

    let buffer = options.buffer();

    for (i, a) in sorted.iter().enumerate() {
        // `None` when a.end + buffer is past the representable range: nothing can
        // start that late, so there is no pruning point for this slot.
        let horizon = a.end.checked_add_signed(buffer);

        for b in &sorted[i + 1..] {
            // Every later slot starts at or after b.start, so none can conflict with a.
            if horizon.is_some_and(|h| b.start >= h) {
                trace!(event = %a.id, next = %b.id, "sweep pruned");
                break;
            }

            if let Some(kind) = classify(a, b, options) {
                trace!(a = %a.id, b = %b.id, kind = ?kind, "conflict found");
                link(&mut result.adjacency, &a.id, &b.id);
                result.conflicts.push(Conflict {
                    kind,
                    event_ids: [a.id.clone(), b.id.clone()],
                });
            }
        }
    }

    result.has_conflicts = !result.conflicts.is_empty();

    debug!(
        slots = slots.len(),
        conflicts = result.conflicts.len(),
        buffer_minutes = options.buffer_minutes,
        "conflict detection complete"
    );

    result
}

/// Normalize raw events in `tz` and run [`detect`] on the resulting slots.
///
/// # Errors
/// Returns `ConflictError::Parse` if any event's start or end cannot be parsed.
/// Nothing is detected in that case.
pub fn detect_conflicts(
    events: &[RawEvent],
    tz: Tz,
    options: &DetectOptions,
) -> Result<DetectionResult> {
    let slots = slot::normalize(events, tz)?;
    Ok(detect(&slots, options))
}

/// Classify a pair where `a` sorts no later than `b`.
fn classify(a: &TimeSlot, b: &TimeSlot, options: &DetectOptions) -> Option<ConflictKind> {
    if a.start < b.end && b.start < a.end {
        let overlap_start = a.start.max(b.start);
        let overlap_end = a.end.min(b.end);

        return Some(ConflictKind::Overlap {
            overlap_minutes: (overlap_end - overlap_start).num_minutes(),
        });
    }

    if options.buffer_minutes == 0 {
        return None;
    }

    let gap = b.start - a.end;
    if gap >= Duration::zero() && gap < options.buffer() {
        Some(ConflictKind::InsufficientBuffer {
            gap_minutes: gap.num_minutes(),
            required_buffer_minutes: options.buffer_minutes,
        })
    } else {
        None
    }
}

fn link(adjacency: &mut Adjacency, a: &str, b: &str) {
    adjacency.entry(a.to_string()).or_default().push(b.to_string());
    adjacency.entry(b.to_string()).or_default().push(a.to_string());
}
