//! Overlap detection and resolution for elements sharing a track.
//!
//! Both passes work on elements ordered by start time. Resolution is greedy:
//! an element that starts before its predecessor's effective end is pushed to
//! begin exactly at that end. Nothing is ever moved earlier.

use std::cmp::Ordering;

use tracing::debug;
use uuid::Uuid;

use crate::element::TimelineElement;

fn by_start(a: &TimelineElement, b: &TimelineElement) -> Ordering {
    a.start_time.total_cmp(&b.start_time)
}

fn sorted_refs(elements: &[TimelineElement]) -> Vec<&TimelineElement> {
    let mut sorted: Vec<&TimelineElement> = elements.iter().collect();
    sorted.sort_by(|a, b| by_start(a, b));
    sorted
}

/// Whether any element ends after the next one (by start time) begins.
pub fn check_element_overlaps(elements: &[TimelineElement]) -> bool {
    sorted_refs(elements)
        .windows(2)
        .any(|pair| pair[0].effective_end() > pair[1].start_time)
}

/// Neighbouring element pairs (by start time) whose spans overlap.
pub fn find_overlapping_pairs(elements: &[TimelineElement]) -> Vec<(Uuid, Uuid)> {
    sorted_refs(elements)
        .windows(2)
        .filter(|pair| pair[0].effective_end() > pair[1].start_time)
        .map(|pair| (pair[0].id, pair[1].id))
        .collect()
}

/// Return the elements sorted by start time with every overlap pushed out.
///
/// Each element is pushed to the furthest effective end seen so far. With
/// non-negative effective durations that is simply the previous element's
/// end; an over-trimmed element (negative effective duration) never pulls
/// the frontier back, so the result stays sorted and overlap-free.
///
/// Relative order is preserved and start times only ever increase. The input
/// is left untouched; recording undo history is up to the caller.
pub fn resolve_element_overlaps(elements: &[TimelineElement]) -> Vec<TimelineElement> {
    let mut resolved = elements.to_vec();
    resolved.sort_by(by_start);

    let mut frontier = f64::NEG_INFINITY;
    for current in &mut resolved {
        if current.start_time < frontier {
            debug!(
                element = %current.id,
                from = current.start_time,
                to = frontier,
                "pushing overlapping element"
            );
            current.start_time = frontier;
        }
        frontier = frontier.max(current.effective_end());
    }

    resolved
}

/// Whether a span of `duration` placed at `start` would collide with any
/// element other than `exclude`.
pub fn would_overlap(
    elements: &[TimelineElement],
    start: f64,
    duration: f64,
    exclude: Option<Uuid>,
) -> bool {
    let end = start + duration;
    elements
        .iter()
        .filter(|el| Some(el.id) != exclude)
        .any(|el| start < el.effective_end() && el.start_time < end)
}
