//! Elements placed on timeline tracks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::track::TrackKind;

/// What an element shows or plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Video,
    Image,
    Audio,
    Text,
    Sticker,
    Captions,
}

impl ElementKind {
    /// The kind of track this element belongs on.
    pub fn track_kind(self) -> TrackKind {
        match self {
            ElementKind::Video | ElementKind::Image => TrackKind::Media,
            ElementKind::Audio => TrackKind::Audio,
            ElementKind::Text => TrackKind::Text,
            ElementKind::Sticker => TrackKind::Sticker,
            ElementKind::Captions => TrackKind::Captions,
        }
    }
}

/// A span on a timeline track.
///
/// `duration` is the untrimmed source length; the visible span starts at
/// `start_time` and lasts `duration - trim_start - trim_end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineElement {
    pub id: Uuid,
    pub name: String,
    pub kind: ElementKind,
    /// Timeline position in seconds.
    pub start_time: f64,
    pub duration: f64,
    #[serde(default)]
    pub trim_start: f64,
    #[serde(default)]
    pub trim_end: f64,
    #[serde(default)]
    pub hidden: bool,
}

impl TimelineElement {
    pub fn new(name: impl Into<String>, kind: ElementKind, start_time: f64, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            start_time,
            duration,
            trim_start: 0.0,
            trim_end: 0.0,
            hidden: false,
        }
    }

    pub fn with_trim(mut self, trim_start: f64, trim_end: f64) -> Self {
        self.trim_start = trim_start;
        self.trim_end = trim_end;
        self
    }

    /// Visible length after trimming. Not clamped: over-trimmed elements
    /// report a negative duration.
    #[inline]
    pub fn effective_duration(&self) -> f64 {
        self.duration - self.trim_start - self.trim_end
    }

    /// Timeline time at which the visible span ends.
    #[inline]
    pub fn effective_end(&self) -> f64 {
        self.start_time + self.effective_duration()
    }

    /// Whether `time` falls in `[start_time, effective_end)`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.effective_end()
    }

    /// Whether the visible spans of two elements intersect.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_time < other.effective_end() && other.start_time < self.effective_end()
    }

    /// Convert a timeline time to a time relative to this element's start.
    #[inline]
    pub fn local_time(&self, timeline_time: f64) -> f64 {
        timeline_time - self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_end_accounts_for_trim() {
        let el = TimelineElement::new("clip", ElementKind::Video, 2.0, 10.0).with_trim(1.0, 3.0);
        assert_eq!(el.effective_duration(), 6.0);
        assert_eq!(el.effective_end(), 8.0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let el = TimelineElement::new("clip", ElementKind::Video, 2.0, 4.0);
        assert!(el.contains(2.0));
        assert!(el.contains(5.999));
        assert!(!el.contains(6.0));
        assert!(!el.contains(1.0));
    }

    #[test]
    fn test_overlaps() {
        let a = TimelineElement::new("a", ElementKind::Video, 0.0, 5.0);
        let b = TimelineElement::new("b", ElementKind::Video, 4.0, 5.0);
        let c = TimelineElement::new("c", ElementKind::Video, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        // Trimming the tail of `a` removes the overlap with `b`.
        let a = a.with_trim(0.0, 1.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_kind_to_track_kind() {
        assert_eq!(ElementKind::Image.track_kind(), TrackKind::Media);
        assert_eq!(ElementKind::Audio.track_kind(), TrackKind::Audio);
        assert_eq!(ElementKind::Captions.track_kind(), TrackKind::Captions);
    }

    #[test]
    fn test_missing_trims_default_to_zero() {
        let json = r#"{
            "id": "6f1c1a52-5d3c-4a0e-9b7e-1a2b3c4d5e6f",
            "name": "title",
            "kind": "text",
            "startTime": 1.5,
            "duration": 3.0
        }"#;
        let el: TimelineElement = serde_json::from_str(json).unwrap();
        assert_eq!(el.trim_start, 0.0);
        assert_eq!(el.effective_end(), 4.5);
        assert!(!el.hidden);
    }
}
