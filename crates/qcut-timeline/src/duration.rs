//! Timeline length and export-duration policies.
//!
//! These are clamping rules, not validation: every function returns a usable
//! duration for any input.

use serde::{Deserialize, Serialize};

use crate::track::TimelineTrack;

/// Length shown for a timeline with no content, in seconds.
pub const DEFAULT_EMPTY_TIMELINE_DURATION: f64 = 10.0;
/// Fraction of the content length appended as scrollable space.
pub const BUFFER_RATIO: f64 = 0.1;
/// Smallest trailing buffer, in seconds.
pub const MIN_BUFFER_SECONDS: f64 = 5.0;
/// Shortest export the encoder accepts, in seconds.
pub const MIN_EXPORT_DURATION: f64 = 0.1;
/// Default upper bound for an export, in seconds.
pub const MAX_EXPORT_DURATION: f64 = 600.0;

/// Tunable version of the duration constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationPolicy {
    pub default_empty_duration: f64,
    pub buffer_ratio: f64,
    pub min_buffer: f64,
    pub min_export_duration: f64,
    pub max_export_duration: f64,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            default_empty_duration: DEFAULT_EMPTY_TIMELINE_DURATION,
            buffer_ratio: BUFFER_RATIO,
            min_buffer: MIN_BUFFER_SECONDS,
            min_export_duration: MIN_EXPORT_DURATION,
            max_export_duration: MAX_EXPORT_DURATION,
        }
    }
}

impl DurationPolicy {
    /// Content length, never shorter than the empty-timeline default.
    /// Non-finite content counts as empty.
    pub fn minimum_duration(&self, content_duration: f64) -> f64 {
        if !content_duration.is_finite() {
            return self.default_empty_duration;
        }
        content_duration.max(self.default_empty_duration)
    }

    /// Trailing space after the content.
    pub fn buffer(&self, duration: f64) -> f64 {
        if !duration.is_finite() {
            return self.min_buffer;
        }
        (duration * self.buffer_ratio).max(self.min_buffer)
    }

    /// Total scrollable length: minimum duration plus buffer.
    pub fn display_duration(&self, content_duration: f64) -> f64 {
        let minimum = self.minimum_duration(content_duration);
        minimum + self.buffer(minimum)
    }

    /// Clamp an export length into `[min_export_duration, max]`.
    pub fn export_duration(&self, duration: f64, max: f64) -> f64 {
        if !duration.is_finite() {
            return self.min_export_duration;
        }
        duration.min(max).max(self.min_export_duration)
    }
}

pub fn calculate_minimum_timeline_duration(content_duration: f64) -> f64 {
    DurationPolicy::default().minimum_duration(content_duration)
}

pub fn calculate_timeline_buffer(duration: f64) -> f64 {
    DurationPolicy::default().buffer(duration)
}

pub fn calculate_timeline_display_duration(content_duration: f64) -> f64 {
    DurationPolicy::default().display_duration(content_duration)
}

/// Clamp a requested export length into `[MIN_EXPORT_DURATION, max_duration]`.
pub fn validate_export_duration(duration: f64, max_duration: f64) -> f64 {
    DurationPolicy::default().export_duration(duration, max_duration)
}

/// Latest effective end across all tracks (0 for an empty timeline).
pub fn timeline_duration(tracks: &[TimelineTrack]) -> f64 {
    tracks
        .iter()
        .map(TimelineTrack::duration)
        .fold(0.0, f64::max)
}
