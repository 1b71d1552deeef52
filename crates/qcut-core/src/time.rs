//! Frame-accurate time math for the timeline.
//!
//! Timeline positions are plain `f64` seconds. Frame indices are computed on
//! demand from a frames-per-second value; nothing here caches or accumulates.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Round to the nearest integer with ties going toward positive infinity.
///
/// A time exactly half a frame before zero lands on frame 0, not -1.
#[inline]
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[inline]
fn is_valid_fps(fps: f64) -> bool {
    fps.is_finite() && fps > 0.0
}

/// Convert a time in seconds to the nearest frame index.
#[inline]
pub fn time_to_frame(time: f64, fps: f64) -> f64 {
    round_half_up(time * fps)
}

/// Convert a frame index to its start time in seconds.
#[inline]
pub fn frame_to_time(frame: f64, fps: f64) -> f64 {
    frame / fps
}

/// Snap a time to the nearest frame boundary.
///
/// A non-positive (or non-finite) `fps` returns `time` unchanged.
pub fn snap_time_to_frame(time: f64, fps: f64) -> f64 {
    if !is_valid_fps(fps) {
        debug!(time, fps, "invalid frame rate, leaving time unsnapped");
        return time;
    }
    frame_to_time(time_to_frame(time, fps), fps)
}

/// Snap a seek request to a frame and clamp it into `[0, duration]`.
pub fn snapped_seek_time(raw_time: f64, duration: f64, fps: f64) -> f64 {
    let snapped = snap_time_to_frame(raw_time, fps);
    snapped.min(duration).max(0.0)
}

// ── Frame rate ──────────────────────────────────────────────────

/// Frame rate as a ratio (e.g., 30000/1001 for 29.97 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 30000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Frames per second as f64. A zero denominator yields 0.0.
    #[inline]
    pub fn fps(self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        self.numerator as f64 / self.denominator as f64
    }

    /// Duration of a single frame in seconds.
    #[inline]
    pub fn frame_duration(self) -> f64 {
        if self.numerator == 0 {
            return 0.0;
        }
        self.denominator as f64 / self.numerator as f64
    }

    /// Snap a time to this rate's frame grid.
    #[inline]
    pub fn snap(self, time: f64) -> f64 {
        snap_time_to_frame(time, self.fps())
    }

    /// Common frame rates
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.fps();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}

// ── Timecode ────────────────────────────────────────────────────

/// Display layouts for timecodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimecodeFormat {
    #[serde(rename = "MM:SS")]
    MinutesSeconds,
    #[serde(rename = "HH:MM:SS")]
    HoursMinutesSeconds,
    /// Trailing field is hundredths of a second.
    #[default]
    #[serde(rename = "HH:MM:SS:CS")]
    Centiseconds,
    /// Trailing field is the frame within the second.
    #[serde(rename = "HH:MM:SS:FF")]
    Frames,
}

impl TimecodeFormat {
    fn field_count(self) -> usize {
        match self {
            Self::MinutesSeconds => 2,
            Self::HoursMinutesSeconds => 3,
            Self::Centiseconds | Self::Frames => 4,
        }
    }
}

/// Format a time as a zero-padded timecode. Negative or non-finite times
/// format as zero.
pub fn format_timecode(seconds: f64, format: TimecodeFormat, fps: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let whole = seconds.floor();
    let fraction = seconds - whole;
    let whole = whole as u64;

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;

    match format {
        TimecodeFormat::MinutesSeconds => format!("{:02}:{:02}", whole / 60, secs),
        TimecodeFormat::HoursMinutesSeconds => {
            format!("{:02}:{:02}:{:02}", hours, minutes, secs)
        }
        TimecodeFormat::Centiseconds => {
            let cs = (fraction * 100.0).floor() as u64;
            format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, secs, cs)
        }
        TimecodeFormat::Frames => {
            let frames = if is_valid_fps(fps) {
                (fraction * fps).floor() as u64
            } else {
                0
            };
            format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, secs, frames)
        }
    }
}

/// `hours:minutes:seconds` as whole seconds, `None` on overflow.
fn whole_seconds(hours: u64, minutes: u64, secs: u64) -> Option<u64> {
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(secs)
}

/// Parse a timecode produced by [`format_timecode`] back into seconds.
///
/// Returns `None` when the field count does not match `format`, a field is
/// not a non-negative integer, a field is out of range, or the total does
/// not fit in whole seconds.
pub fn parse_timecode(text: &str, format: TimecodeFormat, fps: f64) -> Option<f64> {
    let fields: Vec<u64> = text
        .trim()
        .split(':')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<_>>()?;

    if fields.len() != format.field_count() {
        return None;
    }

    match format {
        TimecodeFormat::MinutesSeconds => {
            let (minutes, secs) = (fields[0], fields[1]);
            if secs >= 60 {
                return None;
            }
            Some(whole_seconds(0, minutes, secs)? as f64)
        }
        TimecodeFormat::HoursMinutesSeconds => {
            let (hours, minutes, secs) = (fields[0], fields[1], fields[2]);
            if minutes >= 60 || secs >= 60 {
                return None;
            }
            Some(whole_seconds(hours, minutes, secs)? as f64)
        }
        TimecodeFormat::Centiseconds => {
            let (hours, minutes, secs, cs) = (fields[0], fields[1], fields[2], fields[3]);
            if minutes >= 60 || secs >= 60 || cs >= 100 {
                return None;
            }
            Some(whole_seconds(hours, minutes, secs)? as f64 + cs as f64 / 100.0)
        }
        TimecodeFormat::Frames => {
            if !is_valid_fps(fps) {
                return None;
            }
            let (hours, minutes, secs, frames) = (fields[0], fields[1], fields[2], fields[3]);
            if minutes >= 60 || secs >= 60 || frames as f64 >= fps {
                return None;
            }
            Some(whole_seconds(hours, minutes, secs)? as f64 + frames as f64 / fps)
        }
    }
}
