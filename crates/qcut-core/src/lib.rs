//! QCut Core - Foundation math for the timeline editor
//!
//! This crate provides the pure, stateless routines the editor evaluates on
//! every render:
//! - Frame/time conversion, snap-to-frame and timecode formatting
//! - Easing curves and keyframe interpolation for effect parameters

pub mod error;
pub mod keyframe;
pub mod time;

pub use error::{QCutError, Result};
pub use keyframe::{
    ease, find_surrounding_keyframes, interpolate_keyframes, CubicBezier, EffectKeyframe, Easing,
    Interpolation, Surrounding,
};
pub use time::{
    format_timecode, frame_to_time, parse_timecode, snap_time_to_frame, snapped_seek_time,
    time_to_frame, FrameRate, TimecodeFormat,
};
