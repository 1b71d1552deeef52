//! QCut Timeline - Timeline geometry
//!
//! Implements the layout rules of the editor's timeline:
//! - Elements with trimmed, effective spans
//! - Overlap detection and greedy resolution
//! - Track stacking order and row heights
//! - Duration, buffer and export-length policies
//! - Snapping, bounded undo history and configuration

pub mod config;
pub mod duration;
pub mod element;
pub mod error;
pub mod history;
pub mod overlap;
pub mod project;
pub mod serialization;
pub mod snapping;
pub mod track;

pub use config::TimelineConfig;
pub use duration::{
    calculate_minimum_timeline_duration, calculate_timeline_buffer,
    calculate_timeline_display_duration, timeline_duration, validate_export_duration,
    DurationPolicy,
};
pub use element::{ElementKind, TimelineElement};
pub use error::{Result, TimelineError};
pub use history::History;
pub use overlap::{
    check_element_overlaps, find_overlapping_pairs, resolve_element_overlaps, would_overlap,
};
pub use project::Timeline;
pub use serialization::TimelineFile;
pub use snapping::{Snap, SnapKind, SnapPoint, SnapSettings, SnappingEngine};
pub use track::{
    can_element_go_on_track, cumulative_height_before, ensure_main_track, main_track,
    sort_tracks_by_order, total_tracks_height, track_height, TimelineTrack, TrackKind,
};
