//! The timeline a project edits: its tracks and frame rate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::duration::{timeline_duration, DurationPolicy};
use crate::error::Result;
use crate::track::{ensure_main_track, find_track_mut, sort_tracks_by_order, TimelineTrack};

/// A timeline containing tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub id: Uuid,
    pub name: String,
    /// Frames per second used for snapping and timecodes.
    pub fps: f64,
    #[serde(default)]
    pub tracks: Vec<TimelineTrack>,
}

impl Timeline {
    /// Create a timeline with just a main track.
    pub fn new(name: impl Into<String>, fps: f64) -> Self {
        let mut tracks = Vec::new();
        ensure_main_track(&mut tracks);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            fps,
            tracks,
        }
    }

    /// Latest effective end across all tracks.
    pub fn duration(&self) -> f64 {
        timeline_duration(&self.tracks)
    }

    /// Scrollable length under the given policy.
    pub fn display_duration(&self, policy: &DurationPolicy) -> f64 {
        policy.display_duration(self.duration())
    }

    /// Tracks in top-to-bottom display order.
    pub fn tracks_in_order(&self) -> Vec<TimelineTrack> {
        sort_tracks_by_order(&self.tracks)
    }

    pub fn add_track(&mut self, track: TimelineTrack) -> Uuid {
        let id = track.id;
        self.tracks.push(track);
        id
    }

    pub fn track_mut(&mut self, id: Uuid) -> Result<&mut TimelineTrack> {
        find_track_mut(&mut self.tracks, id)
    }

    /// IDs of tracks whose elements overlap.
    pub fn tracks_with_overlaps(&self) -> Vec<Uuid> {
        self.tracks
            .iter()
            .filter(|track| track.has_overlaps())
            .map(|track| track.id)
            .collect()
    }

    /// Resolve overlaps on every track. Returns the number of moved elements.
    pub fn resolve_all_overlaps(&mut self) -> usize {
        self.tracks
            .iter_mut()
            .map(TimelineTrack::resolve_overlaps)
            .sum()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new("Untitled Timeline", crate::config::DEFAULT_FPS)
    }
}
