//! Track types, stacking order and vertical layout.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::element::{ElementKind, TimelineElement};
use crate::error::{Result, TimelineError};
use crate::overlap::{check_element_overlaps, resolve_element_overlaps};

/// Kind of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Media,
    Text,
    Audio,
    Sticker,
    Captions,
}

/// Track row heights in pixels.
pub mod heights {
    pub const MEDIA: f64 = 65.0;
    pub const TEXT: f64 = 25.0;
    pub const AUDIO: f64 = 50.0;
    pub const STICKER: f64 = 40.0;
    pub const CAPTIONS: f64 = 30.0;

    /// Vertical gap between adjacent tracks.
    pub const TRACK_GAP: f64 = 4.0;
}

/// Row height for a track kind.
pub fn track_height(kind: TrackKind) -> f64 {
    match kind {
        TrackKind::Media => heights::MEDIA,
        TrackKind::Text => heights::TEXT,
        TrackKind::Audio => heights::AUDIO,
        TrackKind::Sticker => heights::STICKER,
        TrackKind::Captions => heights::CAPTIONS,
    }
}

/// Whether an element of `element` kind may be placed on a `track` kind.
pub fn can_element_go_on_track(element: ElementKind, track: TrackKind) -> bool {
    element.track_kind() == track
}

/// A track holding elements of a single kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineTrack {
    pub id: Uuid,
    pub name: String,
    pub kind: TrackKind,
    #[serde(default)]
    pub elements: Vec<TimelineElement>,
    /// The primary media track holding the base video layer.
    #[serde(default)]
    pub is_main: bool,
    #[serde(default)]
    pub muted: bool,
}

impl TimelineTrack {
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            elements: Vec::new(),
            is_main: false,
            muted: false,
        }
    }

    /// Create the main media track.
    pub fn new_main() -> Self {
        Self {
            is_main: true,
            ..Self::new("Main Track", TrackKind::Media)
        }
    }

    /// Add an element, rejecting kinds that do not belong on this track.
    pub fn add_element(&mut self, element: TimelineElement) -> Result<()> {
        if !can_element_go_on_track(element.kind, self.kind) {
            return Err(TimelineError::IncompatibleTrack {
                element: element.kind,
                track: self.kind,
            });
        }
        self.elements.push(element);
        Ok(())
    }

    /// Remove an element by ID, returning it.
    pub fn remove_element(&mut self, id: Uuid) -> Result<TimelineElement> {
        let pos = self
            .elements
            .iter()
            .position(|el| el.id == id)
            .ok_or(TimelineError::ElementNotFound(id))?;
        Ok(self.elements.remove(pos))
    }

    pub fn element(&self, id: Uuid) -> Option<&TimelineElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn element_mut(&mut self, id: Uuid) -> Option<&mut TimelineElement> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Elements visible at the given timeline time.
    pub fn elements_at(&self, time: f64) -> impl Iterator<Item = &TimelineElement> {
        self.elements
            .iter()
            .filter(move |el| !el.hidden && el.contains(time))
    }

    /// End of the last visible span on this track (0 when empty).
    pub fn duration(&self) -> f64 {
        self.elements
            .iter()
            .map(TimelineElement::effective_end)
            .fold(0.0, f64::max)
    }

    pub fn has_overlaps(&self) -> bool {
        check_element_overlaps(&self.elements)
    }

    /// Replace the elements with their overlap-free arrangement.
    /// Returns the number of elements that moved.
    pub fn resolve_overlaps(&mut self) -> usize {
        let resolved = resolve_element_overlaps(&self.elements);
        let moved = resolved
            .iter()
            .filter(|after| {
                self.element(after.id)
                    .is_some_and(|before| before.start_time != after.start_time)
            })
            .count();
        if moved > 0 {
            debug!(track = %self.id, moved, "resolved track overlaps");
        }
        self.elements = resolved;
        moved
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// ── Track collections ───────────────────────────────────────────

fn stacking_rank(track: &TimelineTrack) -> u8 {
    match track.kind {
        TrackKind::Text => 0,
        TrackKind::Audio => 3,
        _ if track.is_main => 2,
        _ => 1,
    }
}

/// Order tracks top to bottom: text tracks, then overlay media/sticker/caption
/// tracks, then the main track, then audio. Creation order is kept within
/// each group.
pub fn sort_tracks_by_order(tracks: &[TimelineTrack]) -> Vec<TimelineTrack> {
    let mut sorted = tracks.to_vec();
    sorted.sort_by_key(stacking_rank);
    sorted
}

/// Pixel offset of the track at `index` from the top of the stack.
pub fn cumulative_height_before(tracks: &[TimelineTrack], index: usize) -> f64 {
    tracks
        .iter()
        .take(index)
        .map(|track| track_height(track.kind) + heights::TRACK_GAP)
        .sum()
}

/// Height of the whole stack, gaps between tracks included.
pub fn total_tracks_height(tracks: &[TimelineTrack]) -> f64 {
    let rows: f64 = tracks.iter().map(|track| track_height(track.kind)).sum();
    let gaps = tracks.len().saturating_sub(1) as f64 * heights::TRACK_GAP;
    rows + gaps
}

pub fn main_track(tracks: &[TimelineTrack]) -> Option<&TimelineTrack> {
    tracks.iter().find(|track| track.is_main)
}

/// Make sure a main track exists, inserting one at the front if needed.
/// Returns the main track's ID.
pub fn ensure_main_track(tracks: &mut Vec<TimelineTrack>) -> Uuid {
    if let Some(track) = main_track(tracks) {
        return track.id;
    }
    let track = TimelineTrack::new_main();
    let id = track.id;
    tracks.insert(0, track);
    id
}

/// Find a track mutably by ID.
pub fn find_track_mut(tracks: &mut [TimelineTrack], id: Uuid) -> Result<&mut TimelineTrack> {
    tracks
        .iter_mut()
        .find(|track| track.id == id)
        .ok_or(TimelineError::TrackNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tracks: &[TimelineTrack]) -> Vec<(TrackKind, bool)> {
        tracks.iter().map(|t| (t.kind, t.is_main)).collect()
    }

    #[test]
    fn test_sort_tracks_by_order() {
        let tracks = vec![
            TimelineTrack::new("A1", TrackKind::Audio),
            TimelineTrack::new_main(),
            TimelineTrack::new("T1", TrackKind::Text),
            TimelineTrack::new("V2", TrackKind::Media),
            TimelineTrack::new("S1", TrackKind::Sticker),
        ];
        let sorted = sort_tracks_by_order(&tracks);
        assert_eq!(
            kinds(&sorted),
            vec![
                (TrackKind::Text, false),
                (TrackKind::Media, false),
                (TrackKind::Sticker, false),
                (TrackKind::Media, true),
                (TrackKind::Audio, false),
            ]
        );
    }

    #[test]
    fn test_heights() {
        let tracks = vec![
            TimelineTrack::new("T1", TrackKind::Text),
            TimelineTrack::new_main(),
            TimelineTrack::new("A1", TrackKind::Audio),
        ];
        assert_eq!(cumulative_height_before(&tracks, 0), 0.0);
        assert_eq!(cumulative_height_before(&tracks, 2), 25.0 + 4.0 + 65.0 + 4.0);
        assert_eq!(cumulative_height_before(&tracks, 10), 25.0 + 65.0 + 50.0 + 12.0);
        assert_eq!(total_tracks_height(&tracks), 25.0 + 65.0 + 50.0 + 8.0);
        assert_eq!(total_tracks_height(&[]), 0.0);
    }

    #[test]
    fn test_ensure_main_track() {
        let mut tracks = vec![TimelineTrack::new("A1", TrackKind::Audio)];
        let id = ensure_main_track(&mut tracks);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, id);
        assert!(tracks[0].is_main);

        // Idempotent
        assert_eq!(ensure_main_track(&mut tracks), id);
        assert_eq!(tracks.len(), 2);
    }

    #[test]
    fn test_add_element_checks_compatibility() {
        let mut track = TimelineTrack::new("T1", TrackKind::Text);
        let text = TimelineElement::new("title", ElementKind::Text, 0.0, 3.0);
        let video = TimelineElement::new("clip", ElementKind::Video, 0.0, 3.0);
        assert!(track.add_element(text).is_ok());
        assert!(matches!(
            track.add_element(video),
            Err(TimelineError::IncompatibleTrack { .. })
        ));
        assert_eq!(track.elements.len(), 1);
    }

    #[test]
    fn test_remove_element() {
        let mut track = TimelineTrack::new_main();
        let clip = TimelineElement::new("clip", ElementKind::Video, 0.0, 3.0);
        let id = clip.id;
        track.add_element(clip).unwrap();
        assert_eq!(track.remove_element(id).unwrap().id, id);
        assert!(matches!(
            track.remove_element(id),
            Err(TimelineError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_track_duration_and_resolve() {
        let mut track = TimelineTrack::new_main();
        track
            .add_element(TimelineElement::new("a", ElementKind::Video, 0.0, 5.0))
            .unwrap();
        track
            .add_element(TimelineElement::new("b", ElementKind::Image, 3.0, 2.0))
            .unwrap();
        assert!(track.has_overlaps());
        assert_eq!(track.duration(), 5.0);

        assert_eq!(track.resolve_overlaps(), 1);
        assert!(!track.has_overlaps());
        assert_eq!(track.duration(), 7.0);
        assert_eq!(track.resolve_overlaps(), 0);
    }

    #[test]
    fn test_elements_at_skips_hidden() {
        let mut track = TimelineTrack::new("T1", TrackKind::Text);
        let mut hidden = TimelineElement::new("hidden", ElementKind::Text, 0.0, 5.0);
        hidden.hidden = true;
        track.add_element(hidden).unwrap();
        track
            .add_element(TimelineElement::new("shown", ElementKind::Text, 0.0, 5.0))
            .unwrap();
        let names: Vec<&str> = track.elements_at(1.0).map(|el| el.name.as_str()).collect();
        assert_eq!(names, vec!["shown"]);
    }

    #[test]
    fn test_find_track_mut() {
        let mut tracks = vec![TimelineTrack::new_main()];
        let id = tracks[0].id;
        assert!(find_track_mut(&mut tracks, id).is_ok());
        assert!(matches!(
            find_track_mut(&mut tracks, Uuid::new_v4()),
            Err(TimelineError::TrackNotFound(_))
        ));
    }
}
