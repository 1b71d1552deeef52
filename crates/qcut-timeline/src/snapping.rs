//! Snapping engine for timeline drags.

use qcut_core::snap_time_to_frame;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::TimelineElement;
use crate::track::TimelineTrack;

/// A time on the timeline that can be snapped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub time: f64,
    pub kind: SnapKind,
}

/// Kind of snap point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    ElementStart,
    ElementEnd,
    Playhead,
    Marker,
    /// Produced by frame-grid snapping, never collected.
    Frame,
}

/// Result of a successful snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub time: f64,
    pub kind: SnapKind,
}

/// Snapping behavior, loaded as part of the timeline config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    pub enabled: bool,
    /// Snap distance in pixels (divided by the current scale).
    pub snap_distance_px: f64,
    /// Horizontal pixels per second at zoom 1.0.
    pub pixels_per_second: f64,
    /// Also snap to frame boundaries at the timeline frame rate.
    pub snap_to_frames: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            snap_distance_px: 10.0,
            pixels_per_second: 50.0,
            snap_to_frames: true,
        }
    }
}

/// Engine for computing snap targets.
#[derive(Debug, Clone, Default)]
pub struct SnappingEngine {
    pub settings: SnapSettings,
    /// Frame rate used for frame-grid snapping.
    pub fps: f64,
}

impl SnappingEngine {
    pub fn new(settings: SnapSettings, fps: f64) -> Self {
        Self { settings, fps }
    }

    /// Collect snap points from every track, the playhead and markers.
    /// Edges of `exclude` (usually the element being dragged) are skipped.
    pub fn collect_snap_points(
        tracks: &[TimelineTrack],
        playhead: f64,
        markers: &[f64],
        exclude: Option<Uuid>,
    ) -> Vec<SnapPoint> {
        let mut points = vec![SnapPoint {
            time: playhead,
            kind: SnapKind::Playhead,
        }];

        for element in tracks
            .iter()
            .flat_map(|track| &track.elements)
            .filter(|el| Some(el.id) != exclude)
        {
            points.push(SnapPoint {
                time: element.start_time,
                kind: SnapKind::ElementStart,
            });
            points.push(SnapPoint {
                time: element.effective_end(),
                kind: SnapKind::ElementEnd,
            });
        }

        points.extend(markers.iter().map(|&time| SnapPoint {
            time,
            kind: SnapKind::Marker,
        }));

        points
    }

    /// Snap threshold in seconds at the given zoom.
    fn threshold(&self, zoom: f64) -> f64 {
        self.settings.snap_distance_px / (self.settings.pixels_per_second * zoom)
    }

    fn can_snap(&self, zoom: f64) -> bool {
        self.settings.enabled && zoom > 0.0 && self.settings.pixels_per_second > 0.0
    }

    /// Closest collected point within the threshold.
    fn nearest_point(&self, time: f64, points: &[SnapPoint], zoom: f64) -> Option<Snap> {
        let threshold = self.threshold(zoom);
        let mut best: Option<(Snap, f64)> = None;

        for sp in points {
            let dist = (sp.time - time).abs();
            if dist <= threshold && best.map_or(true, |(_, d)| dist < d) {
                best = Some((
                    Snap {
                        time: sp.time,
                        kind: sp.kind,
                    },
                    dist,
                ));
            }
        }

        best.map(|(snap, _)| snap)
    }

    /// Nearest frame boundary, if frame snapping is on and it is in range.
    fn nearest_frame(&self, time: f64, zoom: f64) -> Option<Snap> {
        if !self.settings.snap_to_frames || self.fps <= 0.0 {
            return None;
        }
        let snapped = snap_time_to_frame(time, self.fps);
        ((snapped - time).abs() <= self.threshold(zoom)).then_some(Snap {
            time: snapped,
            kind: SnapKind::Frame,
        })
    }

    /// Find the closest snap target within the snap distance.
    ///
    /// Collected points take precedence; the frame grid is only used when no
    /// point is in range.
    pub fn find_snap(&self, time: f64, points: &[SnapPoint], zoom: f64) -> Option<Snap> {
        if !self.can_snap(zoom) {
            return None;
        }
        self.nearest_point(time, points, zoom)
            .or_else(|| self.nearest_frame(time, zoom))
    }

    /// Snap a dragged element's new start. Its leading edge, then its trailing
    /// edge is tried against the collected points before falling back to the
    /// frame grid. Returns the (possibly unchanged) start time.
    pub fn snap_element(
        &self,
        element: &TimelineElement,
        new_start: f64,
        points: &[SnapPoint],
        zoom: f64,
    ) -> f64 {
        if !self.can_snap(zoom) {
            return new_start;
        }
        if let Some(snap) = self.nearest_point(new_start, points, zoom) {
            return snap.time;
        }
        let length = element.effective_duration();
        if let Some(snap) = self.nearest_point(new_start + length, points, zoom) {
            return snap.time - length;
        }
        self.nearest_frame(new_start, zoom)
            .map_or(new_start, |snap| snap.time)
    }
}
