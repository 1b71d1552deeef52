//! Integration tests for the timeline subsystem.
//!
//! Exercises cross-crate interactions between qcut-core and qcut-timeline.

use qcut_core::{snap_time_to_frame, FrameRate};
use qcut_timeline::{
    check_element_overlaps, resolve_element_overlaps, sort_tracks_by_order, total_tracks_height,
    validate_export_duration, ElementKind, History, SnappingEngine, Timeline, TimelineConfig,
    TimelineElement, TimelineFile, TimelineTrack, TrackKind,
};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn element(name: &str, kind: ElementKind, start: f64, duration: f64) -> TimelineElement {
    TimelineElement::new(name, kind, start, duration)
}

fn build_timeline() -> Timeline {
    let mut timeline = Timeline::new("Integration Test Timeline", 30.0);

    let main = &mut timeline.tracks[0];
    main.add_element(element("Intro", ElementKind::Video, 0.0, 5.0))
        .unwrap();
    main.add_element(element("Body", ElementKind::Video, 5.0, 30.0).with_trim(2.0, 3.0))
        .unwrap();
    main.add_element(element("Outro", ElementKind::Image, 30.0, 10.0))
        .unwrap();

    let mut music = TimelineTrack::new("Music", TrackKind::Audio);
    music
        .add_element(element("Score", ElementKind::Audio, 0.0, 45.0))
        .unwrap();
    timeline.add_track(music);

    let mut titles = TimelineTrack::new("Titles", TrackKind::Text);
    titles
        .add_element(element("Title", ElementKind::Text, 1.0, 3.0))
        .unwrap();
    timeline.add_track(titles);

    timeline
}

// ── Timing ─────────────────────────────────────────────────────

#[test]
fn timeline_duration_is_max_effective_end() {
    let timeline = build_timeline();
    assert_eq!(timeline.duration(), 45.0);
}

#[test]
fn trimmed_body_leaves_room_for_outro() {
    let timeline = build_timeline();
    // Body: 5 + (30 - 2 - 3) = 30, Outro starts at 30
    assert!(!check_element_overlaps(&timeline.tracks[0].elements));
}

#[test]
fn export_is_clamped_to_configured_max() {
    let config: TimelineConfig =
        TimelineConfig::from_json(br#"{"durations": {"max_export_duration": 30}}"#).unwrap();
    let timeline = build_timeline();
    let policy = &config.durations;
    assert_eq!(
        policy.export_duration(timeline.duration(), policy.max_export_duration),
        30.0
    );
    assert_eq!(validate_export_duration(-5.0, 600.0), 0.1);
    assert_eq!(validate_export_duration(700.0, 600.0), 600.0);
}

// ── Layout ─────────────────────────────────────────────────────

#[test]
fn tracks_stack_text_main_audio() {
    let timeline = build_timeline();
    let ordered = sort_tracks_by_order(&timeline.tracks);
    let kinds: Vec<TrackKind> = ordered.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TrackKind::Text, TrackKind::Media, TrackKind::Audio]);
    assert_eq!(total_tracks_height(&ordered), 25.0 + 65.0 + 50.0 + 2.0 * 4.0);
}

// ── Editing with history ───────────────────────────────────────

#[test]
fn dragged_element_is_resolved_and_undoable() {
    let mut timeline = build_timeline();
    let mut history: History<Vec<TimelineTrack>> = History::new(50);
    let intro_id = timeline.tracks[0].elements[0].id;

    // Drag Intro onto Body, recording the prior state
    history.push(timeline.tracks.clone());
    timeline.tracks[0]
        .element_mut(intro_id)
        .unwrap()
        .start_time = 6.0;
    assert!(timeline.tracks[0].has_overlaps());

    history.push(timeline.tracks.clone());
    let moved = timeline.resolve_all_overlaps();
    assert!(moved >= 1);
    assert!(timeline.tracks_with_overlaps().is_empty());

    // Undo the resolution, then the drag
    assert!(history.undo(&mut timeline.tracks));
    assert!(timeline.tracks[0].has_overlaps());
    assert!(history.undo(&mut timeline.tracks));
    assert!(!timeline.tracks[0].has_overlaps());
    assert_eq!(
        timeline.tracks[0].element(intro_id).unwrap().start_time,
        0.0
    );

    // Nothing left: the live tracks stay as they are
    assert!(!history.undo(&mut timeline.tracks));
    assert_eq!(timeline.tracks.len(), 3);
}

#[test]
fn snapping_drag_lands_on_frame_and_edge() {
    let timeline = build_timeline();
    let config = TimelineConfig::default();
    let engine = SnappingEngine::new(config.snapping, timeline.fps);
    let title = &timeline.tracks[2].elements[0];

    let points = SnappingEngine::collect_snap_points(&timeline.tracks, 12.0, &[], Some(title.id));
    // Leading edge near the end of Intro (5.0)
    let start = engine.snap_element(title, 5.05, &points, 1.0);
    assert_eq!(start, 5.0);

    // Away from edges, the frame grid applies
    let start = engine.snap_element(title, 20.51, &points, 1.0);
    assert_eq!(start, snap_time_to_frame(20.51, FrameRate::FPS_30.fps()));
}

// ── Resolution properties across crates ────────────────────────

#[test]
fn resolution_preserves_ids_and_order() {
    let elements: Vec<TimelineElement> = (0..20)
        .map(|i| element("clip", ElementKind::Video, (19 - i) as f64 * 0.5, 2.0))
        .collect();
    let resolved = resolve_element_overlaps(&elements);
    assert!(!check_element_overlaps(&resolved));

    let mut ids: Vec<Uuid> = elements.iter().map(|e| e.id).collect();
    ids.reverse();
    let resolved_ids: Vec<Uuid> = resolved.iter().map(|e| e.id).collect();
    assert_eq!(resolved_ids, ids);
    // 20 back-to-back two-second clips
    assert_eq!(resolved.last().unwrap().effective_end(), 40.0);
}

// ── Serialization roundtrip ────────────────────────────────────

#[test]
fn timeline_survives_serialization_roundtrip() {
    let file = TimelineFile::new(build_timeline());

    let json = file.to_json().unwrap();
    let loaded = TimelineFile::from_json(&json).unwrap();

    assert_eq!(loaded.timeline.name, "Integration Test Timeline");
    assert_eq!(loaded.timeline.tracks.len(), 3);
    assert_eq!(loaded.timeline.tracks[0].elements[1].trim_end, 3.0);
    assert_eq!(loaded.timeline.duration(), 45.0);
}

#[test]
fn timeline_json_uses_editor_field_names() {
    let json = TimelineFile::new(build_timeline()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    let first = &value["timeline"]["tracks"][0];
    assert_eq!(first["isMain"], true);
    assert_eq!(first["kind"], "media");
    assert_eq!(first["elements"][1]["trimStart"], 2.0);
}
