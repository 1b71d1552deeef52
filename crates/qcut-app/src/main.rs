//! QCut timeline inspector
//!
//! Loads a saved session, reports track layout, overlaps and durations, and
//! optionally resolves overlaps (undoable through the history saved in the
//! session) or samples animated effect parameters.

mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use qcut_core::{format_timecode, TimecodeFormat};
use qcut_timeline::{
    cumulative_height_before, find_overlapping_pairs, track_height, TimelineConfig, TimelineTrack,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

use crate::session::Session;

/// Inspect and tidy a QCut editing session
#[derive(Parser, Debug)]
#[command(name = "qcut", version, about, long_about = None)]
struct Args {
    /// Session file (timeline, effects and history)
    #[arg(value_name = "SESSION")]
    session: PathBuf,

    /// Print animated effect parameters at this time (seconds)
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    at: Option<f64>,

    /// Resolve overlapping elements and save the session
    #[arg(long, conflicts_with_all = ["undo", "redo"])]
    fix: bool,

    /// Restore the tracks from before the last saved edit
    #[arg(long, conflicts_with = "redo")]
    undo: bool,

    /// Reapply the last undone edit
    #[arg(long)]
    redo: bool,

    /// Timeline config file (defaults to the per-user config)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Track edit requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Fix,
    Undo,
    Redo,
}

impl Args {
    fn edit(&self) -> Option<Edit> {
        if self.fix {
            Some(Edit::Fix)
        } else if self.undo {
            Some(Edit::Undo)
        } else if self.redo {
            Some(Edit::Redo)
        } else {
            None
        }
    }
}

fn load_config(explicit: Option<&PathBuf>) -> Result<TimelineConfig> {
    if let Some(path) = explicit {
        return TimelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    let Some(path) = TimelineConfig::default_path() else {
        return Ok(TimelineConfig::default());
    };
    match TimelineConfig::load(&path) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("ignoring unreadable config {}: {}", path.display(), e);
            Ok(TimelineConfig::default())
        }
    }
}

fn element_name(track: &TimelineTrack, id: Uuid) -> &str {
    track.element(id).map_or("?", |el| el.name.as_str())
}

fn report_tracks(session: &Session) {
    let timeline = &session.timeline.timeline;
    let ordered = timeline.tracks_in_order();

    println!("Timeline \"{}\" at {} fps", timeline.name, timeline.fps);
    for (index, track) in ordered.iter().enumerate() {
        println!(
            "  [{:>4.0}px +{:>2.0}] {:<16} {:?}{} {} elements, ends {}",
            cumulative_height_before(&ordered, index),
            track_height(track.kind),
            track.name,
            track.kind,
            if track.is_main { " (main)" } else { "" },
            track.elements.len(),
            format_timecode(track.duration(), TimecodeFormat::Frames, timeline.fps),
        );
        for (a, b) in find_overlapping_pairs(&track.elements) {
            println!(
                "      overlap: {} / {}",
                element_name(track, a),
                element_name(track, b)
            );
        }
    }
}

fn report_durations(session: &Session, config: &TimelineConfig) {
    let timeline = &session.timeline.timeline;
    let policy = &config.durations;
    let content = timeline.duration();
    let export = policy.export_duration(content, policy.max_export_duration);

    println!(
        "Content {:.3}s, display {:.3}s, export {:.3}s",
        content,
        timeline.display_duration(policy),
        export
    );
    if export < content {
        warn!(
            content,
            max = policy.max_export_duration,
            "export will be truncated"
        );
    }
}

fn report_effects_at(session: &Session, time: f64) {
    let fps = session.timeline.timeline.fps;
    let time = qcut_core::snap_time_to_frame(time, fps);
    println!(
        "Effects at {}",
        format_timecode(time, TimecodeFormat::Frames, fps)
    );

    for effect in &session.effects {
        let Some(element) = session.find_element(effect.element_id) else {
            warn!(effect = %effect.id, "effect targets a missing element");
            continue;
        };
        if !element.contains(time) {
            continue;
        }
        let params = effect.parameters_at(element.local_time(time));
        let values: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={:.3}", key, value))
            .collect();
        println!("  {} on {}: {}", effect.name, element.name, values.join(", "));
    }
}

/// Resolve overlaps on every track, recording the previous tracks in history.
fn fix_overlaps(session: &mut Session, depth: usize) -> usize {
    let before = session.timeline.timeline.tracks.clone();
    let moved = session.timeline.timeline.resolve_all_overlaps();
    if moved > 0 {
        session.history_mut(depth).push(before);
    }
    moved
}

/// Apply `edit` to the session's tracks. Returns whether anything changed.
fn apply_edit(session: &mut Session, edit: Edit, depth: usize) -> bool {
    match edit {
        Edit::Fix => {
            let moved = fix_overlaps(session, depth);
            info!(moved, "resolved overlaps");
            moved > 0
        }
        Edit::Undo | Edit::Redo => {
            let Some(history) = session.history.as_mut() else {
                warn!("session has no edit history");
                return false;
            };
            let tracks = &mut session.timeline.timeline.tracks;
            let changed = match edit {
                Edit::Undo => history.undo(tracks),
                _ => history.redo(tracks),
            };
            if !changed {
                warn!(?edit, "nothing to restore");
            }
            changed
        }
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let mut session = Session::load(&args.session)?;
    info!(
        path = %args.session.display(),
        tracks = session.timeline.timeline.tracks.len(),
        effects = session.effects.len(),
        "session loaded"
    );

    if let Some(edit) = args.edit() {
        if apply_edit(&mut session, edit, config.history_depth) {
            session.save(&args.session)?;
            info!(?edit, "saved session");
        }
    }

    report_tracks(&session);
    report_durations(&session, &config);

    if let Some(time) = args.at {
        report_effects_at(&session, time);
    }

    Ok(())
}
