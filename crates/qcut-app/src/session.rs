//! Saved editing session: a timeline file, the effects on its elements and
//! the undo history of track edits made from the command line.

use std::path::Path;

use anyhow::{Context, Result};
use qcut_effects::EffectInstance;
use qcut_timeline::{History, TimelineElement, TimelineFile, TimelineTrack};
use serde::Serialize;
use uuid::Uuid;

pub type TrackHistory = History<Vec<TimelineTrack>>;

#[derive(Debug, Serialize)]
pub struct Session {
    pub timeline: TimelineFile,
    pub effects: Vec<EffectInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<TrackHistory>,
}

impl Session {
    pub fn new(timeline: TimelineFile) -> Self {
        Self {
            timeline,
            effects: Vec::new(),
            history: None,
        }
    }

    /// Parse a session. The embedded timeline goes through the timeline
    /// file migrations.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let mut raw: serde_json::Value =
            serde_json::from_slice(data).context("session is not valid JSON")?;

        let timeline = raw
            .get_mut("timeline")
            .map(serde_json::Value::take)
            .context("session has no \"timeline\" entry")?;
        let timeline = TimelineFile::from_value(timeline)?;

        let effects = match raw.get_mut("effects").map(serde_json::Value::take) {
            Some(value) => serde_json::from_value(value).context("invalid \"effects\" entry")?,
            None => Vec::new(),
        };

        let history = match raw.get_mut("history").map(serde_json::Value::take) {
            Some(value) => Some(serde_json::from_value(value).context("invalid \"history\" entry")?),
            None => None,
        };

        Ok(Self {
            timeline,
            effects,
            history,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("loading session {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
    }

    /// The saved history, created with `depth` if the session has none yet.
    pub fn history_mut(&mut self, depth: usize) -> &mut TrackHistory {
        self.history.get_or_insert_with(|| History::new(depth))
    }

    pub fn find_element(&self, id: Uuid) -> Option<&TimelineElement> {
        self.timeline
            .timeline
            .tracks
            .iter()
            .find_map(|track| track.element(id))
    }
}
