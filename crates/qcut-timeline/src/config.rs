//! Timeline configuration.
//!
//! Every field has a default, so a partial (or missing) config file is valid.

use std::path::{Path, PathBuf};

use qcut_core::{QCutError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::duration::DurationPolicy;
use crate::history::DEFAULT_HISTORY_DEPTH;
use crate::snapping::SnapSettings;

/// Default frame rate for new timelines.
pub const DEFAULT_FPS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub snapping: SnapSettings,
    pub durations: DurationPolicy,
    /// Maximum undo steps kept per session.
    pub history_depth: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            snapping: SnapSettings::default(),
            durations: DurationPolicy::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl TimelineConfig {
    /// `<config dir>/qcut/timeline.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qcut").join("timeline.json"))
    }

    /// Parse a config from JSON.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(data)
            .map_err(|e| QCutError::Config(format!("Invalid timeline config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no timeline config found, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read(path)?;
        let config = Self::from_json(&data)?;
        info!(path = %path.display(), "loaded timeline config");
        Ok(config)
    }

    /// Reject settings the timeline math cannot work with.
    pub fn validate(&self) -> Result<()> {
        let pps = self.snapping.pixels_per_second;
        if !(pps.is_finite() && pps > 0.0) {
            return Err(QCutError::Config(format!(
                "snapping.pixels_per_second must be positive, got {}",
                pps
            )));
        }
        if self.history_depth == 0 {
            return Err(QCutError::Config(
                "history_depth must be at least 1".to_string(),
            ));
        }
        if self.durations.min_export_duration > self.durations.max_export_duration {
            return Err(QCutError::Config(format!(
                "min_export_duration ({}) exceeds max_export_duration ({})",
                self.durations.min_export_duration, self.durations.max_export_duration
            )));
        }
        Ok(())
    }
}
