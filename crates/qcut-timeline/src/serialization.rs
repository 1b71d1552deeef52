//! Timeline file serialization with versioning and migration.
//!
//! Uses JSON with a schema version field for forward-compatible persistence.

use qcut_core::{QCutError, Result};
use serde::{Deserialize, Serialize};

use crate::project::Timeline;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned timeline file wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineFile {
    /// Schema version for migration.
    pub version: u32,
    /// The timeline data.
    pub timeline: Timeline,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl TimelineFile {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            version: CURRENT_VERSION,
            timeline,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            QCutError::Serialization(format!("Failed to serialize timeline: {}", e))
        })
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| QCutError::Serialization(format!("Invalid JSON: {}", e)))?;
        Self::from_value(raw)
    }

    /// Deserialize from an already-parsed JSON value, applying migrations.
    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        let version = match raw.get("version").and_then(|v| v.as_u64()) {
            Some(v) => u32::try_from(v).map_err(|_| {
                QCutError::Serialization(format!("Timeline file version {} is out of range", v))
            })?,
            None => 0,
        };

        if version > CURRENT_VERSION {
            return Err(QCutError::Serialization(format!(
                "Timeline file version {} is newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }

        let migrated = migrate(raw, version)?;

        serde_json::from_value(migrated)
            .map_err(|e| QCutError::Serialization(format!("Failed to parse timeline: {}", e)))
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: the bare timeline object gets the versioned wrapper
                if data.get("timeline").is_none() {
                    data = serde_json::json!({
                        "version": 1,
                        "timeline": data,
                        "app_version": "0.0.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(QCutError::Serialization(format!(
                    "No migration path from version {}",
                    version
                )));
            }
        }
    }

    Ok(data)
}
