//! Effect parameter keys and parameter sets.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric effect parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterKey {
    Brightness,
    Contrast,
    Saturation,
    Hue,
    Gamma,
    Exposure,
    Blur,
    Sharpen,
    Vignette,
    Grain,
    Opacity,
    Scale,
    Rotation,
    X,
    Y,
}

/// Effect parameter descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    pub key: ParameterKey,
    pub display_name: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 15] = [
        ParameterKey::Brightness,
        ParameterKey::Contrast,
        ParameterKey::Saturation,
        ParameterKey::Hue,
        ParameterKey::Gamma,
        ParameterKey::Exposure,
        ParameterKey::Blur,
        ParameterKey::Sharpen,
        ParameterKey::Vignette,
        ParameterKey::Grain,
        ParameterKey::Opacity,
        ParameterKey::Scale,
        ParameterKey::Rotation,
        ParameterKey::X,
        ParameterKey::Y,
    ];

    /// UI name, default and range for this parameter.
    pub fn descriptor(self) -> ParamDescriptor {
        let (display_name, default, min, max) = match self {
            ParameterKey::Brightness => ("Brightness", 0.0, -100.0, 100.0),
            ParameterKey::Contrast => ("Contrast", 0.0, -100.0, 100.0),
            ParameterKey::Saturation => ("Saturation", 0.0, -100.0, 100.0),
            ParameterKey::Hue => ("Hue", 0.0, -180.0, 180.0),
            ParameterKey::Gamma => ("Gamma", 1.0, 0.1, 3.0),
            ParameterKey::Exposure => ("Exposure", 0.0, -5.0, 5.0),
            ParameterKey::Blur => ("Blur", 0.0, 0.0, 100.0),
            ParameterKey::Sharpen => ("Sharpen", 0.0, 0.0, 100.0),
            ParameterKey::Vignette => ("Vignette", 0.0, 0.0, 100.0),
            ParameterKey::Grain => ("Grain", 0.0, 0.0, 100.0),
            ParameterKey::Opacity => ("Opacity", 100.0, 0.0, 100.0),
            ParameterKey::Scale => ("Scale", 100.0, 1.0, 1000.0),
            ParameterKey::Rotation => ("Rotation", 0.0, -360.0, 360.0),
            ParameterKey::X => ("Position X", 0.0, f64::MIN, f64::MAX),
            ParameterKey::Y => ("Position Y", 0.0, f64::MIN, f64::MAX),
        };
        ParamDescriptor {
            key: self,
            display_name,
            default,
            min,
            max,
        }
    }

    pub fn display_name(self) -> &'static str {
        self.descriptor().display_name
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A set of parameter values. Parameters that are not set are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectParameters {
    values: BTreeMap<ParameterKey, f64>,
}

impl EffectParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: ParameterKey, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: ParameterKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Value of `key`, or its descriptor default when unset.
    pub fn get_or_default(&self, key: ParameterKey) -> f64 {
        self.get(key).unwrap_or_else(|| key.descriptor().default)
    }

    pub fn set(&mut self, key: ParameterKey, value: f64) {
        self.values.insert(key, value);
    }

    pub fn remove(&mut self, key: ParameterKey) -> Option<f64> {
        self.values.remove(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of `self` with every value in `overlay` written on top.
    pub fn merge_over(&self, overlay: &EffectParameters) -> EffectParameters {
        let mut merged = self.clone();
        merged.values.extend(overlay.iter());
        merged
    }
}

impl FromIterator<(ParameterKey, f64)> for EffectParameters {
    fn from_iter<I: IntoIterator<Item = (ParameterKey, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
