//! Keyframed effect parameters.

use qcut_core::keyframe::sort_keyframes;
use qcut_core::{interpolate_keyframes, EffectKeyframe, Easing, Interpolation};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::params::{EffectParameters, ParameterKey};

/// A keyframe sequence driving one effect parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimatedParameter {
    pub parameter: ParameterKey,
    #[serde(default)]
    pub keyframes: Vec<EffectKeyframe>,
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl AnimatedParameter {
    pub fn new(parameter: ParameterKey, interpolation: Interpolation) -> Self {
        Self {
            parameter,
            keyframes: Vec::new(),
            interpolation,
        }
    }

    /// Value at `time` (seconds relative to the owning element).
    pub fn value_at(&self, time: f64) -> f64 {
        interpolate_keyframes(&self.keyframes, time, self.interpolation)
    }

    /// Insert or update the keyframe at exactly `time`, keeping time order.
    /// Control points survive only while the easing stays cubic-bezier.
    pub fn set_keyframe(&mut self, time: f64, value: f64, easing: Easing) {
        if let Some(kf) = self.keyframes.iter_mut().find(|kf| kf.time == time) {
            kf.value = value;
            kf.easing = easing;
            if easing != Easing::CubicBezier {
                kf.control_points = None;
            }
            return;
        }
        self.keyframes
            .push(EffectKeyframe::with_easing(time, value, easing));
        sort_keyframes(&mut self.keyframes);
    }

    /// Remove the keyframe at exactly `time`.
    pub fn remove_keyframe(&mut self, time: f64) -> bool {
        match self.keyframes.iter().position(|kf| kf.time == time) {
            Some(pos) => {
                self.keyframes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether the value changes over time.
    pub fn is_animated(&self) -> bool {
        self.keyframes.len() > 1
    }

    /// First and last keyframe times.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let first = self.keyframes.iter().map(|kf| kf.time).reduce(f64::min)?;
        let last = self.keyframes.iter().map(|kf| kf.time).reduce(f64::max)?;
        Some((first, last))
    }
}

/// Evaluate every animated parameter at `time` and overlay the results on a
/// copy of `base`. Later animations of the same parameter win.
pub fn get_animated_parameters(
    base: &EffectParameters,
    animations: &[AnimatedParameter],
    time: f64,
) -> EffectParameters {
    let mut params = base.clone();
    for animation in animations {
        let value = animation.value_at(time);
        trace!(parameter = ?animation.parameter, time, value, "evaluated animated parameter");
        params.set(animation.parameter, value);
    }
    params
}
