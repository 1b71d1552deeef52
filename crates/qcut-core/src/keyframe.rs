//! Keyframe interpolation for animated effect parameters.
//!
//! Keyframes are evaluated on demand: every call sorts its own copy, finds the
//! bracketing pair and blends between them. Cubic-Bézier easing converts the
//! normalized progress along x into y with a fixed four-step Newton-Raphson
//! solve, so results carry the same approximation error everywhere the editor
//! evaluates them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ── Easing curves ───────────────────────────────────────────────

/// Newton-Raphson iterations used to invert the Bézier x curve.
pub const BEZIER_NEWTON_ITERATIONS: usize = 4;

/// Cubic Bézier control points for easing (x1, y1, x2, y2).
/// The curve goes from (0,0) to (1,1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build from the `[x1, y1, x2, y2]` layout stored on keyframes.
    pub const fn from_points(points: [f64; 4]) -> Self {
        Self::new(points[0], points[1], points[2], points[3])
    }

    /// One coordinate of the curve at parameter t, given its two inner
    /// control values (the outer ones are fixed at 0 and 1).
    fn sample(t: f64, c1: f64, c2: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * c1 + 3.0 * mt * t * t * c2 + t * t * t
    }

    /// Derivative of a curve coordinate with respect to t.
    fn slope(t: f64, c1: f64, c2: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * c1 + 6.0 * mt * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
    }

    /// Map progress `x` in [0, 1] to the eased value on the curve.
    ///
    /// The parameter is found with exactly [`BEZIER_NEWTON_ITERATIONS`] steps,
    /// starting from `t = x` and stopping early only on a flat slope. The
    /// estimate is not clamped between steps.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let mut t = x;
        for _ in 0..BEZIER_NEWTON_ITERATIONS {
            let slope = Self::slope(t, self.x1, self.x2);
            if slope == 0.0 {
                break;
            }
            t -= (Self::sample(t, self.x1, self.x2) - x) / slope;
        }

        Self::sample(t, self.y1, self.y2)
    }

    // Common easing presets
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);
}

/// Named easing applied to progress between a keyframe and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Uses the keyframe's control points; plain linear when they are missing.
    CubicBezier,
}

/// Apply an easing to normalized progress.
pub fn ease(easing: Easing, progress: f64, control_points: Option<[f64; 4]>) -> f64 {
    let t = progress;
    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => t * (2.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicBezier => match control_points {
            Some(points) => CubicBezier::from_points(points).evaluate(t),
            None => t,
        },
    }
}

/// How values are blended between two keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Eased blend using the earlier keyframe's easing.
    #[default]
    Linear,
    /// Hold the earlier keyframe's value until the next keyframe.
    Step,
    /// Cubic Hermite blend with flat tangents.
    Smooth,
}

// ── Keyframe ────────────────────────────────────────────────────

/// A control point for a single effect parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectKeyframe {
    /// Time in seconds, relative to the owning element.
    pub time: f64,
    pub value: f64,
    /// Easing toward the next keyframe.
    #[serde(default)]
    pub easing: Easing,
    /// Bézier control points `[x1, y1, x2, y2]`, used by `Easing::CubicBezier`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_points: Option<[f64; 4]>,
}

impl EffectKeyframe {
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            easing: Easing::Linear,
            control_points: None,
        }
    }

    pub fn with_easing(time: f64, value: f64, easing: Easing) -> Self {
        Self {
            easing,
            ..Self::new(time, value)
        }
    }

    /// Keyframe eased by a custom cubic Bézier.
    pub fn with_bezier(time: f64, value: f64, curve: CubicBezier) -> Self {
        Self {
            easing: Easing::CubicBezier,
            control_points: Some([curve.x1, curve.y1, curve.x2, curve.y2]),
            ..Self::new(time, value)
        }
    }
}

fn by_time(a: &EffectKeyframe, b: &EffectKeyframe) -> Ordering {
    a.time.total_cmp(&b.time)
}

/// Sort keyframes by time in place. Keyframes sharing a time keep their order.
pub fn sort_keyframes(keyframes: &mut [EffectKeyframe]) {
    keyframes.sort_by(by_time);
}

// ── Keyframe search ─────────────────────────────────────────────

/// The keyframes that bracket a query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surrounding {
    /// No keyframes at all.
    None,
    /// A single keyframe governs the query: the only one, or the boundary
    /// keyframe when the query falls outside the keyframed span.
    Single(EffectKeyframe),
    /// `before.time <= time < after.time`.
    Between(EffectKeyframe, EffectKeyframe),
}

/// Find the keyframes surrounding `time`.
pub fn find_surrounding_keyframes(keyframes: &[EffectKeyframe], time: f64) -> Surrounding {
    let mut sorted = keyframes.to_vec();
    sort_keyframes(&mut sorted);

    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Surrounding::None,
    };

    if sorted.len() == 1 || time <= first.time {
        return Surrounding::Single(first);
    }
    if time >= last.time {
        return Surrounding::Single(last);
    }

    sorted
        .windows(2)
        .find(|pair| pair[0].time <= time && time < pair[1].time)
        .map(|pair| Surrounding::Between(pair[0], pair[1]))
        .unwrap_or(Surrounding::Single(last))
}

// ── Interpolation ───────────────────────────────────────────────

/// Evaluate a keyframe sequence at `time`.
///
/// An empty sequence evaluates to 0.0. Queries outside the keyframed span
/// hold the nearest boundary value.
pub fn interpolate_keyframes(
    keyframes: &[EffectKeyframe],
    time: f64,
    interpolation: Interpolation,
) -> f64 {
    let (before, after) = match find_surrounding_keyframes(keyframes, time) {
        Surrounding::None => return 0.0,
        Surrounding::Single(kf) => return kf.value,
        Surrounding::Between(before, after) => (before, after),
    };

    let span = after.time - before.time;
    if span.is_nan() || span <= 0.0 {
        return before.value;
    }
    let progress = (time - before.time) / span;

    match interpolation {
        Interpolation::Step => before.value,
        Interpolation::Linear => {
            let eased = ease(before.easing, progress, before.control_points);
            before.value + (after.value - before.value) * eased
        }
        Interpolation::Smooth => hermite(before.value, after.value, progress),
    }
}

/// Cubic Hermite blend between two values with both tangents fixed at zero.
fn hermite(p0: f64, p1: f64, t: f64) -> f64 {
    const M0: f64 = 0.0;
    const M1: f64 = 0.0;

    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * p0 + h10 * M0 + h01 * p1 + h11 * M1
}

// ── Tests ───────────────────────────────────────────────────────
