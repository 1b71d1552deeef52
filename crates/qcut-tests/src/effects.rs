//! Integration tests for effects evaluated on timeline elements.

use proptest::prelude::*;
use qcut_core::{interpolate_keyframes, CubicBezier, EffectKeyframe, Easing, Interpolation};
use qcut_effects::{
    get_animated_parameters, AnimatedParameter, EffectInstance, EffectParameters, ParameterKey,
};
use qcut_timeline::{ElementKind, TimelineElement};

fn fade(interpolation: Interpolation) -> AnimatedParameter {
    let mut anim = AnimatedParameter::new(ParameterKey::Opacity, interpolation);
    anim.set_keyframe(0.0, 0.0, Easing::Linear);
    anim.set_keyframe(10.0, 100.0, Easing::Linear);
    anim
}

#[test]
fn linear_fade_is_half_way_at_midpoint() {
    assert!((fade(Interpolation::Linear).value_at(5.0) - 50.0).abs() < 1e-9);
}

#[test]
fn step_fade_holds_until_next_keyframe() {
    let anim = fade(Interpolation::Step);
    assert_eq!(anim.value_at(5.0), 0.0);
    assert_eq!(anim.value_at(10.0), 100.0);
}

#[test]
fn smooth_fade_is_symmetric() {
    let anim = fade(Interpolation::Smooth);
    assert!((anim.value_at(5.0) - 50.0).abs() < 1e-9);
    let low = anim.value_at(2.0);
    let high = anim.value_at(8.0);
    assert!((low + high - 100.0).abs() < 1e-9);
    assert!(low < 20.0);
}

#[test]
fn effect_uses_element_local_time() {
    let clip = TimelineElement::new("clip", ElementKind::Video, 4.0, 10.0);
    let effect = EffectInstance::new(
        "Fade In",
        clip.id,
        EffectParameters::new().with(ParameterKey::Contrast, 12.0),
    )
    .with_animation(fade(Interpolation::Linear));

    // Timeline 9.0 is 5.0 into the clip
    let params = effect.parameters_at(clip.local_time(9.0));
    assert!((params.get_or_default(ParameterKey::Opacity) - 50.0).abs() < 1e-9);
    assert_eq!(params.get(ParameterKey::Contrast), Some(12.0));

    // Before the clip the first keyframe holds
    let params = effect.parameters_at(clip.local_time(1.0));
    assert_eq!(params.get(ParameterKey::Opacity), Some(0.0));
}

#[test]
fn bezier_keyframe_follows_four_step_solve() {
    let steep = CubicBezier::new(0.9, 0.0, 0.1, 1.0);
    let keyframes = vec![
        EffectKeyframe::with_bezier(0.0, 0.0, steep),
        EffectKeyframe::new(2.0, 100.0),
    ];
    // Progress 0.45 of the span
    let value = interpolate_keyframes(&keyframes, 0.9, Interpolation::Linear);
    assert!((value - 23.326953006362064).abs() < 1e-9, "got {}", value);
    // A fully converged solve would give 23.3301632...
    assert!((value - 23.3301632387445).abs() > 1e-3);
}

#[test]
fn later_animation_of_same_parameter_wins() {
    let mut constant = AnimatedParameter::new(ParameterKey::Opacity, Interpolation::Linear);
    constant.set_keyframe(0.0, 30.0, Easing::Linear);
    let params = get_animated_parameters(
        &EffectParameters::new(),
        &[fade(Interpolation::Linear), constant],
        5.0,
    );
    assert_eq!(params.get(ParameterKey::Opacity), Some(30.0));
}

#[test]
fn effect_deserializes_from_editor_json() {
    let clip = TimelineElement::new("clip", ElementKind::Image, 0.0, 3.0);
    let json = serde_json::json!({
        "id": uuid::Uuid::new_v4(),
        "name": "Zoom",
        "elementId": clip.id,
        "parameters": { "scale": 100.0 },
        "animations": [{
            "parameter": "scale",
            "interpolation": "linear",
            "keyframes": [
                { "time": 0, "value": 100, "easing": "ease-out" },
                { "time": 2, "value": 200 }
            ]
        }]
    });
    let effect: EffectInstance = serde_json::from_value(json).unwrap();
    assert_eq!(effect.element_id, clip.id);

    // ease-out at half way: 0.5 * (2 - 0.5)
    let scale = effect.parameters_at(1.0).get_or_default(ParameterKey::Scale);
    assert!((scale - 175.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn empty_animation_evaluates_to_zero(t in -100.0f64..100.0) {
        let anim = AnimatedParameter::new(ParameterKey::Hue, Interpolation::Smooth);
        prop_assert_eq!(anim.value_at(t), 0.0);
    }

    #[test]
    fn single_keyframe_is_constant(
        at in -50.0f64..50.0,
        value in -1000.0f64..1000.0,
        t in -100.0f64..100.0,
    ) {
        let mut anim = AnimatedParameter::new(ParameterKey::Rotation, Interpolation::Linear);
        anim.set_keyframe(at, value, Easing::EaseInOut);
        prop_assert_eq!(anim.value_at(t), value);
    }

    #[test]
    fn linear_values_stay_between_keyframes(
        a in -100.0f64..100.0,
        b in -100.0f64..100.0,
        t in 0.0f64..10.0,
    ) {
        let mut anim = AnimatedParameter::new(ParameterKey::X, Interpolation::Linear);
        anim.set_keyframe(0.0, a, Easing::Linear);
        anim.set_keyframe(10.0, b, Easing::Linear);
        let v = anim.value_at(t);
        prop_assert!(v >= a.min(b) - 1e-9 && v <= a.max(b) + 1e-9);
    }
}
