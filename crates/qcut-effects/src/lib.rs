//! QCut Effects - Effect parameters and their animation
//!
//! Effects carry a base set of numeric parameters. Any parameter can be
//! animated by a keyframe sequence; evaluating an effect at a time overlays
//! the animated values onto the base set.

pub mod animation;
pub mod instance;
pub mod params;

pub use animation::{get_animated_parameters, AnimatedParameter};
pub use instance::EffectInstance;
pub use params::{EffectParameters, ParamDescriptor, ParameterKey};
pub use qcut_core::{EffectKeyframe, Easing, Interpolation};
