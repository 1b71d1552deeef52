//! Effects applied to timeline elements.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::animation::{get_animated_parameters, AnimatedParameter};
use crate::params::EffectParameters;

/// An effect attached to one timeline element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectInstance {
    pub id: Uuid,
    pub name: String,
    /// The element this effect is applied to.
    pub element_id: Uuid,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub parameters: EffectParameters,
    #[serde(default)]
    pub animations: Vec<AnimatedParameter>,
}

fn default_enabled() -> bool {
    true
}

impl EffectInstance {
    pub fn new(name: impl Into<String>, element_id: Uuid, parameters: EffectParameters) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            element_id,
            enabled: true,
            parameters,
            animations: Vec::new(),
        }
    }

    pub fn with_animation(mut self, animation: AnimatedParameter) -> Self {
        self.animations.push(animation);
        self
    }

    /// Parameters at `local_time` (seconds from the element's start).
    /// Disabled effects are not animated.
    pub fn parameters_at(&self, local_time: f64) -> EffectParameters {
        if !self.enabled {
            return self.parameters.clone();
        }
        get_animated_parameters(&self.parameters, &self.animations, local_time)
    }

    pub fn is_animated(&self) -> bool {
        self.animations.iter().any(AnimatedParameter::is_animated)
    }
}
