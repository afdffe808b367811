//! Static and idle models placed in the world

use void_ecs::prelude::*;

/// A model the renderer should draw at the entity's transform.
///
/// Carries only what the renderer needs to find and place the asset; the
/// simulation never reads it back.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneModel {
    resource: String,
    animation: Option<String>,
    scale: f32,
}

impl SceneModel {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            animation: None,
            scale: 1.0,
        }
    }

    /// Loop this clip once the model is loaded
    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn animation(&self) -> Option<&str> {
        self.animation.as_deref()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Component for SceneModel {
    fn capability(&self) -> Capability {
        Capability::Model
    }
}
