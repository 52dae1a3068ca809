//! Scene-wide environment settings: ambient lighting and fog

use sceneforge_core::LinearRgba;
use serde::{Deserialize, Serialize};

/// Global ambient lighting, synthesized into one light on the scene root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientSettings {
    /// Ambient color
    pub color: LinearRgba,
    /// Ambient intensity
    pub intensity: f32,
}

impl Default for AmbientSettings {
    fn default() -> Self {
        Self {
            color: LinearRgba::rgb(0.2, 0.2, 0.2),
            intensity: 1.0,
        }
    }
}

/// Fog falloff curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FogMode {
    /// Linear falloff between two distances
    Linear { near: f32, far: f32 },
    /// Exponential-squared falloff
    Exponential { density: f32 },
}

/// Scene fog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FogSettings {
    /// Fog color
    pub color: LinearRgba,
    /// Falloff mode
    pub mode: FogMode,
}
