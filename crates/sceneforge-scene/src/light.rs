//! Source light parameters

use sceneforge_core::LinearRgba;
use serde::{Deserialize, Serialize};

/// Source light sub-type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
    /// Baked-only area light; the target runtime has no counterpart, the
    /// exporter emits a generic light record for it.
    Area,
}

/// Light attached to a scene node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightSource {
    /// Light sub-type
    pub kind: LightKind,
    /// Light color
    pub color: LinearRgba,
    /// Brightness multiplier
    pub intensity: f32,
    /// Influence range (point/spot)
    pub range: f32,
    /// Full cone angle in degrees (spot)
    pub spot_angle_deg: f32,
    /// Whether this light casts shadows
    pub cast_shadows: bool,
}

impl LightSource {
    /// Create a light of the given kind with neutral defaults
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            color: LinearRgba::WHITE,
            intensity: 1.0,
            range: 10.0,
            spot_angle_deg: 30.0,
            cast_shadows: false,
        }
    }
}
