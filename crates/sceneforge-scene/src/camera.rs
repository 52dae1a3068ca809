//! Source camera parameters

use serde::{Deserialize, Serialize};

/// Camera projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in degrees
        fov_deg: f32,
        /// Width / height
        aspect: f32,
    },
    Orthographic {
        /// Half-height of the view volume
        size: f32,
        /// Width / height
        aspect: f32,
    },
}

/// Camera attached to a scene node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSource {
    /// Projection parameters
    pub projection: Projection,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
}

impl CameraSource {
    /// Create a perspective camera with common defaults
    pub fn perspective(fov_deg: f32, aspect: f32) -> Self {
        Self {
            projection: Projection::Perspective { fov_deg, aspect },
            near: 0.3,
            far: 1000.0,
        }
    }

    /// Create an orthographic camera
    pub fn orthographic(size: f32, aspect: f32) -> Self {
        Self {
            projection: Projection::Orthographic { size, aspect },
            near: 0.3,
            far: 1000.0,
        }
    }
}
