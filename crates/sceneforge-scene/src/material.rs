//! Source materials and textures

use std::path::PathBuf;

use sceneforge_core::LinearRgba;
use serde::{Deserialize, Serialize};

/// Index of a material in the scene's pre-enumerated material table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialHandle(pub usize);

/// Index of a texture in the scene's pre-enumerated texture table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub usize);

/// Shading model the source material was authored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadingModel {
    /// Unlit flat color/texture
    Basic,
    /// Specular-shininess lit shading
    Phong,
}

/// Texture coordinate wrapping behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    Repeat,
    Clamp,
    Mirror,
}

/// Source material properties
///
/// Optional fields model shader properties the source material may not
/// expose; absence is not an error, the exporter simply omits the
/// corresponding output field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialData {
    /// Material name
    pub name: String,
    /// Shading model
    pub shading: ShadingModel,
    /// Base color; the alpha channel doubles as opacity
    pub color: LinearRgba,
    /// Specular color, when the shader exposes one
    pub specular: Option<LinearRgba>,
    /// Emissive color, when the shader exposes one
    pub emissive: Option<LinearRgba>,
    /// Emissive intensity multiplier
    pub emissive_intensity: Option<f32>,
    /// Specular exponent
    pub shininess: Option<f32>,
    /// Main/albedo texture
    pub main_texture: Option<TextureHandle>,
    /// Normal map
    pub normal_texture: Option<TextureHandle>,
    /// Emissive map
    pub emissive_texture: Option<TextureHandle>,
    /// Specular map
    pub specular_texture: Option<TextureHandle>,
    /// Tiling scale applied to all texture slots
    pub texture_scale: [f32; 2],
}

impl MaterialData {
    /// Create a plain lit material with defaults for everything optional
    pub fn new(name: impl Into<String>, color: LinearRgba) -> Self {
        Self {
            name: name.into(),
            shading: ShadingModel::Phong,
            color,
            specular: None,
            emissive: None,
            emissive_intensity: None,
            shininess: None,
            main_texture: None,
            normal_texture: None,
            emissive_texture: None,
            specular_texture: None,
            texture_scale: [1.0, 1.0],
        }
    }

    /// Source opacity (base color alpha)
    pub fn opacity(&self) -> f32 {
        self.color.a
    }
}

/// Source texture: a named asset on disk plus sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureData {
    /// Texture name
    pub name: String,
    /// Path to the source image asset
    pub asset_path: PathBuf,
    /// Wrapping mode, applied to both axes
    pub wrap: WrapMode,
}

impl TextureData {
    pub fn new(name: impl Into<String>, asset_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            asset_path: asset_path.into(),
            wrap: WrapMode::Repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_defaults() {
        let mat = MaterialData::new("rock", LinearRgba::WHITE);
        assert_eq!(mat.shading, ShadingModel::Phong);
        assert!(mat.specular.is_none());
        assert_eq!(mat.texture_scale, [1.0, 1.0]);
        assert_eq!(mat.opacity(), 1.0);
    }

    #[test]
    fn test_opacity_tracks_alpha() {
        let mat = MaterialData::new("glass", LinearRgba::new(1.0, 1.0, 1.0, 0.25));
        assert_eq!(mat.opacity(), 0.25);
    }
}
