//! Material and texture resolution
//!
//! Maps source materials onto output records through the resource cache.
//! Multi-material renderers are keyed by their ordered material tuple; a
//! constituent created for a new multi-material is emitted nested only,
//! while a constituent later referenced by a single-material renderer is
//! copied up into the top-level list, where the format expects every
//! directly referenced record to be visible.

use std::path::Path;

use sceneforge_core::IdAllocator;
use sceneforge_scene::{
    MaterialData, MaterialHandle, Renderable, SceneDescription, ShadingModel, TextureHandle,
    WrapMode,
};
use thiserror::Error;
use tracing::warn;

use crate::convert::pack_color;
use crate::traits::AssetMaterializer;

use super::cache::ResourceCache;
use super::{
    ImageRecord, MaterialKind, MaterialRecord, TextureRecord, WRAP_CLAMP, WRAP_MIRROR, WRAP_REPEAT,
};

/// Material texture slots resolved independently of one another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Main,
    Normal,
    Emissive,
    Specular,
}

/// Material resolution errors
#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("renderer exposes no material slots")]
    NoMaterialSlots,

    #[error("material handle {index} is not in the scene's material table")]
    UnknownMaterial { index: usize },

    /// The cache promised an identifier but no record carries it; a
    /// programming-contract violation, not recoverable input trouble.
    #[error("cached material identifier {uuid} has no backing record")]
    MissingCachedRecord { uuid: String },
}

pub type MaterialResult<T> = Result<T, MaterialError>;

/// Resolves renderer materials and materializes their textures
pub struct MaterialResolver<'a> {
    scene: &'a SceneDescription,
    out_dir: &'a Path,
    materializer: &'a mut dyn AssetMaterializer,
}

impl<'a> MaterialResolver<'a> {
    pub fn new(
        scene: &'a SceneDescription,
        out_dir: &'a Path,
        materializer: &'a mut dyn AssetMaterializer,
    ) -> Self {
        Self {
            scene,
            out_dir,
            materializer,
        }
    }

    /// Resolve a renderer's material slots to one identifier: the single
    /// material's for one slot, a multi-material's for several.
    pub fn resolve_renderer(
        &mut self,
        renderable: &Renderable,
        cache: &mut ResourceCache,
        ids: &mut IdAllocator,
    ) -> MaterialResult<String> {
        match renderable.materials.as_slice() {
            [] => Err(MaterialError::NoMaterialSlots),
            [single] => self.resolve_single(*single, cache, ids),
            slots => {
                if let Some(uuid) = cache.multi_material_id(slots) {
                    return Ok(uuid.to_string());
                }
                self.create_multi_material(slots, cache, ids)
            }
        }
    }

    /// Resolve one material handle, creating its record on first sight.
    fn resolve_single(
        &mut self,
        handle: MaterialHandle,
        cache: &mut ResourceCache,
        ids: &mut IdAllocator,
    ) -> MaterialResult<String> {
        if let Some(uuid) = cache.material_id(handle) {
            let uuid = uuid.to_string();
            if !cache.has_top_level_material(&uuid) {
                // Seen before, but only nested inside a multi-material.
                // Single-material meshes reference records at the top
                // level, so copy it up.
                let record = cache
                    .find_material(&uuid)
                    .cloned()
                    .ok_or_else(|| MaterialError::MissingCachedRecord { uuid: uuid.clone() })?;
                cache.push_material(record);
            }
            return Ok(uuid);
        }

        let record = self.create_record(handle, cache, ids)?;
        let uuid = record.uuid.clone();
        cache.record_material_id(handle, uuid.clone());
        cache.push_material(record);
        Ok(uuid)
    }

    /// Build a multi-material from an ordered slot tuple.
    fn create_multi_material(
        &mut self,
        slots: &[MaterialHandle],
        cache: &mut ResourceCache,
        ids: &mut IdAllocator,
    ) -> MaterialResult<String> {
        let mut constituents = Vec::with_capacity(slots.len());
        for &handle in slots {
            if let Some(existing) = cache.material_id(handle) {
                // Shared with earlier renderers; embed a copy, leave the
                // authoritative record where it already lives.
                let existing = existing.to_string();
                let record = cache.find_material(&existing).cloned().ok_or(
                    MaterialError::MissingCachedRecord { uuid: existing },
                )?;
                constituents.push(record);
            } else {
                // First sight, created in service of this multi-material:
                // pull the fresh record out of the top-level list so it is
                // emitted exactly once, nested.
                let uuid = self.resolve_single(handle, cache, ids)?;
                let record = cache
                    .take_top_level_material(&uuid)
                    .ok_or(MaterialError::MissingCachedRecord { uuid })?;
                constituents.push(record);
            }
        }

        let name = self.composite_name(slots);
        let uuid = ids.mint();
        cache.push_material(MaterialRecord {
            uuid: uuid.clone(),
            name,
            kind: MaterialKind::MultiMaterial {
                materials: constituents,
            },
        });
        cache.record_multi_material_id(slots.to_vec(), uuid.clone());
        Ok(uuid)
    }

    /// Composite name: a short prefix of each constituent's name.
    fn composite_name(&self, slots: &[MaterialHandle]) -> String {
        slots
            .iter()
            .filter_map(|&handle| self.scene.material(handle))
            .flat_map(|material| material.name.chars().take(5))
            .collect()
    }

    /// Create the output record for one source material.
    fn create_record(
        &mut self,
        handle: MaterialHandle,
        cache: &mut ResourceCache,
        ids: &mut IdAllocator,
    ) -> MaterialResult<MaterialRecord> {
        let material: MaterialData = self
            .scene
            .material(handle)
            .cloned()
            .ok_or(MaterialError::UnknownMaterial { index: handle.0 })?;

        let opacity = material.opacity();
        let transparent = opacity < 1.0;
        let scale = material.texture_scale;

        let map = material
            .main_texture
            .and_then(|t| self.resolve_texture(t, TextureSlot::Main, scale, cache, ids));

        let kind = match material.shading {
            ShadingModel::Basic => MaterialKind::MeshBasicMaterial {
                color: pack_color(material.color),
                map,
                opacity,
                transparent,
                wireframe: false,
            },
            ShadingModel::Phong => {
                let normal_map = material
                    .normal_texture
                    .and_then(|t| self.resolve_texture(t, TextureSlot::Normal, scale, cache, ids));
                let emissive_map = material.emissive_texture.and_then(|t| {
                    self.resolve_texture(t, TextureSlot::Emissive, scale, cache, ids)
                });
                let specular_map = material.specular_texture.and_then(|t| {
                    self.resolve_texture(t, TextureSlot::Specular, scale, cache, ids)
                });
                MaterialKind::MeshPhongMaterial {
                    color: pack_color(material.color),
                    specular: material.specular.map(pack_color),
                    emissive: material.emissive.map(pack_color),
                    emissive_intensity: material.emissive_intensity,
                    shininess: material.shininess,
                    map,
                    normal_map,
                    emissive_map,
                    specular_map,
                    opacity,
                    transparent,
                    wireframe: false,
                }
            }
        };

        Ok(MaterialRecord {
            uuid: ids.mint(),
            name: material.name,
            kind,
        })
    }

    /// Resolve one texture slot, materializing the asset on first use.
    ///
    /// Every (texture, slot) pair is materialized at most once; failures
    /// are remembered too, so a broken asset is reported a single time.
    fn resolve_texture(
        &mut self,
        handle: TextureHandle,
        slot: TextureSlot,
        scale: [f32; 2],
        cache: &mut ResourceCache,
        ids: &mut IdAllocator,
    ) -> Option<String> {
        let key = (handle, slot);
        if let Some(cached) = cache.texture_id(key) {
            return cached.clone();
        }
        let outcome = self.materialize_texture(handle, slot, scale, cache, ids);
        cache.record_texture_id(key, outcome.clone());
        outcome
    }

    fn materialize_texture(
        &mut self,
        handle: TextureHandle,
        slot: TextureSlot,
        scale: [f32; 2],
        cache: &mut ResourceCache,
        ids: &mut IdAllocator,
    ) -> Option<String> {
        let Some(texture) = self.scene.texture(handle).cloned() else {
            warn!(index = handle.0, ?slot, "texture handle not in scene table, slot left unset");
            return None;
        };

        let Some(url) = self
            .materializer
            .copy_or_convert(&texture.asset_path, self.out_dir)
        else {
            warn!(
                texture = %texture.name,
                asset = %texture.asset_path.display(),
                ?slot,
                "texture asset could not be materialized, slot left unset"
            );
            return None;
        };

        let image_uuid = ids.mint();
        cache.push_image(ImageRecord {
            uuid: image_uuid.clone(),
            url: format!("/{url}"),
        });

        let wrap = wrap_code(texture.wrap);
        let texture_uuid = ids.mint();
        cache.push_texture(TextureRecord {
            uuid: texture_uuid.clone(),
            name: texture.name,
            image: image_uuid,
            wrap: [wrap, wrap],
            repeat: scale,
        });
        Some(texture_uuid)
    }
}

/// Map a source wrap mode to the target's wrapping constant.
pub fn wrap_code(mode: WrapMode) -> u32 {
    match mode {
        WrapMode::Repeat => WRAP_REPEAT,
        WrapMode::Clamp => WRAP_CLAMP,
        WrapMode::Mirror => WRAP_MIRROR,
    }
}
