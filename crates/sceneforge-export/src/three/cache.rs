//! Resource deduplication cache
//!
//! Owns every record list accumulated during a run and the handle-keyed
//! lookup tables that guarantee at-most-one serialized record per distinct
//! source resource. One instance lives for exactly one export call; the
//! walker and resolvers borrow it mutably, the assembler consumes it.

use std::collections::HashMap;

use sceneforge_scene::{MaterialHandle, MeshHandle, TextureHandle};

use super::materials::TextureSlot;
use super::{Document, GeometryRecord, ImageRecord, MaterialRecord, Metadata, ObjectNode, TextureRecord};

/// Accumulated records plus dedup state for one export run
#[derive(Debug, Default)]
pub struct ResourceCache {
    geometries: Vec<GeometryRecord>,
    materials: Vec<MaterialRecord>,
    textures: Vec<TextureRecord>,
    images: Vec<ImageRecord>,
    geometry_ids: HashMap<MeshHandle, String>,
    material_ids: HashMap<MaterialHandle, String>,
    /// Ordered material tuples of multi-material renderers, with the
    /// multi-material identifier each resolved to
    multi_material_ids: Vec<(Vec<MaterialHandle>, String)>,
    /// Materialization outcome per (texture, slot); failures are cached
    /// too, so a broken asset is reported once
    texture_ids: HashMap<(TextureHandle, TextureSlot), Option<String>>,
}

impl ResourceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of an already-encoded mesh
    pub fn geometry_id(&self, handle: MeshHandle) -> Option<&str> {
        self.geometry_ids.get(&handle).map(String::as_str)
    }

    /// Store a freshly encoded geometry under its source handle
    pub fn insert_geometry(&mut self, handle: MeshHandle, record: GeometryRecord) {
        self.geometry_ids.insert(handle, record.uuid.clone());
        self.geometries.push(record);
    }

    /// Identifier of an already-resolved single material
    pub fn material_id(&self, handle: MaterialHandle) -> Option<&str> {
        self.material_ids.get(&handle).map(String::as_str)
    }

    /// Remember a single material's identifier
    pub fn record_material_id(&mut self, handle: MaterialHandle, uuid: String) {
        self.material_ids.insert(handle, uuid);
    }

    /// Identifier of a previously seen ordered material tuple
    pub fn multi_material_id(&self, handles: &[MaterialHandle]) -> Option<&str> {
        self.multi_material_ids
            .iter()
            .find(|(tuple, _)| tuple == handles)
            .map(|(_, uuid)| uuid.as_str())
    }

    /// Remember a material tuple's multi-material identifier
    pub fn record_multi_material_id(&mut self, handles: Vec<MaterialHandle>, uuid: String) {
        self.multi_material_ids.push((handles, uuid));
    }

    /// Append a material record to the top-level list
    pub fn push_material(&mut self, record: MaterialRecord) {
        self.materials.push(record);
    }

    /// Whether a top-level record with this identifier exists
    pub fn has_top_level_material(&self, uuid: &str) -> bool {
        self.materials.iter().any(|m| m.uuid == uuid)
    }

    /// Remove and return the top-level record with this identifier
    pub fn take_top_level_material(&mut self, uuid: &str) -> Option<MaterialRecord> {
        let position = self.materials.iter().position(|m| m.uuid == uuid)?;
        Some(self.materials.remove(position))
    }

    /// Find a record by identifier: top-level first, then constituents
    /// nested inside multi-materials.
    pub fn find_material(&self, uuid: &str) -> Option<&MaterialRecord> {
        if let Some(record) = self.materials.iter().find(|m| m.uuid == uuid) {
            return Some(record);
        }
        self.materials
            .iter()
            .filter_map(MaterialRecord::nested)
            .flat_map(|nested| nested.iter())
            .find(|m| m.uuid == uuid)
    }

    /// Cached materialization outcome for a (texture, slot) pair
    pub fn texture_id(&self, key: (TextureHandle, TextureSlot)) -> Option<&Option<String>> {
        self.texture_ids.get(&key)
    }

    /// Remember a materialization outcome, success or failure
    pub fn record_texture_id(
        &mut self,
        key: (TextureHandle, TextureSlot),
        uuid: Option<String>,
    ) {
        self.texture_ids.insert(key, uuid);
    }

    /// Append a texture record
    pub fn push_texture(&mut self, record: TextureRecord) {
        self.textures.push(record);
    }

    /// Append an image record
    pub fn push_image(&mut self, record: ImageRecord) {
        self.images.push(record);
    }

    /// Assemble the final document from the accumulated lists and the
    /// finished output tree.
    pub fn into_document(self, object: ObjectNode) -> Document {
        Document {
            metadata: Metadata::document(),
            geometries: self.geometries,
            materials: self.materials,
            textures: self.textures,
            images: self.images,
            object,
        }
    }
}
