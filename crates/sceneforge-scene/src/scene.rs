//! The complete source scene handed to the exporter

use serde::{Deserialize, Serialize};

use crate::environment::{AmbientSettings, FogSettings};
use crate::material::{MaterialData, MaterialHandle, TextureData, TextureHandle};
use crate::mesh::{MeshData, MeshHandle};
use crate::node::SceneNode;

/// Everything the exporter reads for one run: the node hierarchy plus the
/// pre-enumerated resource tables its handles point into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name; also names the output document
    pub name: String,
    /// Root nodes in source order
    pub roots: Vec<SceneNode>,
    /// Mesh table addressed by [`MeshHandle`]
    pub meshes: Vec<MeshData>,
    /// Material table addressed by [`MaterialHandle`]
    pub materials: Vec<MaterialData>,
    /// Texture table addressed by [`TextureHandle`]
    pub textures: Vec<TextureData>,
    /// Global ambient lighting
    pub ambient: AmbientSettings,
    /// Optional scene fog
    pub fog: Option<FogSettings>,
}

impl SceneDescription {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roots: Vec::new(),
            meshes: Vec::new(),
            materials: Vec::new(),
            textures: Vec::new(),
            ambient: AmbientSettings::default(),
            fog: None,
        }
    }

    /// Register a mesh and get its handle
    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }

    /// Register a material and get its handle
    pub fn add_material(&mut self, material: MaterialData) -> MaterialHandle {
        self.materials.push(material);
        MaterialHandle(self.materials.len() - 1)
    }

    /// Register a texture and get its handle
    pub fn add_texture(&mut self, texture: TextureData) -> TextureHandle {
        self.textures.push(texture);
        TextureHandle(self.textures.len() - 1)
    }

    /// Look up a mesh
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.0)
    }

    /// Look up a material
    pub fn material(&self, handle: MaterialHandle) -> Option<&MaterialData> {
        self.materials.get(handle.0)
    }

    /// Look up a texture
    pub fn texture(&self, handle: TextureHandle) -> Option<&TextureData> {
        self.textures.get(handle.0)
    }

    /// Total node count over every root subtree, skipped or not
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(SceneNode::subtree_size).sum()
    }
}
