//! Source scene nodes
//!
//! One [`SceneNode`] per entry in the host hierarchy. Capabilities
//! (renderable, light, camera) are optional attachments; a node may carry
//! several at once, the exporter honors the highest-priority enabled one.

use sceneforge_core::{Mat4x4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::CameraSource;
use crate::light::LightSource;
use crate::material::MaterialHandle;
use crate::mesh::MeshHandle;

/// Node placement, either decomposed or as a finished world matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Transform {
    /// Local position/rotation/scale, composed at export time
    Local {
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    },
    /// Pre-composed world matrix
    Matrix(Mat4x4),
}

impl Default for Transform {
    fn default() -> Self {
        Self::Local {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Mesh + material slots attached to a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Renderable {
    /// Geometry
    pub mesh: MeshHandle,
    /// Ordered material slots, one per sub-mesh for multi-material meshes
    pub materials: Vec<MaterialHandle>,
    /// Whether the node casts shadows
    pub cast_shadows: bool,
    /// Whether the node receives shadows
    pub receive_shadows: bool,
}

impl Renderable {
    /// Create a single-material renderable
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            mesh,
            materials: vec![material],
            cast_shadows: true,
            receive_shadows: true,
        }
    }

    /// Create a multi-material renderable with the given ordered slots
    pub fn with_materials(mesh: MeshHandle, materials: Vec<MaterialHandle>) -> Self {
        Self {
            mesh,
            materials,
            cast_shadows: true,
            receive_shadows: true,
        }
    }
}

/// One node of the source hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    /// Node name
    pub name: String,
    /// Node placement
    pub transform: Transform,
    /// Whether the node is active in the hierarchy
    pub active: bool,
    /// Attached mesh renderer
    pub renderable: Option<Renderable>,
    /// Attached light
    pub light: Option<LightSource>,
    /// Attached camera
    pub camera: Option<CameraSource>,
    /// Child nodes in source sibling order
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an empty active node with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            active: true,
            renderable: None,
            light: None,
            camera: None,
            children: Vec::new(),
        }
    }

    /// Count this node plus all descendants
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_size).sum::<usize>()
    }
}
