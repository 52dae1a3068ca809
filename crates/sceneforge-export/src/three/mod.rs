//! Object Scene format 4 document model
//!
//! Wire structures for the target runtime's JSON scene format, plus the
//! engine components that fill them in. Records are serialize-only: the
//! engine emits documents, it never loads them back.

pub mod cache;
pub mod exporter;
pub mod faces;
pub mod geometry;
pub mod materials;
pub mod walker;

pub use exporter::{ExportError, ExportOptions, Exporter};
pub use faces::FaceLayout;

use serde::Serialize;

/// Top-level export document
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub metadata: Metadata,
    pub geometries: Vec<GeometryRecord>,
    pub materials: Vec<MaterialRecord>,
    pub textures: Vec<TextureRecord>,
    pub images: Vec<ImageRecord>,
    pub object: ObjectNode,
}

/// Format version and generator tag
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub version: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub generator: String,
}

impl Metadata {
    /// Metadata block for the document root
    pub fn document() -> Self {
        Self {
            version: FORMAT_VERSION,
            kind: "Object".to_string(),
            generator: GENERATOR.to_string(),
        }
    }

    /// Metadata block for one geometry record
    pub fn geometry() -> Self {
        Self {
            version: GEOMETRY_FORMAT_VERSION,
            kind: "Geometry".to_string(),
            generator: GENERATOR.to_string(),
        }
    }
}

/// One encoded geometry, emitted once per distinct source mesh
#[derive(Debug, Clone, Serialize)]
pub struct GeometryRecord {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub metadata: Metadata,
    /// Face layout the encoder selected; informational, not on the wire
    #[serde(skip)]
    pub layout: FaceLayout,
    pub data: GeometryData,
}

/// Flat geometry buffers
#[derive(Debug, Clone, Serialize)]
pub struct GeometryData {
    pub vertices: Vec<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub normals: Vec<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uvs: Vec<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<f32>,
    pub faces: Vec<i32>,
}

/// One material record; multi-materials own their constituents by value
#[derive(Debug, Clone, Serialize)]
pub struct MaterialRecord {
    pub uuid: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: MaterialKind,
}

impl MaterialRecord {
    /// Constituents of a multi-material; `None` for leaf materials
    pub fn nested(&self) -> Option<&[MaterialRecord]> {
        match &self.kind {
            MaterialKind::MultiMaterial { materials } => Some(materials),
            _ => None,
        }
    }
}

/// Material type discriminator and type-specific fields
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum MaterialKind {
    MeshBasicMaterial {
        color: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        map: Option<String>,
        opacity: f32,
        transparent: bool,
        wireframe: bool,
    },
    #[serde(rename_all = "camelCase")]
    MeshPhongMaterial {
        color: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        specular: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        emissive: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        emissive_intensity: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        shininess: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        map: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        normal_map: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        emissive_map: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        specular_map: Option<String>,
        opacity: f32,
        transparent: bool,
        wireframe: bool,
    },
    MultiMaterial {
        materials: Vec<MaterialRecord>,
    },
}

/// Sampler record referencing one image
#[derive(Debug, Clone, Serialize)]
pub struct TextureRecord {
    pub uuid: String,
    pub name: String,
    pub image: String,
    pub wrap: [u32; 2],
    pub repeat: [f32; 2],
}

/// Image record holding the relative output URL
#[derive(Debug, Clone, Serialize)]
pub struct ImageRecord {
    pub uuid: String,
    pub url: String,
}

/// One node of the output tree
#[derive(Debug, Clone, Serialize)]
pub struct ObjectNode {
    pub uuid: String,
    pub name: String,
    pub matrix: [f32; 16],
    #[serde(flatten)]
    pub kind: ObjectKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ObjectNode>,
}

/// Output node type discriminator and type-specific fields
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ObjectKind {
    Scene {
        #[serde(skip_serializing_if = "Option::is_none")]
        fog: Option<Fog>,
    },
    Group,
    #[serde(rename_all = "camelCase")]
    Mesh {
        geometry: String,
        material: String,
        cast_shadow: bool,
        receive_shadow: bool,
    },
    AmbientLight {
        color: u32,
        intensity: f32,
    },
    #[serde(rename_all = "camelCase")]
    DirectionalLight {
        color: u32,
        intensity: f32,
        cast_shadow: bool,
    },
    PointLight {
        color: u32,
        intensity: f32,
        distance: f32,
        decay: f32,
    },
    #[serde(rename_all = "camelCase")]
    SpotLight {
        color: u32,
        intensity: f32,
        distance: f32,
        angle: f32,
        penumbra: f32,
        decay: f32,
        cast_shadow: bool,
    },
    /// Best-effort record for light sub-types the target has no name for
    Light {
        color: u32,
        intensity: f32,
    },
    PerspectiveCamera {
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    OrthographicCamera {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    },
}

/// Scene fog descriptor
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Fog {
    #[serde(rename = "Fog")]
    Linear { color: u32, near: f32, far: f32 },
    #[serde(rename = "FogExp2")]
    Exponential { color: u32, density: f32 },
}

// Document format versions
pub const FORMAT_VERSION: f64 = 4.3;
pub const GEOMETRY_FORMAT_VERSION: f64 = 4.0;

/// Generator tag stamped into every metadata block
pub const GENERATOR: &str = "SceneForge Exporter";

// Texture wrapping constants of the target runtime
pub const WRAP_REPEAT: u32 = 1000;
pub const WRAP_CLAMP: u32 = 1001;
pub const WRAP_MIRROR: u32 = 1002;
