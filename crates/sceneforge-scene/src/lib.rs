//! SceneForge scene description
//!
//! The in-memory source model the export engine consumes: a node hierarchy
//! plus pre-enumerated mesh/material/texture tables addressed by opaque
//! handles. A host engine builds one [`SceneDescription`] per export run;
//! the exporter only ever reads it.
//!
//! Handles (not object identity) are what the export engine deduplicates
//! on: two nodes whose renderables carry the same [`MeshHandle`] share one
//! mesh, whatever the host did to produce them.

pub mod camera;
pub mod environment;
pub mod light;
pub mod material;
pub mod mesh;
pub mod node;
pub mod scene;

pub use camera::{CameraSource, Projection};
pub use environment::{AmbientSettings, FogMode, FogSettings};
pub use light::{LightKind, LightSource};
pub use material::{MaterialData, MaterialHandle, ShadingModel, TextureData, TextureHandle, WrapMode};
pub use mesh::{MeshData, MeshError, MeshHandle};
pub use node::{Renderable, SceneNode, Transform};
pub use scene::SceneDescription;
