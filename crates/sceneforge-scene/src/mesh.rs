//! Source mesh buffers
//!
//! Raw triangle-mesh data as the host engine hands it over: flat attribute
//! arrays plus one triangle index list per sub-mesh (material group).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a mesh in the scene's pre-enumerated mesh table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub usize);

/// Errors raised by [`MeshData::validate`]
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("mesh '{name}' has no sub-meshes")]
    NoSubMeshes { name: String },

    #[error("mesh '{name}' sub-mesh {submesh}: index count {count} is not a multiple of 3")]
    PartialTriangle {
        name: String,
        submesh: usize,
        count: usize,
    },

    #[error("mesh '{name}' sub-mesh {submesh}: vertex index {index} out of range ({vertex_count} vertices)")]
    IndexOutOfRange {
        name: String,
        submesh: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh '{name}': {attribute} length {actual} does not match vertex count {expected}")]
    AttributeLengthMismatch {
        name: String,
        attribute: &'static str,
        actual: usize,
        expected: usize,
    },
}

/// Triangle mesh with flat per-vertex attribute arrays
///
/// Optional attributes (`normals`, `uvs`, `colors`) are either empty or
/// exactly vertex-count long. Each sub-mesh owns its own triangle index
/// list; a mesh with more than one sub-mesh has material groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    /// Mesh name
    pub name: String,
    /// Vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Vertex normals (empty when absent)
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (empty when absent)
    pub uvs: Vec<[f32; 2]>,
    /// Vertex colors (empty when absent)
    pub colors: Vec<[f32; 3]>,
    /// Per-sub-mesh triangle index lists, in sub-mesh order
    pub submeshes: Vec<Vec<u32>>,
}

impl MeshData {
    /// Create an empty mesh with a single sub-mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            colors: Vec::new(),
            submeshes: vec![Vec::new()],
        }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Total triangle count across all sub-meshes
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.len() / 3).sum()
    }

    /// Check if the mesh has a normal buffer
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Check if the mesh has UV coordinates
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Check if the mesh has vertex colors
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Check if the mesh has material groups (more than one sub-mesh)
    pub fn has_material_groups(&self) -> bool {
        self.submeshes.len() > 1
    }

    /// Validate buffer lengths and index ranges.
    ///
    /// The exporter calls this before encoding; a mesh that fails here
    /// never reaches the face encoder.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.submeshes.is_empty() {
            return Err(MeshError::NoSubMeshes {
                name: self.name.clone(),
            });
        }

        let vertex_count = self.vertices.len();
        for (attribute, actual) in [
            ("normals", self.normals.len()),
            ("uvs", self.uvs.len()),
            ("colors", self.colors.len()),
        ] {
            if actual != 0 && actual != vertex_count {
                return Err(MeshError::AttributeLengthMismatch {
                    name: self.name.clone(),
                    attribute,
                    actual,
                    expected: vertex_count,
                });
            }
        }

        for (submesh, indices) in self.submeshes.iter().enumerate() {
            if indices.len() % 3 != 0 {
                return Err(MeshError::PartialTriangle {
                    name: self.name.clone(),
                    submesh,
                    count: indices.len(),
                });
            }
            for &index in indices {
                if index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        name: self.name.clone(),
                        submesh,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(())
    }
}
