//! Geometry encoding
//!
//! Converts source mesh buffers into a [`GeometryRecord`]: flat attribute
//! arrays in target handedness plus the layout-dependent face array.

use sceneforge_core::Vec3;
use sceneforge_scene::{MeshData, MeshError};
use thiserror::Error;
use tracing::debug;

use super::faces::FaceLayout;
use super::{GeometryData, GeometryRecord, Metadata};

/// Geometry encoding errors
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("invalid mesh data: {0}")]
    InvalidMesh(#[from] MeshError),

    /// The face array came out a different length than the layout
    /// promised. A contract violation in the encoder itself, never
    /// recoverable input trouble.
    #[error("mesh '{name}': face array length contract violated, expected {expected}, wrote {written}")]
    FaceLengthContract {
        name: String,
        expected: usize,
        written: usize,
    },
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Encode one mesh into a geometry record under the given identifier.
pub fn encode_geometry(mesh: &MeshData, uuid: String) -> GeometryResult<GeometryRecord> {
    mesh.validate()?;

    let mut vertices = Vec::with_capacity(mesh.vertices.len() * 3);
    for v in &mesh.vertices {
        // left-handed to right-handed: negate Z
        vertices.extend_from_slice(&[v[0], v[1], -v[2]]);
    }

    let mut normals = Vec::with_capacity(mesh.normals.len() * 3);
    for n in &mesh.normals {
        let unit = Vec3::from_array(*n).normalized();
        normals.extend_from_slice(&[unit.x, unit.y, -unit.z]);
    }

    let mut uvs = Vec::with_capacity(mesh.uvs.len() * 2);
    for uv in &mesh.uvs {
        uvs.extend_from_slice(uv);
    }

    let mut colors = Vec::with_capacity(mesh.colors.len() * 3);
    for color in &mesh.colors {
        colors.extend_from_slice(color);
    }

    let layout = FaceLayout::classify(
        mesh.has_material_groups(),
        mesh.has_uvs(),
        mesh.has_normals(),
    );
    let faces = encode_faces(mesh, layout)?;

    debug!(
        mesh = %mesh.name,
        layout = ?layout,
        triangles = mesh.triangle_count(),
        "encoded geometry"
    );

    Ok(GeometryRecord {
        uuid,
        name: mesh.name.clone(),
        kind: "Geometry".to_string(),
        metadata: Metadata::geometry(),
        layout,
        data: GeometryData {
            vertices,
            normals,
            uvs,
            colors,
            faces,
        },
    })
}

/// Emit the face array, sub-mesh blocks concatenated in sub-mesh order.
fn encode_faces(mesh: &MeshData, layout: FaceLayout) -> GeometryResult<Vec<i32>> {
    let expected = mesh.triangle_count() * layout.stride();
    let mut faces = Vec::with_capacity(expected);

    for (submesh, indices) in mesh.submeshes.iter().enumerate() {
        for triangle in indices.chunks_exact(3) {
            layout.emit(&mut faces, [triangle[0], triangle[1], triangle[2]], submesh);
        }
    }

    if faces.len() != expected {
        return Err(GeometryError::FaceLengthContract {
            name: mesh.name.clone(),
            expected,
            written: faces.len(),
        });
    }
    Ok(faces)
}
