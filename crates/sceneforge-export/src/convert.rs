//! Coordinate and color conversion
//!
//! Pure functions bridging the source engine's conventions to the target
//! runtime's: left-handed transforms become right-handed column-major
//! arrays, and normalized linear colors become packed integers.

use sceneforge_core::{LinearRgba, Mat4x4};
use sceneforge_scene::Transform;

/// Column-major array positions negated when converting handedness.
///
/// These are exactly the matrix elements a Z-axis sign flip touches under
/// TRS composition; the set is fixed, not derived per matrix.
const HANDEDNESS_NEGATED: [usize; 5] = [2, 6, 8, 9, 14];

/// Convert a node transform into the target's 16-element column-major
/// array, flipping handedness.
pub fn matrix_array(transform: &Transform) -> [f32; 16] {
    let matrix = match transform {
        Transform::Local {
            position,
            rotation,
            scale,
        } => Mat4x4::from_trs(*position, *rotation, *scale),
        Transform::Matrix(matrix) => *matrix,
    };
    let mut out = matrix.to_column_major();
    for index in HANDEDNESS_NEGATED {
        out[index] = -out[index];
    }
    out
}

/// Identity placement in target conventions, used for synthesized nodes
pub fn identity_matrix_array() -> [f32; 16] {
    Mat4x4::IDENTITY.to_column_major()
}

/// Pack a normalized color into `(R<<16) | (G<<8) | B`.
///
/// Alpha is dropped from the packed value; materials carry it separately
/// as opacity.
pub fn pack_color(color: LinearRgba) -> u32 {
    let [r, g, b, _a] = color.to_bytes();
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceneforge_core::{Quat, Vec3};

    #[test]
    fn test_identity_transform_is_unchanged() {
        // The negated positions hold zeros for the identity
        let out = matrix_array(&Transform::default());
        assert_eq!(out, Mat4x4::IDENTITY.to_column_major());
    }

    #[test]
    fn test_translation_z_is_negated() {
        let transform = Transform::Local {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        };
        let out = matrix_array(&transform);
        assert_eq!(out[12], 1.0);
        assert_eq!(out[13], 2.0);
        assert_eq!(out[14], -3.0);
    }

    #[test]
    fn test_negated_index_set() {
        // Fill a matrix with distinct values and check the exact index set
        let mut m = [[0.0f32; 4]; 4];
        for (row, row_values) in m.iter_mut().enumerate() {
            for (col, value) in row_values.iter_mut().enumerate() {
                *value = (row * 4 + col + 1) as f32;
            }
        }
        let source = Mat4x4 { m };
        let flat = source.to_column_major();
        let out = matrix_array(&Transform::Matrix(source));
        for (index, (&converted, &raw)) in out.iter().zip(flat.iter()).enumerate() {
            if HANDEDNESS_NEGATED.contains(&index) {
                assert_eq!(converted, -raw, "index {index} should flip");
            } else {
                assert_eq!(converted, raw, "index {index} should not flip");
            }
        }
    }

    #[test]
    fn test_pack_color() {
        let packed = pack_color(LinearRgba::new(1.0, 128.0 / 255.0, 0.0, 1.0));
        assert_eq!(packed, 0x00FF_8000);
    }

    #[test]
    fn test_pack_color_drops_alpha() {
        let opaque = pack_color(LinearRgba::new(0.5, 0.5, 0.5, 1.0));
        let translucent = pack_color(LinearRgba::new(0.5, 0.5, 0.5, 0.1));
        assert_eq!(opaque, translucent);
    }
}
