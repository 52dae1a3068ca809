//! Common value types used across SceneForge
//!
//! This module provides the shared math definitions used by multiple crates.

use serde::{Deserialize, Serialize};

/// 3D vector (position, normal, scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(v: [f32; 3]) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy; zero-length vectors stay zero.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Rotation quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation about an axis (assumed unit length) by `angle` radians.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Expand to a 3x3 rotation matrix, rows of basis-vector components.
    pub fn to_rotation_rows(&self) -> [[f32; 3]; 3] {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        [
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - z * w),
                2.0 * (x * z + y * w),
            ],
            [
                2.0 * (x * y + z * w),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - x * w),
            ],
            [
                2.0 * (x * z - y * w),
                2.0 * (y * z + x * w),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ]
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 4x4 transformation matrix, row-major storage: `m[row][col]`,
/// translation in the last column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4x4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4x4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Compose translation * rotation * scale.
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let r = rotation.to_rotation_rows();
        let mut m = [[0.0; 4]; 4];
        for row in 0..3 {
            m[row][0] = r[row][0] * scale.x;
            m[row][1] = r[row][1] * scale.y;
            m[row][2] = r[row][2] * scale.z;
        }
        m[0][3] = translation.x;
        m[1][3] = translation.y;
        m[2][3] = translation.z;
        m[3][3] = 1.0;
        Self { m }
    }

    /// Flatten into a 16-element column-major array.
    pub fn to_column_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for column in 0..4 {
            for row in 0..4 {
                out[column * 4 + row] = self.m[row][column];
            }
        }
        out
    }

    /// Get translation component
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Normalized linear color, channels in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearRgba {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Quantize to 8-bit channels, clamping out-of-range input.
    pub fn to_bytes(&self) -> [u8; 4] {
        fn quantize(channel: f32) -> u8 {
            (channel.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_normalized() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_vec3_normalized_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_identity_column_major() {
        let flat = Mat4x4::IDENTITY.to_column_major();
        let expected = [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_trs_translation_lands_in_last_column() {
        let m = Mat4x4::from_trs(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, Vec3::ONE);
        assert_eq!(m.translation(), Vec3::new(1.0, 2.0, 3.0));

        let flat = m.to_column_major();
        assert_eq!(&flat[12..15], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_trs_rotation_quarter_turn() {
        // 90 degrees about Y maps +X to -Z
        let q = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), std::f32::consts::FRAC_PI_2);
        let m = Mat4x4::from_trs(Vec3::ZERO, q, Vec3::ONE);
        let x_axis = [m.m[0][0], m.m[1][0], m.m[2][0]];
        assert!(x_axis[0].abs() < 1e-6);
        assert!(x_axis[1].abs() < 1e-6);
        assert!((x_axis[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_trs_scale_on_basis_columns() {
        let m = Mat4x4::from_trs(Vec3::ZERO, Quat::IDENTITY, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.m[0][0], 2.0);
        assert_eq!(m.m[1][1], 3.0);
        assert_eq!(m.m[2][2], 4.0);
    }

    #[test]
    fn test_color_quantization() {
        let c = LinearRgba::new(1.0, 128.0 / 255.0, 0.0, 1.0);
        assert_eq!(c.to_bytes(), [255, 128, 0, 255]);
    }

    #[test]
    fn test_color_quantization_clamps() {
        let c = LinearRgba::new(2.0, -1.0, 0.5, 1.0);
        let bytes = c.to_bytes();
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[1], 0);
        assert_eq!(bytes[2], 128);
    }
}
