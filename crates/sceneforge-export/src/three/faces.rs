//! Face-array layouts
//!
//! The target format stores triangle faces as a flat integer array whose
//! per-face shape depends on which attributes the mesh carries. Layout
//! selection is a pure function of three capabilities; the eight resulting
//! layouts are a closed enum, so an unhandled combination cannot compile,
//! let alone silently emit an empty array.
//!
//! Winding: the target is right-handed, the source left-handed, so the
//! vertex triple is emitted as `(a, c, b)`. The UV triple repeats that
//! swapped order; the normal triple stays `(a, b, c)`.

/// Per-face attribute bits
const FACE_MATERIAL: i32 = 2;
const FACE_VERTEX_UV: i32 = 8;
const FACE_VERTEX_NORMAL: i32 = 32;

/// One of the eight face-array layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceLayout {
    /// Bare vertex indices
    Triangle,
    /// + sub-mesh material index
    WithMaterial,
    /// + per-face UV indices
    WithUv,
    /// + material and UV
    WithMaterialUv,
    /// + per-face normal indices
    WithNormal,
    /// + material and normal
    WithMaterialNormal,
    /// + UV and normal
    WithUvNormal,
    /// all three attributes
    WithMaterialUvNormal,
}

impl FaceLayout {
    /// Select the layout for a mesh's capabilities.
    pub fn classify(has_material_groups: bool, has_uv: bool, has_normal: bool) -> Self {
        match (has_material_groups, has_uv, has_normal) {
            (false, false, false) => Self::Triangle,
            (true, false, false) => Self::WithMaterial,
            (false, true, false) => Self::WithUv,
            (true, true, false) => Self::WithMaterialUv,
            (false, false, true) => Self::WithNormal,
            (true, false, true) => Self::WithMaterialNormal,
            (false, true, true) => Self::WithUvNormal,
            (true, true, true) => Self::WithMaterialUvNormal,
        }
    }

    /// Layout code, the first field of every face block
    pub fn code(self) -> i32 {
        match self {
            Self::Triangle => 0,
            Self::WithMaterial => FACE_MATERIAL,
            Self::WithUv => FACE_VERTEX_UV,
            Self::WithMaterialUv => FACE_MATERIAL | FACE_VERTEX_UV,
            Self::WithNormal => FACE_VERTEX_NORMAL,
            Self::WithMaterialNormal => FACE_MATERIAL | FACE_VERTEX_NORMAL,
            Self::WithUvNormal => FACE_VERTEX_UV | FACE_VERTEX_NORMAL,
            Self::WithMaterialUvNormal => FACE_MATERIAL | FACE_VERTEX_UV | FACE_VERTEX_NORMAL,
        }
    }

    /// Integers emitted per triangle
    pub fn stride(self) -> usize {
        match self {
            Self::Triangle => 4,
            Self::WithMaterial => 5,
            Self::WithUv | Self::WithNormal => 7,
            Self::WithMaterialUv | Self::WithMaterialNormal => 8,
            Self::WithUvNormal => 10,
            Self::WithMaterialUvNormal => 11,
        }
    }

    /// Whether face blocks carry the sub-mesh material index
    pub fn has_material(self) -> bool {
        self.code() & FACE_MATERIAL != 0
    }

    /// Append one triangle's face block.
    ///
    /// `indices` are the triangle's vertex indices in source order;
    /// `submesh` is ignored by layouts without a material field.
    pub fn emit(self, out: &mut Vec<i32>, indices: [u32; 3], submesh: usize) {
        let [a, b, c] = [indices[0] as i32, indices[1] as i32, indices[2] as i32];
        let s = submesh as i32;

        out.push(self.code());
        // vertex triple, winding swapped for the target handedness
        out.extend_from_slice(&[a, c, b]);
        if self.has_material() {
            out.push(s);
        }
        if self.code() & FACE_VERTEX_UV != 0 {
            // UVs are per-vertex here, the index triple repeats the
            // swapped vertex order
            out.extend_from_slice(&[a, c, b]);
        }
        if self.code() & FACE_VERTEX_NORMAL != 0 {
            // normal triple stays unswapped
            out.extend_from_slice(&[a, b, c]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FaceLayout; 8] = [
        FaceLayout::Triangle,
        FaceLayout::WithMaterial,
        FaceLayout::WithUv,
        FaceLayout::WithMaterialUv,
        FaceLayout::WithNormal,
        FaceLayout::WithMaterialNormal,
        FaceLayout::WithUvNormal,
        FaceLayout::WithMaterialUvNormal,
    ];

    #[test]
    fn test_codes_are_the_eight_sums() {
        let codes: Vec<i32> = ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec![0, 2, 8, 10, 32, 34, 40, 42]);
    }

    #[test]
    fn test_classify_round_trips_code_bits() {
        for layout in ALL {
            let code = layout.code();
            let classified = FaceLayout::classify(
                code & FACE_MATERIAL != 0,
                code & FACE_VERTEX_UV != 0,
                code & FACE_VERTEX_NORMAL != 0,
            );
            assert_eq!(classified, layout);
        }
    }

    #[test]
    fn test_emit_matches_stride() {
        for layout in ALL {
            let mut out = Vec::new();
            layout.emit(&mut out, [4, 5, 6], 1);
            assert_eq!(out.len(), layout.stride(), "layout {layout:?}");
            assert_eq!(out[0], layout.code());
        }
    }

    #[test]
    fn test_emit_triangle_winding() {
        let mut out = Vec::new();
        FaceLayout::Triangle.emit(&mut out, [4, 5, 6], 0);
        assert_eq!(out, vec![0, 4, 6, 5]);
    }

    #[test]
    fn test_emit_normal_triple_unswapped() {
        let mut out = Vec::new();
        FaceLayout::WithNormal.emit(&mut out, [4, 5, 6], 0);
        assert_eq!(out, vec![32, 4, 6, 5, 4, 5, 6]);
    }

    #[test]
    fn test_emit_uv_triple_repeats_swapped_order() {
        let mut out = Vec::new();
        FaceLayout::WithUv.emit(&mut out, [4, 5, 6], 0);
        assert_eq!(out, vec![8, 4, 6, 5, 4, 6, 5]);
    }

    #[test]
    fn test_emit_material_index_placement() {
        let mut out = Vec::new();
        FaceLayout::WithMaterialUv.emit(&mut out, [4, 5, 6], 3);
        assert_eq!(out, vec![10, 4, 6, 5, 3, 4, 6, 5]);
    }

    #[test]
    fn test_emit_full_layout_writes_every_field() {
        let mut out = Vec::new();
        FaceLayout::WithMaterialUvNormal.emit(&mut out, [4, 5, 6], 2);
        assert_eq!(out, vec![42, 4, 6, 5, 2, 4, 6, 5, 4, 5, 6]);
        assert_eq!(out.len(), 11);
    }

    #[test]
    fn test_submesh_ignored_without_material_bit() {
        let mut with_zero = Vec::new();
        let mut with_seven = Vec::new();
        FaceLayout::WithUvNormal.emit(&mut with_zero, [1, 2, 3], 0);
        FaceLayout::WithUvNormal.emit(&mut with_seven, [1, 2, 3], 7);
        assert_eq!(with_zero, with_seven);
    }
}
