//! Single source of truth for the mesh buffer layout shared by the
//! geometry generators, the renderer, and the WGSL vertex inputs.

/// Components per vertex entry: homogeneous (x, y, z, w).
pub const POINT_SIZE: usize = 4;

/// Corners per triangle.
pub const TRI_CORNERS: usize = 3;

/// Faces of a cube.
pub const CUBE_FACES: usize = 6;

/// Triangles per cube (two per face).
pub const CUBE_TRIS: usize = CUBE_FACES * 2;

/// Vertex entries emitted per cube. Every triangle corner is its own
/// vertex entry; nothing is deduplicated (flat shading needs per-face
/// normals on every corner).
pub const CUBE_VERTS: usize = CUBE_TRIS * TRI_CORNERS;

/// Surviving sub-cubes per subdivision step: 27 cells of the 3x3x3
/// partition minus the 6 face centers and the volume center.
pub const CELLS_KEPT: usize = 20;

/// Grid dimension of one subdivision step.
pub const GRID_DIM: usize = 3;

/// Lowest level the GUI exposes.
pub const MIN_LEVEL: i32 = 1;

/// Highest level the GUI exposes. Level 4 already carries
/// 36 * 20^3 = 288_000 vertex entries; level 5 would be 5.76M.
pub const MAX_LEVEL: i32 = 4;

/// Vertex entries in a sponge mesh at `level` (>= 1).
pub const fn verts_at_level(level: u32) -> usize {
    CUBE_VERTS * CELLS_KEPT.pow(level - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verts_at_level_growth() {
        assert_eq!(verts_at_level(1), 36);
        assert_eq!(verts_at_level(2), 720);
        assert_eq!(verts_at_level(3), 14_400);
        assert_eq!(verts_at_level(4), 288_000);
    }
}
