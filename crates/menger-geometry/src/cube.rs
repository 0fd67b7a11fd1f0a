use menger_core::constants::{CUBE_TRIS, CUBE_VERTS, POINT_SIZE, TRI_CORNERS};
use menger_core::types::MeshBuffers;

/// Axis-aligned unit-cube mesh template.
///
/// Corner numbering, with the min corner at the origin:
///
/// ```text
///     5----------3
///    /|         /|
///   / |        / |
///  7----------1  |
///  |  |       |  |
///  |  6-------|--4
///  | /        | /
///  |/         |/
///  0----------2
/// ```
///
/// Clockwise is taken as facing the viewer.
pub struct Cube;

/// The 8 unit-cube corners as homogeneous points (w = 1).
static FLAT_PTS: [f32; 8 * POINT_SIZE] = [
    0.0, 0.0, 0.0, 1.0, // p0
    1.0, 1.0, 0.0, 1.0, // p1
    1.0, 0.0, 0.0, 1.0, // p2
    1.0, 1.0, 1.0, 1.0, // p3
    1.0, 0.0, 1.0, 1.0, // p4
    0.0, 1.0, 1.0, 1.0, // p5
    0.0, 0.0, 1.0, 1.0, // p6
    0.0, 1.0, 0.0, 1.0, // p7
];

/// 12 triangles as corner indices into `FLAT_PTS`. The winding is
/// mixed on purpose: front/right/top wind counter-clockwise,
/// back/left/bottom clockwise. Backface culling depends on this
/// exact ordering.
static FLAT_IDX: [usize; CUBE_TRIS * TRI_CORNERS] = [
    // front face
    0, 7, 2, // counter
    2, 7, 1, // counter
    // right face
    1, 4, 2, // counter
    1, 3, 4, // counter
    // back face
    3, 6, 4, // clock
    3, 5, 6, // clock
    // left face
    0, 6, 5, // clock
    5, 7, 0, // clock
    // bottom face
    2, 6, 0, // clock
    4, 6, 2, // clock
    // top face
    3, 1, 7, // counter
    3, 7, 5, // counter
];

/// Per-triangle face normals as homogeneous directions (w = 0),
/// one row per triangle in `FLAT_IDX` order; the two triangles of a
/// face share a row value.
static FLAT_N: [f32; CUBE_TRIS * POINT_SIZE] = [
    // front
    0.0, 0.0, -1.0, 0.0, //
    0.0, 0.0, -1.0, 0.0, //
    // right
    1.0, 0.0, 0.0, 0.0, //
    1.0, 0.0, 0.0, 0.0, //
    // back
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    // left
    -1.0, 0.0, 0.0, 0.0, //
    -1.0, 0.0, 0.0, 0.0, //
    // bottom
    0.0, -1.0, 0.0, 0.0, //
    0.0, -1.0, 0.0, 0.0, //
    // top
    0.0, 1.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
];

impl Cube {
    /// Build the 12-triangle mesh of a cube with its min corner at
    /// `origin` and side length `len`.
    ///
    /// Every triangle corner gets its own vertex entry (36 in total),
    /// so the index buffer is the identity permutation and each corner
    /// carries its triangle's flat face normal.
    pub fn build(origin: [f32; 3], len: f32) -> MeshBuffers {
        let mut mesh = MeshBuffers::with_vertex_count(CUBE_VERTS);

        for tri in 0..CUBE_TRIS {
            for corner in 0..TRI_CORNERS {
                let vert = tri * TRI_CORNERS + corner;
                mesh.indices[vert] = vert as u32;

                let pt = FLAT_IDX[vert];
                let base = vert * POINT_SIZE;
                for coord in 0..POINT_SIZE {
                    mesh.positions[base + coord] = if coord < 3 {
                        origin[coord] + FLAT_PTS[pt * POINT_SIZE + coord] * len
                    } else {
                        // w comes straight from the table (always 1)
                        FLAT_PTS[pt * POINT_SIZE + coord]
                    };
                    mesh.normals[base + coord] = FLAT_N[tri * POINT_SIZE + coord];
                }
            }
        }

        mesh
    }
}
