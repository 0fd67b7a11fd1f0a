use glam::Mat4;
use menger_core::types::MeshBuffers;

/// Half-extent of the ground quad in world units.
const FLOOR_SIZE: f32 = 1000.0;

/// Height of the ground plane.
const FLOOR_Y: f32 = -2.0;

/// Fixed two-triangle ground plane below the sponge. Static geometry;
/// never regenerated, so there is no dirty flag to track.
pub struct Floor {
    buffers: MeshBuffers,
}

impl Default for Floor {
    fn default() -> Self {
        Self::new()
    }
}

impl Floor {
    pub fn new() -> Self {
        let s = FLOOR_SIZE;
        let y = FLOOR_Y;
        let buffers = MeshBuffers {
            positions: vec![
                -s, y, -s, 1.0, //
                s, y, s, 1.0, //
                s, y, -s, 1.0, //
                s, y, s, 1.0, //
                -s, y, -s, 1.0, //
                -s, y, s, 1.0, //
            ],
            indices: vec![0, 1, 2, 3, 4, 5],
            normals: vec![
                0.0, 1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
            ],
        };
        Self { buffers }
    }

    pub fn positions_flat(&self) -> &[f32] {
        &self.buffers.positions
    }

    pub fn indices_flat(&self) -> &[u32] {
        &self.buffers.indices
    }

    pub fn normals_flat(&self) -> &[f32] {
        &self.buffers.normals
    }

    /// Model matrix of the floor (authored in world space).
    pub fn u_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_layout() {
        let floor = Floor::new();
        assert_eq!(floor.positions_flat().len(), 6 * 4);
        assert_eq!(floor.normals_flat().len(), 6 * 4);
        assert_eq!(floor.indices_flat(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_floor_is_flat_and_up_facing() {
        let floor = Floor::new();
        for v in floor.positions_flat().chunks_exact(4) {
            assert_eq!(v[1], FLOOR_Y);
            assert_eq!(v[3], 1.0);
        }
        for n in floor.normals_flat().chunks_exact(4) {
            assert_eq!(n, &[0.0, 1.0, 0.0, 0.0]);
        }
    }
}
