use glam::Mat4;
use menger_core::constants::{CELLS_KEPT, GRID_DIM, POINT_SIZE};
use menger_core::types::MeshBuffers;

use crate::cube::Cube;

/// Which cells of the 3x3x3 partition keep geometry. False exactly at
/// the 6 face centers and the volume center; the 20 true cells define
/// the sponge. Indexed `[x][y][z]`.
static TO_PLACE: [[[bool; GRID_DIM]; GRID_DIM]; GRID_DIM] = [
    [
        [true, true, true],
        [true, false, true],
        [true, true, true],
    ],
    [
        [true, false, true],
        [false, false, false],
        [true, false, true],
    ],
    [
        [true, true, true],
        [true, false, true],
        [true, true, true],
    ],
];

/// Build the sponge mesh for `level` (callers guarantee `level >= 1`).
///
/// Level 1 is a unit cube centered on the origin. Each further level
/// shrinks the previous level's mesh by 1/3, re-centers it inside a
/// grid cell, and stamps 20 translated copies of it into the cells
/// `TO_PLACE` keeps. The result always fits `[-0.5, 0.5]^3` and its
/// index buffer is the identity permutation (each copy's indices are
/// offset by the vertices emitted before it).
pub fn build_level(level: u32) -> MeshBuffers {
    if level <= 1 {
        return Cube::build([-0.5, -0.5, -0.5], 1.0);
    }

    let mut sub = build_level(level - 1);

    // Rescale the freshly built sub-mesh in place. Safe because `sub`
    // is owned here and about to be consumed.
    for v in sub.positions.chunks_exact_mut(POINT_SIZE) {
        v[0] = (v[0] + 0.5) / GRID_DIM as f32 - 0.5;
        v[1] = (v[1] + 0.5) / GRID_DIM as f32 - 0.5;
        v[2] = (v[2] + 0.5) / GRID_DIM as f32 - 0.5;
        assert!(v[3] == 1.0, "not a point");
    }

    let sub_verts = sub.vertex_count();
    let mut out = MeshBuffers::with_vertex_count(sub_verts * CELLS_KEPT);

    // Cells are visited x-outer, y-middle, z-inner; only kept cells
    // consume an instance slot.
    let mut slot = 0usize;
    for (xi, plane) in TO_PLACE.iter().enumerate() {
        let x_off = xi as f32 / GRID_DIM as f32;
        for (yi, row) in plane.iter().enumerate() {
            let y_off = yi as f32 / GRID_DIM as f32;
            for (zi, &place) in row.iter().enumerate() {
                let z_off = zi as f32 / GRID_DIM as f32;
                if !place {
                    continue;
                }

                let pos_base = slot * sub.positions.len();
                for j in (0..sub.positions.len()).step_by(POINT_SIZE) {
                    assert!(sub.positions[j + 3] == 1.0, "not a point");
                    out.positions[pos_base + j] = sub.positions[j] + x_off;
                    out.positions[pos_base + j + 1] = sub.positions[j + 1] + y_off;
                    out.positions[pos_base + j + 2] = sub.positions[j + 2] + z_off;
                    out.positions[pos_base + j + 3] = 1.0;
                }

                out.normals[pos_base..pos_base + sub.normals.len()]
                    .copy_from_slice(&sub.normals);

                let idx_base = slot * sub.indices.len();
                let vert_off = (slot * sub_verts) as u32;
                for (j, &idx) in sub.indices.iter().enumerate() {
                    out.indices[idx_base + j] = idx + vert_off;
                }

                slot += 1;
            }
        }
    }
    assert_eq!(slot, CELLS_KEPT, "placement mask must keep 20 cells");

    out
}

/// The levelled fractal mesh plus the state the GUI and renderer talk
/// to: current level, the three flat buffers, and the dirty flag the
/// renderer consumes to skip redundant GPU uploads.
pub struct MengerSponge {
    level: i32,
    buffers: Option<MeshBuffers>,
    dirty: bool,
}

impl MengerSponge {
    /// Construct and build the initial level.
    pub fn new(level: i32) -> Self {
        let mut sponge = Self {
            level: 0,
            buffers: None,
            dirty: false,
        };
        sponge.set_level(level);
        sponge
    }

    /// Request a level change. Buffers are regenerated only when
    /// `level` is positive and differs from the current level; the
    /// skip on an equal level avoids redundant work, nothing more.
    ///
    /// A non-positive `level` is recorded without a rebuild, leaving
    /// the previous buffers in place. Callers must not assume the
    /// flat buffers reflect `level()` in that case. This mirrors
    /// long-standing caller-visible behavior and is kept deliberately.
    pub fn set_level(&mut self, level: i32) {
        if level > 0 {
            if level != self.level {
                let built = build_level(level as u32);
                log::debug!(
                    "sponge rebuilt: level {}, {} vertex entries, {} triangles",
                    level,
                    built.vertex_count(),
                    built.triangle_count()
                );
                self.buffers = Some(built);
            }
        } else {
            log::warn!(
                "non-positive sponge level {} recorded without rebuild",
                level
            );
        }
        // Level and dirty update unconditionally, rebuild or not.
        self.level = level;
        self.dirty = true;
    }

    /// Current level as last requested (see `set_level` for the
    /// non-positive caveat).
    pub fn level(&self) -> i32 {
        self.level
    }

    /// True if the mesh changed since the renderer last consumed it.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the current buffers as consumed.
    pub fn set_clean(&mut self) {
        self.dirty = false;
    }

    /// Flat vertex positions, 4 components per entry (w = 1).
    pub fn positions_flat(&self) -> &[f32] {
        &self.buffers().positions
    }

    /// Flat triangle-corner indices, 3 per triangle.
    pub fn indices_flat(&self) -> &[u32] {
        &self.buffers().indices
    }

    /// Flat vertex normals, 4 components per entry (w = 0).
    pub fn normals_flat(&self) -> &[f32] {
        &self.buffers().normals
    }

    /// Model matrix of the sponge (the mesh is authored in world
    /// space, centered on the origin).
    pub fn u_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }

    fn buffers(&self) -> &MeshBuffers {
        self.buffers
            .as_ref()
            .expect("sponge buffers are null: no level has been built")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menger_core::constants::verts_at_level;

    /// The 20 kept cells in traversal order (x outer, y middle,
    /// z inner), as grid coordinates.
    fn kept_cells() -> Vec<(usize, usize, usize)> {
        let mut cells = Vec::new();
        for (xi, plane) in TO_PLACE.iter().enumerate() {
            for (yi, row) in plane.iter().enumerate() {
                for (zi, &place) in row.iter().enumerate() {
                    if place {
                        cells.push((xi, yi, zi));
                    }
                }
            }
        }
        cells
    }

    #[test]
    fn test_placement_mask_keeps_twenty() {
        let cells = kept_cells();
        assert_eq!(cells.len(), 20);
        // The 7 dropped cells: 6 face centers + volume center.
        assert!(!TO_PLACE[1][1][1]);
        assert!(!TO_PLACE[0][1][1]);
        assert!(!TO_PLACE[2][1][1]);
        assert!(!TO_PLACE[1][0][1]);
        assert!(!TO_PLACE[1][2][1]);
        assert!(!TO_PLACE[1][1][0]);
        assert!(!TO_PLACE[1][1][2]);
    }

    #[test]
    fn test_size_law() {
        for level in 1..=3u32 {
            let mesh = build_level(level);
            let verts = verts_at_level(level);
            assert_eq!(mesh.positions.len(), 4 * verts, "level {level} positions");
            assert_eq!(mesh.normals.len(), 4 * verts, "level {level} normals");
            assert_eq!(mesh.indices.len(), verts, "level {level} indices");
        }
    }

    #[test]
    fn test_homogeneous_coordinates() {
        for level in 1..=3u32 {
            let mesh = build_level(level);
            for v in mesh.positions.chunks_exact(4) {
                assert_eq!(v[3], 1.0, "position w at level {level}");
            }
            for n in mesh.normals.chunks_exact(4) {
                assert_eq!(n[3], 0.0, "normal w at level {level}");
            }
        }
    }

    #[test]
    fn test_normals_stay_axis_aligned() {
        // Subdivision translates and scales but never rotates, so
        // every normal stays a signed unit axis at every level.
        let mesh = build_level(3);
        for n in mesh.normals.chunks_exact(4) {
            let axis_hits = n[..3].iter().filter(|c| c.abs() == 1.0).count();
            let zeros = n[..3].iter().filter(|c| **c == 0.0).count();
            assert_eq!(axis_hits, 1);
            assert_eq!(zeros, 2);
        }
    }

    #[test]
    fn test_bounding_box_is_unit_cube() {
        for level in 1..=3u32 {
            let mesh = build_level(level);
            for v in mesh.positions.chunks_exact(4) {
                for c in &v[..3] {
                    assert!(
                        (-0.5..=0.5).contains(c),
                        "level {level} vertex component {c} escapes the unit box"
                    );
                }
            }
        }
    }

    #[test]
    fn test_indices_are_identity_at_every_level() {
        // The cube's identity index buffer survives concatenation
        // because each copy is offset by the vertices before it.
        for level in 1..=3u32 {
            let mesh = build_level(level);
            for (i, &idx) in mesh.indices.iter().enumerate() {
                assert_eq!(idx, i as u32, "level {level} index {i}");
            }
        }
    }

    #[test]
    fn test_index_validity() {
        let mesh = build_level(3);
        let verts = (mesh.positions.len() / 4) as u32;
        assert!(mesh.indices.iter().all(|&i| i < verts));
    }

    #[test]
    fn test_level_one_is_centered_unit_cube() {
        let mesh = build_level(1);
        assert_eq!(mesh, Cube::build([-0.5, -0.5, -0.5], 1.0));
    }

    #[test]
    fn test_level_two_instances_land_in_kept_cells() {
        let mesh = build_level(2);
        assert_eq!(mesh.positions.len() / 4, 720);

        // Instance k (36 vertices) must exactly fill the k-th kept
        // cell of the grid spanning [-0.5, 0.5]^3.
        for (k, (xi, yi, zi)) in kept_cells().into_iter().enumerate() {
            let lo = [
                -0.5 + xi as f32 / 3.0,
                -0.5 + yi as f32 / 3.0,
                -0.5 + zi as f32 / 3.0,
            ];
            let hi = [lo[0] + 1.0 / 3.0, lo[1] + 1.0 / 3.0, lo[2] + 1.0 / 3.0];

            let mut min = [f32::MAX; 3];
            let mut max = [f32::MIN; 3];
            for v in mesh.positions[k * 36 * 4..(k + 1) * 36 * 4].chunks_exact(4) {
                for c in 0..3 {
                    min[c] = min[c].min(v[c]);
                    max[c] = max[c].max(v[c]);
                }
            }
            for c in 0..3 {
                assert!((min[c] - lo[c]).abs() < 1e-6, "instance {k} min axis {c}");
                assert!((max[c] - hi[c]).abs() < 1e-6, "instance {k} max axis {c}");
            }
        }
    }

    #[test]
    fn test_level_two_center_is_hollow() {
        // No geometry strictly inside the removed center cell.
        let mesh = build_level(2);
        for v in mesh.positions.chunks_exact(4) {
            let inside = v[..3].iter().all(|c| c.abs() < 1.0 / 6.0 - 1e-6);
            assert!(!inside, "vertex {v:?} inside the hollow center");
        }
    }

    #[test]
    fn test_set_level_idempotent() {
        let mut a = MengerSponge::new(2);
        let first = a.positions_flat().to_vec();
        a.set_level(2);
        assert_eq!(a.positions_flat(), first.as_slice());
        assert_eq!(a.level(), 2);
    }

    #[test]
    fn test_dirty_flag_law() {
        let mut sponge = MengerSponge::new(1);
        assert!(sponge.is_dirty());
        sponge.set_clean();
        assert!(!sponge.is_dirty());
        // Same level: no rebuild, but dirty is raised again.
        sponge.set_level(1);
        assert!(sponge.is_dirty());
        sponge.set_clean();
        sponge.set_level(2);
        assert!(sponge.is_dirty());
    }

    #[test]
    fn test_non_positive_level_keeps_stale_buffers() {
        let mut sponge = MengerSponge::new(2);
        let before = sponge.positions_flat().to_vec();
        sponge.set_level(0);
        // Level and dirty update; buffers do not.
        assert_eq!(sponge.level(), 0);
        assert!(sponge.is_dirty());
        assert_eq!(sponge.positions_flat(), before.as_slice());
    }

    #[test]
    fn test_level_change_replaces_buffers_wholesale() {
        let mut sponge = MengerSponge::new(1);
        assert_eq!(sponge.positions_flat().len(), 36 * 4);
        sponge.set_level(2);
        assert_eq!(sponge.positions_flat().len(), 720 * 4);
        assert_eq!(sponge.normals_flat().len(), 720 * 4);
        assert_eq!(sponge.indices_flat().len(), 720);
    }

    #[test]
    #[should_panic(expected = "sponge buffers are null")]
    fn test_accessor_panics_before_first_build() {
        let sponge = MengerSponge::new(0);
        let _ = sponge.positions_flat();
    }
}
