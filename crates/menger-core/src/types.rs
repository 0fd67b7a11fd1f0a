use crate::constants::{POINT_SIZE, TRI_CORNERS};

/// The three flat buffers a mesh generator hands to the renderer.
///
/// `positions` and `normals` are parallel sequences of 4-component
/// tuples (positions carry w = 1, normals carry w = 0); `indices`
/// groups triangle corners in triples. Buffers are owned and replaced
/// wholesale on regeneration, never patched in place across levels.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
    pub normals: Vec<f32>,
}

impl MeshBuffers {
    /// Allocate zeroed buffers for `verts` vertex entries and
    /// `verts` indices (one index per corner, identity-permutation
    /// style meshes).
    pub fn with_vertex_count(verts: usize) -> Self {
        Self {
            positions: vec![0.0; verts * POINT_SIZE],
            indices: vec![0; verts],
            normals: vec![0.0; verts * POINT_SIZE],
        }
    }

    /// Number of vertex entries (4-tuples) in the position buffer.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POINT_SIZE
    }

    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / TRI_CORNERS
    }

    /// Mutual-consistency check: parallel position/normal buffers,
    /// whole 4-tuples, whole triangles.
    pub fn is_consistent(&self) -> bool {
        self.positions.len() == self.normals.len()
            && self.positions.len() % POINT_SIZE == 0
            && self.indices.len() % TRI_CORNERS == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_vertex_count_sizes() {
        let mesh = MeshBuffers::with_vertex_count(36);
        assert_eq!(mesh.positions.len(), 144);
        assert_eq!(mesh.normals.len(), 144);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.is_consistent());
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
    }
}
