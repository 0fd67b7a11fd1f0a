use menger_core::constants::{POINT_SIZE, TRI_CORNERS};
use wgpu::util::DeviceExt;

/// GPU-resident copy of one generated mesh: separate position and
/// normal vertex buffers plus a u32 index buffer, matching the flat
/// buffer layout the generators emit.
///
/// Buffer sizes change whenever the sponge level changes, so a
/// re-upload is a full recreation, not an in-place write.
pub struct GpuMesh {
    pub position_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Copy the three flat buffers into freshly created GPU buffers.
    pub fn upload(
        device: &wgpu::Device,
        label: &str,
        positions: &[f32],
        indices: &[u32],
        normals: &[f32],
    ) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(positions.len() % POINT_SIZE, 0);
        debug_assert_eq!(indices.len() % TRI_CORNERS, 0);

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-positions")),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-normals")),
            contents: bytemuck::cast_slice(normals),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            position_buffer,
            normal_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}
