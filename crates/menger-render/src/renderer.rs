use glam::Mat4;
use menger_geometry::{Floor, MengerSponge};
use wgpu::util::DeviceExt;

use crate::mesh::GpuMesh;

/// GPU-uploadable per-mesh uniforms. Must match MeshUniforms in mesh.wgsl.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
    pub color: [f32; 4],
}

/// World-space light position shared by both meshes.
const LIGHT_POS: [f32; 4] = [10.0, 10.0, -10.0, 1.0];

const SPONGE_COLOR: [f32; 4] = [0.85, 0.45, 0.15, 1.0];
const FLOOR_COLOR: [f32; 4] = [0.35, 0.38, 0.42, 1.0];

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Single public struct owning all rendering GPU resources. Pipeline
/// and uniform resources are created once at init; only the sponge's
/// vertex/index buffers are recreated, and only when its dirty flag
/// says the CPU-side mesh changed.
pub struct Renderer {
    mesh_pipeline: wgpu::RenderPipeline,
    #[allow(dead_code)] // Kept for bind group recreation if meshes gain textures
    uniform_bgl: wgpu::BindGroupLayout,
    // Sponge
    sponge_mesh: GpuMesh,
    sponge_uniform_buffer: wgpu::Buffer,
    sponge_bind_group: wgpu::BindGroup,
    // Floor (static, uploaded once)
    floor_mesh: GpuMesh,
    floor_uniform_buffer: wgpu::Buffer,
    floor_bind_group: wgpu::BindGroup,
    // Depth
    depth_view: wgpu::TextureView,
}

impl Renderer {
    /// Build all GPU resources, including the initial upload of both
    /// meshes. Consumes the sponge's dirty flag.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sponge: &mut MengerSponge,
        floor: &Floor,
    ) -> Self {
        let mesh_wgsl = include_str!("../../../shaders/mesh.wgsl");
        let mesh_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh-shader"),
            source: wgpu::ShaderSource::Wgsl(mesh_wgsl.into()),
        });

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh-uniform-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh-pipeline-layout"),
            bind_group_layouts: &[&uniform_bgl],
            push_constant_ranges: &[],
        });

        // Two vertex buffers, one attribute each: position 4-tuples at
        // location 0, normal 4-tuples at location 1. Matches the flat
        // buffer layout from menger-geometry directly.
        let vertex_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: 16,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: 16,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 1,
                }],
            },
        ];

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_module,
                entry_point: Some("vs_main"),
                buffers: &vertex_layouts,
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &mesh_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        // -- Per-mesh uniform buffers and bind groups --
        let sponge_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sponge-uniforms"),
            contents: bytemuck::bytes_of(&Self::uniforms(
                Mat4::IDENTITY,
                sponge.u_matrix(),
                SPONGE_COLOR,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let sponge_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sponge-uniform-bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: sponge_uniform_buffer.as_entire_binding(),
            }],
        });

        let floor_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor-uniforms"),
            contents: bytemuck::bytes_of(&Self::uniforms(
                Mat4::IDENTITY,
                floor.u_matrix(),
                FLOOR_COLOR,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let floor_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("floor-uniform-bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: floor_uniform_buffer.as_entire_binding(),
            }],
        });

        // -- Initial mesh uploads --
        let sponge_mesh = GpuMesh::upload(
            device,
            "sponge",
            sponge.positions_flat(),
            sponge.indices_flat(),
            sponge.normals_flat(),
        );
        sponge.set_clean();

        let floor_mesh = GpuMesh::upload(
            device,
            "floor",
            floor.positions_flat(),
            floor.indices_flat(),
            floor.normals_flat(),
        );

        let depth_view = Self::create_depth_view(device, width, height);

        Self {
            mesh_pipeline,
            uniform_bgl,
            sponge_mesh,
            sponge_uniform_buffer,
            sponge_bind_group,
            floor_mesh,
            floor_uniform_buffer,
            floor_bind_group,
            depth_view,
        }
    }

    /// Re-upload the sponge if its CPU-side buffers changed since the
    /// last upload. This is the renderer's half of the dirty-flag
    /// contract: skipping the upload on a clean sponge is an
    /// optimization, not a correctness requirement.
    pub fn sync_sponge(&mut self, device: &wgpu::Device, sponge: &mut MengerSponge) {
        if !sponge.is_dirty() {
            return;
        }
        log::info!(
            "uploading sponge mesh: level {}, {} indices",
            sponge.level(),
            sponge.indices_flat().len()
        );
        self.sponge_mesh = GpuMesh::upload(
            device,
            "sponge",
            sponge.positions_flat(),
            sponge.indices_flat(),
            sponge.normals_flat(),
        );
        sponge.set_clean();
    }

    /// Write this frame's camera matrices into both uniform buffers.
    pub fn update_camera(
        &self,
        queue: &wgpu::Queue,
        view_proj: Mat4,
        sponge_model: Mat4,
        floor_model: Mat4,
    ) {
        queue.write_buffer(
            &self.sponge_uniform_buffer,
            0,
            bytemuck::bytes_of(&Self::uniforms(view_proj, sponge_model, SPONGE_COLOR)),
        );
        queue.write_buffer(
            &self.floor_uniform_buffer,
            0,
            bytemuck::bytes_of(&Self::uniforms(view_proj, floor_model, FLOOR_COLOR)),
        );
    }

    /// Recreate the depth buffer on canvas resize.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_view = Self::create_depth_view(device, width, height);
    }

    /// Encode the mesh pass: clear, draw floor, draw sponge.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, surface_view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("mesh-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.05,
                        g: 0.06,
                        b: 0.08,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.mesh_pipeline);
        for (bind_group, mesh) in [
            (&self.floor_bind_group, &self.floor_mesh),
            (&self.sponge_bind_group, &self.sponge_mesh),
        ] {
            pass.set_bind_group(0, bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.position_buffer.slice(..));
            pass.set_vertex_buffer(1, mesh.normal_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn uniforms(view_proj: Mat4, model: Mat4, color: [f32; 4]) -> MeshUniforms {
        MeshUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            light_pos: LIGHT_POS,
            color,
        }
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

}
