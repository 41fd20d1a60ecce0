use asteroids_render::{
    FLOATS_PER_INSTANCE, FLOATS_PER_VERTEX, RenderBackend, RenderError, index_buffer,
};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::gpu::GpuContext;
use crate::shaders;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    projection_view: [[f32; 4]; 4],
}

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// [`RenderBackend`] drawing into a wgpu surface texture.
///
/// The host acquires a surface texture, hands its view over with
/// [`set_target`](Self::set_target), runs the batch frame, then presents.
pub struct WgpuBackend {
    gpu: GpuContext,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    capacity: usize,
    target: Option<wgpu::TextureView>,
}

impl WgpuBackend {
    /// Compile the shader, build the pipeline and allocate buffers for
    /// `capacity` instances. Validation errors are caught with error scopes
    /// and returned instead of reaching the device's uncaptured handler.
    pub fn new(gpu: GpuContext, capacity: usize) -> Result<Self, RenderError> {
        let device = &gpu.device;
        let indices = index_buffer(capacity)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("batch_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BATCH_SHADER.into()),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            tracing::error!(%err, "shader compilation failed");
            return Err(RenderError::ShaderCompile(err.to_string()));
        }

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                projection_view: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("batch_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x3,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            tracing::error!(%err, "pipeline creation failed");
            return Err(RenderError::PipelineCreation(err.to_string()));
        }

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vertex_buffer"),
            size: (capacity * FLOATS_PER_INSTANCE * std::mem::size_of::<f32>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::debug!(capacity, "batch pipeline ready");

        Ok(Self {
            gpu,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            index_buffer,
            capacity,
            target: None,
        })
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    pub fn gpu_mut(&mut self) -> &mut GpuContext {
        &mut self.gpu
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Texture view the next `draw_indexed` renders into.
    pub fn set_target(&mut self, view: wgpu::TextureView) {
        self.target = Some(view);
    }

    /// Hand the current target back, e.g. for an overlay pass.
    pub fn take_target(&mut self) -> Option<wgpu::TextureView> {
        self.target.take()
    }
}

impl RenderBackend for WgpuBackend {
    fn set_projection_view(&mut self, matrix: Mat4) {
        self.gpu.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                projection_view: matrix.to_cols_array_2d(),
            }),
        );
    }

    fn upload_vertices(&mut self, vertices: &[f32]) -> Result<(), RenderError> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        if bytes.len() as u64 > self.vertex_buffer.size() {
            return Err(RenderError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if !bytes.is_empty() {
            self.gpu.queue.write_buffer(&self.vertex_buffer, 0, bytes);
        }
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<(), RenderError> {
        let view = self.target.as_ref().ok_or(RenderError::NoTarget)?;

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("batch_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("batch_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if index_count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..index_count, 0, 0..1);
            }
        }
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}
