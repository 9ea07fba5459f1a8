//! Render backend capability interface and the wgpu implementation.
//!
//! The batcher never talks to the GPU directly; it goes through
//! [`RenderBackend`], which covers exactly the operations a flush needs:
//! clearing, texture creation, slot binding, vertex submission, presenting,
//! and surface resizes. [`WgpuBackend`] is the production implementation over
//! [`Context`]; tests substitute a recording fake.

use std::iter;
use std::path::Path;

use crate::batch::{MAX_TEXTURE_SLOTS, QuadVertex};
use crate::context::Context;
use crate::pipeline;

pub trait RenderBackend {
    /// Immediately clear the color buffer.
    fn clear(&mut self, color: [f32; 4]);

    /// Upload RGBA8 pixels as a new GPU texture and return its native id.
    /// Ids are non-zero; zero is the "no texture" sentinel.
    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> u32;

    /// Bind a texture to a slot for the next submission. Unit index equals
    /// slot index.
    fn bind_texture(&mut self, slot: u32, native_id: u32);

    /// Upload the vertex buffer and issue a single draw call covering it.
    fn submit(&mut self, vertices: &[QuadVertex]);

    /// Present the current frame (buffer swap).
    fn present(&mut self);

    /// React to a window resize.
    fn resize(&mut self, width: u32, height: u32);
}

#[derive(Debug)]
struct GpuTexture {
    #[allow(unused)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// wgpu-backed implementation of [`RenderBackend`].
///
/// Owns the texture store (native id = 1-based index), the shared
/// nearest/repeat sampler, the GPU vertex buffer sized for a full batch, and
/// the in-flight surface frame.
#[derive(Debug)]
pub struct WgpuBackend {
    ctx: Context,
    pipeline: Option<wgpu::RenderPipeline>,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    textures: Vec<GpuTexture>,
    bound: [u32; MAX_TEXTURE_SLOTS],
    frame: Option<wgpu::SurfaceTexture>,
}

impl WgpuBackend {
    pub async fn new(ctx: Context, shader_path: &Path) -> Self {
        let texture_layout = pipeline::texture_slots_layout(&ctx.device);

        let pipeline = match pipeline::load_shader_source(shader_path) {
            Some(source) => {
                pipeline::mk_quad_pipeline(
                    &ctx.device,
                    &ctx.config,
                    &source,
                    &texture_layout,
                    &ctx.projection.bind_group_layout,
                )
                .await
            }
            None => None,
        };

        // Nearest filtering and wrap-repeat addressing for all 2D textures.
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Quad Vertex Buffer"),
            size: (crate::batch::MAX_QUADS
                * crate::batch::VERTICES_PER_QUAD
                * std::mem::size_of::<QuadVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            ctx,
            pipeline,
            texture_layout,
            sampler,
            vertex_buffer,
            textures: Vec::new(),
            bound: [0; MAX_TEXTURE_SLOTS],
            frame: None,
        }
    }

    pub fn window(&self) -> &winit::window::Window {
        &self.ctx.window
    }

    fn texture_view(&self, native_id: u32) -> Option<&wgpu::TextureView> {
        if native_id == 0 {
            return None;
        }
        self.textures
            .get(native_id as usize - 1)
            .map(|entry| &entry.view)
    }

    /// Acquire the surface frame for this cycle, reconfiguring once on a
    /// lost or outdated surface.
    fn acquire_frame(&mut self) -> bool {
        if self.frame.is_some() {
            return true;
        }
        match self.ctx.surface.get_current_texture() {
            Ok(frame) => {
                self.frame = Some(frame);
                true
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
                match self.ctx.surface.get_current_texture() {
                    Ok(frame) => {
                        self.frame = Some(frame);
                        true
                    }
                    Err(e) => {
                        log::error!("unable to acquire a frame: {e}");
                        false
                    }
                }
            }
            Err(e) => {
                log::error!("unable to acquire a frame: {e}");
                false
            }
        }
    }
}

impl RenderBackend for WgpuBackend {
    fn clear(&mut self, color: [f32; 4]) {
        if !self.acquire_frame() {
            return;
        }
        let Some(frame) = &self.frame else { return };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Clear Encoder"),
            });
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: color[0] as f64,
                        g: color[1] as f64,
                        b: color[2] as f64,
                        a: color[3] as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        self.ctx.queue.submit(iter::once(encoder.finish()));
    }

    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> u32 {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("2d texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.textures.push(GpuTexture { texture, view });
        self.textures.len() as u32
    }

    fn bind_texture(&mut self, slot: u32, native_id: u32) {
        if (slot as usize) < MAX_TEXTURE_SLOTS {
            self.bound[slot as usize] = native_id;
        }
    }

    fn submit(&mut self, vertices: &[QuadVertex]) {
        if vertices.is_empty() || self.pipeline.is_none() || self.textures.is_empty() {
            return;
        }
        if !self.acquire_frame() {
            return;
        }

        self.ctx
            .queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));

        // Every layout entry needs a view; unused slots fall back to the
        // first texture (the reserved white pixel).
        let fallback = &self.textures[0].view;
        let views: Vec<&wgpu::TextureView> = self
            .bound
            .iter()
            .map(|&id| self.texture_view(id).unwrap_or(fallback))
            .collect();
        let bind_group = self.ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureViewArray(&views),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
            label: Some("texture_slots_bind_group"),
        });

        let Some(frame) = &self.frame else { return };
        let Some(pipeline) = &self.pipeline else { return };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Batch Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Batch Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &bind_group, &[]);
            render_pass.set_bind_group(1, &self.ctx.projection.bind_group, &[]);
            let used = (vertices.len() * std::mem::size_of::<QuadVertex>()) as wgpu::BufferAddress;
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..used));
            render_pass.draw(0..vertices.len() as u32, 0..1);
        }
        self.ctx.queue.submit(iter::once(encoder.finish()));
    }

    fn present(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.present();
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
        }
    }
}
