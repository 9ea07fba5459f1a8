//! Quad render pipeline construction and shader loading.
//!
//! The shader is read from disk at init time (see
//! [`crate::app::WindowConfig::shader_path`]). Validation failures are
//! captured with a device error scope and logged truncated; the renderer then
//! runs without a pipeline and flushes produce no visible output.

use std::num::NonZeroU32;
use std::path::Path;

use crate::batch::{MAX_TEXTURE_SLOTS, QuadVertex};

// Compiler diagnostics can be enormous for malformed WGSL; logs keep a prefix.
const DIAGNOSTIC_LIMIT: usize = 512;

pub fn load_shader_source(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(e) => {
            log::warn!("could not read shader {}: {}", path.display(), e);
            None
        }
    }
}

/// Bind group layout for the batch's texture slot table: one sampled-texture
/// binding array of [`MAX_TEXTURE_SLOTS`] entries plus the shared sampler.
pub fn texture_slots_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: Some(NonZeroU32::new(MAX_TEXTURE_SLOTS as u32).unwrap()),
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_slots_bind_group_layout"),
    })
}

/// Build the quad pipeline from WGSL source, returning `None` when the shader
/// or pipeline fails validation.
pub async fn mk_quad_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    source: &str,
    texture_slots_layout: &wgpu::BindGroupLayout,
    projection_layout: &wgpu::BindGroupLayout,
) -> Option<wgpu::RenderPipeline> {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Quad Pipeline Layout"),
        bind_group_layouts: &[texture_slots_layout, projection_layout],
        push_constant_ranges: &[],
    });

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Quad Shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Quad Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[QuadVertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: config.format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Quads are emitted counter-clockwise, but the y-down projection
            // mirrors them; culling is off rather than special-cased.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    });

    match device.pop_error_scope().await {
        None => Some(pipeline),
        Some(error) => {
            let message: String = error.to_string().chars().take(DIAGNOSTIC_LIMIT).collect();
            log::warn!("quad shader failed validation, rendering disabled: {message}");
            None
        }
    }
}
