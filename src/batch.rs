//! CPU-side quad batching.
//!
//! This module provides [`QuadBatch`], the accumulation buffer behind the
//! renderer's draw calls. Draw requests append six vertices (two triangles)
//! each and resolve their texture to a slot in a bounded table. The batch
//! holds everything until a flush drains it through the render backend in a
//! single draw call.
//!
//! # Key types
//!
//! - [`QuadVertex`] is the GPU vertex format (`#[repr(C)]`, `bytemuck::Pod`)
//! - [`QuadBatch`] owns the vertex buffer, slot table, and counters

use cgmath::{Matrix4, Vector4};

/// Maximum number of quads buffered between flushes.
pub const MAX_QUADS: usize = 1000;
/// Maximum number of distinct textures bound for a single batch.
pub const MAX_TEXTURE_SLOTS: usize = 8;
/// Two triangles per quad.
pub const VERTICES_PER_QUAD: usize = 6;

/// Vertex format for batched quads.
///
/// `tex_index` selects which bound texture the fragment shader samples;
/// it refers into the slot table of the batch this vertex was issued in.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub tex_coords: [f32; 2],
    pub tex_index: u32,
}

impl QuadVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 10]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }
}

// Unit quad centered at the origin, corners at +-0.5, as two counter-clockwise
// triangles with their UV per corner. Quads are produced by transforming these.
const QUAD_CORNERS: [([f32; 2], [f32; 2]); VERTICES_PER_QUAD] = [
    ([-0.5, -0.5], [0.0, 0.0]),
    ([0.5, -0.5], [1.0, 0.0]),
    ([0.5, 0.5], [1.0, 1.0]),
    ([0.5, 0.5], [1.0, 1.0]),
    ([-0.5, 0.5], [0.0, 1.0]),
    ([-0.5, -0.5], [0.0, 0.0]),
];

/// Accumulates quad vertices and the texture slot table for one batch.
///
/// The slot table is a fixed-capacity array ordered by first use; slot
/// identity is the texture's native id, nothing else. Callers are expected
/// to check [`needs_flush`](Self::needs_flush) before [`push`](Self::push).
#[derive(Debug)]
pub struct QuadBatch {
    vertices: Vec<QuadVertex>,
    slots: [u32; MAX_TEXTURE_SLOTS],
    slot_count: usize,
    quad_count: usize,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(MAX_QUADS * VERTICES_PER_QUAD),
            slots: [0; MAX_TEXTURE_SLOTS],
            slot_count: 0,
            quad_count: 0,
        }
    }

    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn vertices(&self) -> &[QuadVertex] {
        &self.vertices
    }

    /// Native ids of the active slots, in first-use order.
    pub fn slots(&self) -> &[u32] {
        &self.slots[..self.slot_count]
    }

    /// Whether pushing a quad with this texture would exceed a capacity.
    ///
    /// True once the quad buffer is full, or once the slot table is full and
    /// the texture is not already bound. A repeated texture never forces a
    /// flush on its own.
    pub fn needs_flush(&self, native_id: u32) -> bool {
        self.quad_count == MAX_QUADS
            || (self.slot_count == MAX_TEXTURE_SLOTS && self.resolve_slot(native_id).is_none())
    }

    fn resolve_slot(&self, native_id: u32) -> Option<u32> {
        self.slots[..self.slot_count]
            .iter()
            .position(|&id| id == native_id)
            .map(|idx| idx as u32)
    }

    /// Append one quad: six vertices carrying the transformed unit-quad
    /// corners, the given color, fixed per-corner UVs, and the resolved slot.
    pub fn push(&mut self, native_id: u32, transform: Matrix4<f32>, color: [f32; 4]) {
        debug_assert!(!self.needs_flush(native_id));
        let slot = match self.resolve_slot(native_id) {
            Some(slot) => slot,
            None => {
                self.slots[self.slot_count] = native_id;
                self.slot_count += 1;
                (self.slot_count - 1) as u32
            }
        };
        for (corner, uv) in QUAD_CORNERS {
            let position: [f32; 4] =
                (transform * Vector4::new(corner[0], corner[1], 0.0, 1.0)).into();
            self.vertices.push(QuadVertex {
                position,
                color,
                tex_coords: uv,
                tex_index: slot,
            });
        }
        self.quad_count += 1;
    }

    /// Drop all buffered vertices and slots. Called after every flush.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.slots = [0; MAX_TEXTURE_SLOTS];
        self.slot_count = 0;
        self.quad_count = 0;
    }
}

impl Default for QuadBatch {
    fn default() -> Self {
        Self::new()
    }
}
