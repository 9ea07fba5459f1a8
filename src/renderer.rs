//! The user-facing 2D renderer: texture loading and batched quad drawing.
//!
//! [`Renderer2D`] owns a [`QuadBatch`] and a boxed [`RenderBackend`]. All
//! drawing goes through the batch; the backend is only touched by `clear`,
//! texture creation, and `flush`. Constructing the renderer over a fake
//! backend makes the whole drawing path testable without a GPU.

use cgmath::{InnerSpace, Matrix4, Rad, Vector2, Vector3};
use std::path::Path;

use crate::backend::RenderBackend;
use crate::batch::QuadBatch;

/// Opaque handle to a GPU-resident texture.
///
/// A zeroed handle (`native_id == 0`) is the "no texture" failure sentinel
/// returned by [`Renderer2D::load_texture`] on decode errors; check
/// [`is_none`](Self::is_none) before relying on a load.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureHandle {
    pub width: u32,
    pub height: u32,
    pub native_id: u32,
}

impl TextureHandle {
    pub const NONE: Self = Self {
        width: 0,
        height: 0,
        native_id: 0,
    };

    pub fn is_none(&self) -> bool {
        self.native_id == 0
    }
}

pub struct Renderer2D {
    backend: Box<dyn RenderBackend>,
    batch: QuadBatch,
    white: TextureHandle,
}

impl Renderer2D {
    /// Wrap a backend and reserve the 1x1 opaque-white texture that backs
    /// untextured drawing.
    pub fn new(mut backend: Box<dyn RenderBackend>) -> Self {
        let native_id = backend.create_texture(1, 1, &[0xff, 0xff, 0xff, 0xff]);
        Self {
            backend,
            batch: QuadBatch::new(),
            white: TextureHandle {
                width: 1,
                height: 1,
                native_id,
            },
        }
    }

    /// The reserved white texture. Drawing it color-modulated is how
    /// [`draw_rect`](Self::draw_rect) shares the textured batching path.
    pub fn white_texture(&self) -> TextureHandle {
        self.white
    }

    /// Decode an image file and upload it as an RGBA8 texture.
    ///
    /// There is no caching; loading the same path twice uploads twice. On
    /// failure this logs a warning and returns [`TextureHandle::NONE`].
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> TextureHandle {
        let path = path.as_ref();
        let img = match image::open(path) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("could not load texture {}: {}", path.display(), e);
                return TextureHandle::NONE;
            }
        };
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let native_id = self.backend.create_texture(width, height, &rgba);
        TextureHandle {
            width,
            height,
            native_id,
        }
    }

    /// Clear the color buffer. Buffered quads are unaffected.
    pub fn clear(&mut self, color: [f32; 4]) {
        self.backend.clear(color);
    }

    /// Draw an untextured rectangle centered at `position`.
    pub fn draw_rect(&mut self, position: Vector2<f32>, size: Vector2<f32>, color: [f32; 4]) {
        let white = self.white;
        self.draw_texture(white, position, size, color);
    }

    /// Draw a textured quad centered at `position`, color-modulated.
    ///
    /// Flushes first when the quad buffer is full or the texture would be the
    /// ninth distinct one in the batch; otherwise this only appends six
    /// vertices.
    pub fn draw_texture(
        &mut self,
        texture: TextureHandle,
        position: Vector2<f32>,
        size: Vector2<f32>,
        color: [f32; 4],
    ) {
        if texture.is_none() {
            log::warn!("attempted to draw with a zero texture handle");
            return;
        }
        if self.batch.needs_flush(texture.native_id) {
            self.flush();
        }
        let transform = Matrix4::from_translation(Vector3::new(position.x, position.y, 0.0))
            * Matrix4::from_nonuniform_scale(size.x, size.y, 1.0);
        self.batch.push(texture.native_id, transform, color);
    }

    /// Draw a line segment as a rotated quad of the given thickness.
    pub fn draw_line(
        &mut self,
        from: Vector2<f32>,
        to: Vector2<f32>,
        thickness: f32,
        color: [f32; 4],
    ) {
        let white = self.white;
        if self.batch.needs_flush(white.native_id) {
            self.flush();
        }
        let delta = to - from;
        let mid = from + delta * 0.5;
        let transform = Matrix4::from_translation(Vector3::new(mid.x, mid.y, 0.0))
            * Matrix4::from_angle_z(Rad(delta.y.atan2(delta.x)))
            * Matrix4::from_nonuniform_scale(delta.magnitude(), thickness, 1.0);
        self.batch.push(white.native_id, transform, color);
    }

    /// Outline a rectangle centered at `position` with four line quads.
    pub fn draw_rect_lines(
        &mut self,
        position: Vector2<f32>,
        size: Vector2<f32>,
        thickness: f32,
        color: [f32; 4],
    ) {
        let half = size * 0.5;
        let tl = Vector2::new(position.x - half.x, position.y - half.y);
        let tr = Vector2::new(position.x + half.x, position.y - half.y);
        let br = Vector2::new(position.x + half.x, position.y + half.y);
        let bl = Vector2::new(position.x - half.x, position.y + half.y);

        self.draw_line(tl, tr, thickness, color);
        self.draw_line(tr, br, thickness, color);
        self.draw_line(br, bl, thickness, color);
        self.draw_line(bl, tl, thickness, color);
    }

    /// Submit the batch: bind each active slot to its texture unit, upload
    /// the vertex buffer, issue one draw call, and reset the batch state.
    /// The only point where draw work reaches the GPU.
    pub fn flush(&mut self) {
        if self.batch.quad_count() == 0 {
            return;
        }
        for (slot, &native_id) in self.batch.slots().iter().enumerate() {
            self.backend.bind_texture(slot as u32, native_id);
        }
        self.backend.submit(self.batch.vertices());
        self.batch.reset();
    }

    /// Present the frame. Driven by the event loop after the frame's flush.
    pub fn present(&mut self) {
        self.backend.present();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
    }

    /// Quads buffered since the last flush.
    pub fn quad_count(&self) -> usize {
        self.batch.quad_count()
    }

    /// Distinct textures in the current batch's slot table.
    pub fn slot_count(&self) -> usize {
        self.batch.slot_count()
    }
}
