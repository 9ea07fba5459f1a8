//! ember2d
//!
//! A minimal batched 2D renderer over wgpu and winit: open a window, poll
//! input, load textures, and batch textured quads into draw calls. Draw
//! requests accumulate in a CPU vertex buffer with a bounded texture-slot
//! table and are flushed to the GPU as a single draw call when either fills
//! up or at the end of the frame.
//!
//! High-level modules
//! - `app`: window setup, the event loop, and the [`Sketch`] trait
//! - `backend`: the render backend capability trait and its wgpu impl
//! - `batch`: CPU-side quad batching (vertex buffer + texture slot table)
//! - `context`: GPU and window context owning device/queue/surface
//! - `input`: polled button-state tables mirrored from winit events
//! - `pipeline`: quad pipeline construction and shader loading
//! - `renderer`: the user-facing [`Renderer2D`] drawing API
//!

pub mod app;
pub mod backend;
pub mod batch;
pub mod context;
pub mod input;
pub mod pipeline;
pub mod renderer;

// Re-exports commonly used types for convenience in downstream code.
pub use app::{Sketch, WindowConfig, run};
pub use backend::RenderBackend;
pub use batch::{MAX_QUADS, MAX_TEXTURE_SLOTS, QuadVertex, VERTICES_PER_QUAD};
pub use input::{ButtonState, Input, Key, MouseButton};
pub use renderer::{Renderer2D, TextureHandle};

pub use cgmath::*;
