//! Window setup and the application event loop.
//!
//! [`run`] owns the winit event loop and drives a user-provided [`Sketch`]:
//! it creates the window and GPU context, mirrors input events into the
//! polled [`Input`] table, and per frame calls the sketch's hook, flushes the
//! renderer, presents, and resets the edge-triggered input flags.
//!
//! Startup failures (event loop, window, adapter/device, surface) are fatal:
//! they are logged and the process terminates.

use std::path::PathBuf;
use std::sync::Arc;

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::Window,
};

use crate::{
    backend::WgpuBackend,
    context::Context,
    input::{Input, Key, MouseButton},
    renderer::Renderer2D,
};

/// The only external-facing configuration: window title and dimensions, plus
/// the path the quad shader is read from at init.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub shader_path: PathBuf,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "ember2d".into(),
            shader_path: PathBuf::from("assets/quad.wgsl"),
        }
    }
}

/// A drawable application. Implement this and hand it to [`run`].
///
/// `on_frame` is called once per frame after event polling; issue `clear` and
/// draw calls on the renderer there. The event loop flushes and presents
/// afterwards, so an explicit flush is only needed to force a draw boundary.
pub trait Sketch {
    /// Called once, after the window and GPU context exist. Load textures
    /// here.
    fn on_init(&mut self, _gfx: &mut Renderer2D) {}

    fn on_frame(&mut self, gfx: &mut Renderer2D, input: &Input);
}

struct App<S: Sketch> {
    async_runtime: tokio::runtime::Runtime,
    config: WindowConfig,
    sketch: S,
    window: Option<Arc<Window>>,
    gfx: Option<Renderer2D>,
    input: Input,
    last_time: Instant,
    first_frame: bool,
}

impl<S: Sketch> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("window creation failed: {e}");
                panic!("App initialization failed. Cannot create a window: {e}");
            }
        };

        let ctx = match self.async_runtime.block_on(Context::new(window.clone())) {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("graphics context creation failed: {e}");
                panic!("App initialization failed. Cannot create the main context: {e}");
            }
        };
        let backend = self
            .async_runtime
            .block_on(WgpuBackend::new(ctx, &self.config.shader_path));

        let mut gfx = Renderer2D::new(Box::new(backend));
        self.sketch.on_init(&mut gfx);
        self.gfx = Some(gfx);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(gfx) = &mut self.gfx else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => gfx.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                // Repeats come through as presses; the input table computes
                // the edge flags from its own previous state.
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = Key::from_key_code(code) {
                        self.input.key_event(key, event.state.is_pressed());
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(button) {
                    self.input.mouse_event(button, state.is_pressed());
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::RedrawRequested => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }

                let dt = if self.first_frame {
                    self.first_frame = false;
                    Duration::ZERO
                } else {
                    self.last_time.elapsed()
                };
                self.last_time = Instant::now();
                self.input.set_frame_time(dt);

                self.sketch.on_frame(gfx, &self.input);
                gfx.flush();
                gfx.present();
                self.input.end_frame();
            }
            _ => {}
        }
    }
}

/// Open a window and run the sketch until the window is closed.
pub fn run<S: Sketch>(config: WindowConfig, sketch: S) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App {
        async_runtime: tokio::runtime::Runtime::new()?,
        config,
        sketch,
        window: None,
        gfx: None,
        input: Input::new(),
        last_time: Instant::now(),
        first_frame: true,
    };
    event_loop.run_app(&mut app)?;

    Ok(())
}
