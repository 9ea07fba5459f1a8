//! Moves a rectangle with the arrow keys and paints trail quads with the
//! mouse. Run from the repository root so `assets/quad.wgsl` resolves.

use ember2d::{Input, Key, MouseButton, Renderer2D, Sketch, TextureHandle, WindowConfig, vec2};

struct Quads {
    player: ember2d::Vector2<f32>,
    trail: Vec<ember2d::Vector2<f32>>,
    logo: TextureHandle,
}

impl Sketch for Quads {
    fn on_init(&mut self, gfx: &mut Renderer2D) {
        // Missing file degrades to the zero handle; the draw path skips it.
        self.logo = gfx.load_texture("demos/quads/logo.png");
    }

    fn on_frame(&mut self, gfx: &mut Renderer2D, input: &Input) {
        let speed = 300.0 * input.frame_time().as_secs_f32();
        if input.key_down(Key::Left) {
            self.player.x -= speed;
        }
        if input.key_down(Key::Right) {
            self.player.x += speed;
        }
        if input.key_down(Key::Up) {
            self.player.y -= speed;
        }
        if input.key_down(Key::Down) {
            self.player.y += speed;
        }
        if input.mouse_down(MouseButton::Left) {
            self.trail.push(input.mouse_position());
        }
        if input.key_pressed(Key::C) {
            self.trail.clear();
        }

        gfx.clear([0.08, 0.08, 0.1, 1.0]);
        for (i, pos) in self.trail.iter().enumerate() {
            let t = i as f32 / 100.0;
            gfx.draw_rect(*pos, vec2(8.0, 8.0), [0.2 + t.fract(), 0.6, 0.9, 1.0]);
        }
        if !self.logo.is_none() {
            gfx.draw_texture(self.logo, vec2(400.0, 100.0), vec2(128.0, 128.0), [1.0; 4]);
        }
        gfx.draw_rect(self.player, vec2(40.0, 40.0), [0.9, 0.3, 0.2, 1.0]);
        gfx.draw_rect_lines(self.player, vec2(48.0, 48.0), 2.0, [1.0, 1.0, 1.0, 1.0]);
    }
}

fn main() -> anyhow::Result<()> {
    ember2d::run(
        WindowConfig {
            title: "ember2d quads".into(),
            ..Default::default()
        },
        Quads {
            player: vec2(400.0, 300.0),
            trail: Vec::new(),
            logo: TextureHandle::NONE,
        },
    )
}
