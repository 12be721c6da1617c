//! The renderer collaborator contract and a recording implementation.
//!
//! The framework draws by handing the renderer a texture region and a
//! destination transform; it never owns a graphics device. Draw calls are
//! only legal between `begin()` and `end()` — each screen's draw pass is
//! framed by exactly one begin/end pair, and a draw outside a pass is a
//! wiring bug that panics.
//!
//! `RecordingRenderer` captures every command into a list. Tests assert on
//! draw order and pass framing with it, and the headless demo uses it as its
//! backend.

use drover_core::geometry::Rect;
use glam::Vec2;

use crate::color::Color;
use crate::texture::Texture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Destination transform and tint for one draw call. `position` is in screen
/// space; `origin` is the pivot inside the source region, in texels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub origin: Vec2,
    pub tint: Color,
    pub layer_depth: f32,
    pub flip: Flip,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            origin: Vec2::ZERO,
            tint: Color::WHITE,
            layer_depth: 0.0,
            flip: Flip::None,
        }
    }
}

pub trait Renderer {
    fn begin(&mut self);
    fn draw(&mut self, texture: &Texture, source: Rect, params: &DrawParams);
    fn end(&mut self);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub texture: String,
    pub source: Rect,
    pub params: DrawParams,
    /// Index of the begin/end pass this command was issued in.
    pub pass: u32,
}

#[derive(Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    passes_begun: u32,
    in_pass: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn passes_begun(&self) -> u32 {
        self.passes_begun
    }

    /// Drop recorded state, keeping the renderer usable for the next frame.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.passes_begun = 0;
    }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self) {
        assert!(!self.in_pass, "begin() called while a draw pass was open");
        self.in_pass = true;
        self.passes_begun += 1;
    }

    fn draw(&mut self, texture: &Texture, source: Rect, params: &DrawParams) {
        assert!(self.in_pass, "draw() called outside begin()/end()");
        self.commands.push(DrawCommand {
            texture: texture.name().to_string(),
            source,
            params: *params,
            pass: self.passes_begun - 1,
        });
    }

    fn end(&mut self) {
        assert!(self.in_pass, "end() called without a matching begin()");
        self.in_pass = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_texture() -> Texture {
        Texture::new("test", 64, 64)
    }

    #[test]
    fn records_commands_with_pass_index() {
        let mut renderer = RecordingRenderer::new();
        let texture = test_texture();

        renderer.begin();
        renderer.draw(&texture, Rect::new(0, 0, 16, 16), &DrawParams::default());
        renderer.end();

        renderer.begin();
        renderer.draw(&texture, Rect::new(16, 0, 16, 16), &DrawParams::default());
        renderer.end();

        assert_eq!(renderer.passes_begun(), 2);
        assert_eq!(renderer.commands().len(), 2);
        assert_eq!(renderer.commands()[0].pass, 0);
        assert_eq!(renderer.commands()[1].pass, 1);
    }

    #[test]
    #[should_panic(expected = "outside begin()/end()")]
    fn draw_outside_pass_panics() {
        let mut renderer = RecordingRenderer::new();
        renderer.draw(
            &test_texture(),
            Rect::new(0, 0, 8, 8),
            &DrawParams::default(),
        );
    }

    #[test]
    #[should_panic(expected = "while a draw pass was open")]
    fn nested_begin_panics() {
        let mut renderer = RecordingRenderer::new();
        renderer.begin();
        renderer.begin();
    }

    #[test]
    fn clear_resets_recording() {
        let mut renderer = RecordingRenderer::new();
        renderer.begin();
        renderer.draw(
            &test_texture(),
            Rect::new(0, 0, 8, 8),
            &DrawParams::default(),
        );
        renderer.end();

        renderer.clear();
        assert!(renderer.commands().is_empty());
        assert_eq!(renderer.passes_begun(), 0);
    }
}
