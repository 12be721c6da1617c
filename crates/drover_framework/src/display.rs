//! HUD text and number rendering over a monospaced glyph strip.
//!
//! Content is a tagged variant — text or number — flowing through one shared
//! layout routine: each character maps to a frame of a single-row glyph
//! sheet by its position in the strip's charset, and every glyph advances
//! the pen by one cell. Characters missing from the charset leave a gap.
//! An optional outline draws the same glyphs four times on the diagonals
//! beneath the main pass. This is quad plumbing, not text shaping.

use drover_core::geometry::Rect;
use drover_render::{Color, DrawParams, Renderer, Texture};
use glam::Vec2;

/// Single-row glyph sheet plus the charset that indexes it.
pub struct GlyphStrip {
    texture: Texture,
    glyph_width: u32,
    glyph_height: u32,
    charset: String,
}

impl GlyphStrip {
    pub fn new(texture: Texture, glyph_width: u32, glyph_height: u32, charset: &str) -> Self {
        assert!(glyph_width > 0, "glyph strip has zero glyph width");
        let capacity = (texture.width() / glyph_width) as usize;
        if charset.chars().count() > capacity {
            log::warn!(
                "Glyph charset has {} characters but '{}' only fits {}",
                charset.chars().count(),
                texture.name(),
                capacity
            );
        }
        Self {
            texture,
            glyph_width,
            glyph_height,
            charset: charset.to_string(),
        }
    }

    pub fn glyph_width(&self) -> u32 {
        self.glyph_width
    }

    pub fn glyph_height(&self) -> u32 {
        self.glyph_height
    }

    /// Source rectangle for a character, or None when the charset does not
    /// contain it.
    pub fn source_rect(&self, ch: char) -> Option<Rect> {
        let index = self.charset.chars().position(|c| c == ch)?;
        Some(Rect::new(
            (index as u32 * self.glyph_width) as i32,
            0,
            self.glyph_width as i32,
            self.glyph_height as i32,
        ))
    }
}

/// What a HUD display shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayContent {
    Text(String),
    Number(i64),
}

impl DisplayContent {
    fn to_text(&self) -> String {
        match self {
            DisplayContent::Text(text) => text.clone(),
            DisplayContent::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Color,
    pub offset: f32,
}

/// A positioned text-or-number readout drawn in screen space.
pub struct HudDisplay {
    glyphs: GlyphStrip,
    content: DisplayContent,
    position: Vec2,
    tint: Color,
    outline: Option<Outline>,
    layer_depth: f32,
    visible: bool,
}

impl HudDisplay {
    pub fn new(glyphs: GlyphStrip, content: DisplayContent, position: Vec2) -> Self {
        Self {
            glyphs,
            content,
            position,
            tint: Color::WHITE,
            outline: None,
            layer_depth: 0.0,
            visible: true,
        }
    }

    pub fn set_content(&mut self, content: DisplayContent) {
        self.content = content;
    }

    pub fn set_number(&mut self, number: i64) {
        self.content = DisplayContent::Number(number);
    }

    pub fn set_text(&mut self, text: &str) {
        self.content = DisplayContent::Text(text.to_string());
    }

    pub fn text(&self) -> String {
        self.content.to_text()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    pub fn set_outline(&mut self, outline: Option<Outline>) {
        self.outline = outline;
    }

    pub fn set_layer_depth(&mut self, layer_depth: f32) {
        self.layer_depth = layer_depth;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Pixel width of the rendered content.
    pub fn width(&self) -> f32 {
        self.text().chars().count() as f32 * self.glyphs.glyph_width() as f32
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.visible {
            return;
        }
        if let Some(outline) = self.outline {
            for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
                let offset = Vec2::new(dx, dy) * outline.offset;
                self.draw_pass(renderer, offset, outline.color);
            }
        }
        self.draw_pass(renderer, Vec2::ZERO, self.tint);
    }

    fn draw_pass(&self, renderer: &mut dyn Renderer, offset: Vec2, tint: Color) {
        let advance = self.glyphs.glyph_width() as f32;
        for (index, ch) in self.text().chars().enumerate() {
            let Some(source) = self.glyphs.source_rect(ch) else {
                continue;
            };
            let params = DrawParams {
                position: self.position + offset + Vec2::new(index as f32 * advance, 0.0),
                tint,
                layer_depth: self.layer_depth,
                ..Default::default()
            };
            renderer.draw(&self.glyphs.texture, source, &params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drover_render::RecordingRenderer;

    const DIGITS: &str = "0123456789";

    fn digit_strip() -> GlyphStrip {
        GlyphStrip::new(Texture::new("digits", 160, 24), 16, 24, DIGITS)
    }

    #[test]
    fn source_rect_indexes_into_charset() {
        let strip = digit_strip();
        assert_eq!(strip.source_rect('0'), Some(Rect::new(0, 0, 16, 24)));
        assert_eq!(strip.source_rect('7'), Some(Rect::new(112, 0, 16, 24)));
        assert_eq!(strip.source_rect('x'), None);
    }

    #[test]
    fn number_renders_one_glyph_per_digit() {
        let display = HudDisplay::new(
            digit_strip(),
            DisplayContent::Number(420),
            Vec2::new(10.0, 10.0),
        );

        let mut renderer = RecordingRenderer::new();
        renderer.begin();
        display.draw(&mut renderer);
        renderer.end();

        let commands = renderer.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].source, Rect::new(64, 0, 16, 24));
        assert_eq!(commands[0].params.position, Vec2::new(10.0, 10.0));
        assert_eq!(commands[1].params.position, Vec2::new(26.0, 10.0));
        assert_eq!(commands[2].params.position, Vec2::new(42.0, 10.0));
    }

    #[test]
    fn unknown_characters_leave_a_gap() {
        let display = HudDisplay::new(
            digit_strip(),
            DisplayContent::Text("1x2".to_string()),
            Vec2::ZERO,
        );

        let mut renderer = RecordingRenderer::new();
        renderer.begin();
        display.draw(&mut renderer);
        renderer.end();

        let commands = renderer.commands();
        assert_eq!(commands.len(), 2);
        // The '2' still lands in the third cell.
        assert_eq!(commands[1].params.position, Vec2::new(32.0, 0.0));
    }

    #[test]
    fn outline_draws_four_passes_beneath_the_main_one() {
        let mut display = HudDisplay::new(
            digit_strip(),
            DisplayContent::Number(5),
            Vec2::new(50.0, 50.0),
        );
        display.set_outline(Some(Outline {
            color: Color::BLACK,
            offset: 2.0,
        }));

        let mut renderer = RecordingRenderer::new();
        renderer.begin();
        display.draw(&mut renderer);
        renderer.end();

        let commands = renderer.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0].params.tint, Color::BLACK);
        assert_eq!(commands[0].params.position, Vec2::new(48.0, 48.0));
        assert_eq!(commands[4].params.tint, Color::WHITE);
        assert_eq!(commands[4].params.position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn hidden_display_draws_nothing() {
        let mut display = HudDisplay::new(digit_strip(), DisplayContent::Number(1), Vec2::ZERO);
        display.set_visible(false);

        let mut renderer = RecordingRenderer::new();
        renderer.begin();
        display.draw(&mut renderer);
        renderer.end();
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn width_counts_cells_including_gaps() {
        let display = HudDisplay::new(
            digit_strip(),
            DisplayContent::Text("12x4".to_string()),
            Vec2::ZERO,
        );
        assert_eq!(display.width(), 64.0);
    }
}
