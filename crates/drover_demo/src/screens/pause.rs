//! Pause overlay. Pushed on top of the game, which stays resident and keeps
//! drawing underneath; its `Close` policy means the back signal pops the
//! overlay and resumes play.

use std::sync::Arc;

use drover_core::geometry::Rect;
use drover_core::input::{Button, InputManager, Key};
use drover_framework::{
    BackButtonPolicy, DisplayContent, FrameContext, HudDisplay, Screen, ScreenCommand, ScreenCore,
};
use drover_platform::content::ContentCatalog;
use drover_render::Renderer;
use glam::Vec2;

use super::{PAUSE, SCREEN_HEIGHT, SCREEN_WIDTH};

const ACTION_RESUME: &str = "pause.resume";

pub struct PauseScreen {
    core: ScreenCore,
    label: Option<HudDisplay>,
}

impl PauseScreen {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self {
            core: ScreenCore::new(PAUSE, BackButtonPolicy::Close, catalog),
            label: None,
        }
    }
}

impl Screen for PauseScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn load_content(&mut self) -> Result<(), String> {
        let glyphs = super::caps_strip(&mut self.core.content)?;
        let mut label = HudDisplay::new(
            glyphs,
            DisplayContent::Text("PAUSED".to_string()),
            Vec2::ZERO,
        );
        label.set_position(Vec2::new(
            (SCREEN_WIDTH as f32 - label.width()) / 2.0,
            SCREEN_HEIGHT as f32 / 2.0 - 12.0,
        ));
        self.label = Some(label);
        Ok(())
    }

    fn setup_inputs(&mut self, input: &mut InputManager) {
        input.bind_key(ACTION_RESUME, Key::Enter, true);
        input.bind_button(ACTION_RESUME, Button::Start, true);
        input.bind_touch_area(
            ACTION_RESUME,
            Rect::new(0, 0, SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32),
            true,
        );
    }

    fn handle_inputs(&mut self, input: &InputManager, _ctx: &mut FrameContext) -> ScreenCommand {
        if input.is_pressed(ACTION_RESUME) {
            return ScreenCommand::Pop;
        }
        ScreenCommand::Stay
    }

    fn update_screen(&mut self, _ctx: &mut FrameContext) -> ScreenCommand {
        ScreenCommand::Stay
    }

    fn draw_screen(&self, renderer: &mut dyn Renderer) {
        if let Some(label) = &self.label {
            label.draw(renderer);
        }
    }
}
