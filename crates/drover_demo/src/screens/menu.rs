//! Main menu. Root of the screen stack: its `Close` back policy means
//! backing out of the menu ends the session.

use std::sync::Arc;

use drover_core::geometry::Rect;
use drover_core::input::{Button, InputManager, Key};
use drover_framework::{
    BackButtonPolicy, DisplayContent, FrameContext, HudDisplay, Screen, ScreenCommand, ScreenCore,
};
use drover_platform::content::ContentCatalog;
use drover_render::Renderer;
use glam::Vec2;

use super::{GAME, MENU, SETTINGS};

const ACTION_PLAY: &str = "menu.play";
const ACTION_SETTINGS: &str = "menu.settings";

const PLAY_AREA: Rect = Rect::new(300, 220, 200, 40);
const SETTINGS_AREA: Rect = Rect::new(300, 280, 200, 40);

pub struct MenuScreen {
    core: ScreenCore,
    labels: Vec<HudDisplay>,
    theme_started: bool,
}

impl MenuScreen {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self {
            core: ScreenCore::new(MENU, BackButtonPolicy::Close, catalog),
            labels: Vec::new(),
            theme_started: false,
        }
    }

    fn label(&mut self, text: &str, y: f32) -> Result<(), String> {
        let glyphs = super::caps_strip(&mut self.core.content)?;
        let mut display =
            HudDisplay::new(glyphs, DisplayContent::Text(text.to_string()), Vec2::ZERO);
        display.set_position(Vec2::new((800.0 - display.width()) / 2.0, y));
        self.labels.push(display);
        Ok(())
    }
}

impl Screen for MenuScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn load_content(&mut self) -> Result<(), String> {
        self.label("DROVER DEMO", 120.0)?;
        self.label("PLAY", PLAY_AREA.y as f32 + 8.0)?;
        self.label("SETTINGS", SETTINGS_AREA.y as f32 + 8.0)?;
        Ok(())
    }

    fn setup_inputs(&mut self, input: &mut InputManager) {
        input.bind_key(ACTION_PLAY, Key::Enter, true);
        input.bind_button(ACTION_PLAY, Button::Start, true);
        input.bind_touch_area(ACTION_PLAY, PLAY_AREA, true);

        input.bind_key(ACTION_SETTINGS, Key::S, true);
        input.bind_touch_area(ACTION_SETTINGS, SETTINGS_AREA, true);
    }

    fn handle_inputs(&mut self, input: &InputManager, ctx: &mut FrameContext) -> ScreenCommand {
        if input.is_pressed(ACTION_PLAY) {
            ctx.audio.play_effect("click");
            return ScreenCommand::ChangeTo(GAME.to_string());
        }
        if input.is_pressed(ACTION_SETTINGS) {
            ctx.audio.play_effect("click");
            return ScreenCommand::ChangeTo(SETTINGS.to_string());
        }
        ScreenCommand::Stay
    }

    fn update_screen(&mut self, ctx: &mut FrameContext) -> ScreenCommand {
        if !self.theme_started {
            ctx.audio.play_song("menu_theme");
            self.theme_started = true;
        }
        ScreenCommand::Stay
    }

    fn draw_screen(&self, renderer: &mut dyn Renderer) {
        for label in &self.labels {
            label.draw(renderer);
        }
    }
}
