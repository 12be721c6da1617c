//! Volume settings. Declares the `GoBack` policy, so navigating here records
//! the previous screen in history and the back signal returns to it.

use std::sync::Arc;

use drover_core::input::{InputDirection, InputManager, Key};
use drover_framework::{
    BackButtonPolicy, DisplayContent, FrameContext, HudDisplay, Screen, ScreenCommand, ScreenCore,
};
use drover_platform::content::ContentCatalog;
use drover_render::Renderer;
use glam::Vec2;

use super::SETTINGS;
use crate::assets::DIGITS_CHARSET;

const ACTION_MUSIC_UP: &str = "settings.music_up";
const ACTION_MUSIC_DOWN: &str = "settings.music_down";
const ACTION_EFFECTS_UP: &str = "settings.effects_up";
const ACTION_EFFECTS_DOWN: &str = "settings.effects_down";

const VOLUME_STEP: f32 = 0.1;
const SWIPE_DISTANCE: f32 = 40.0;

pub struct SettingsScreen {
    core: ScreenCore,
    labels: Vec<HudDisplay>,
    music_value: Option<HudDisplay>,
    effects_value: Option<HudDisplay>,
}

impl SettingsScreen {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self {
            core: ScreenCore::new(SETTINGS, BackButtonPolicy::GoBack, catalog),
            labels: Vec::new(),
            music_value: None,
            effects_value: None,
        }
    }

    fn digit_display(&mut self, position: Vec2) -> Result<HudDisplay, String> {
        let texture = self.core.content.load_texture("digits")?;
        let glyphs = drover_framework::GlyphStrip::new(texture, 16, 24, DIGITS_CHARSET);
        Ok(HudDisplay::new(glyphs, DisplayContent::Number(100), position))
    }
}

impl Screen for SettingsScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn load_content(&mut self) -> Result<(), String> {
        for (text, y) in [("SETTINGS", 100.0), ("MUSIC", 200.0), ("EFFECTS", 260.0)] {
            let glyphs = super::caps_strip(&mut self.core.content)?;
            let mut display =
                HudDisplay::new(glyphs, DisplayContent::Text(text.to_string()), Vec2::ZERO);
            display.set_position(Vec2::new(240.0, y));
            self.labels.push(display);
        }
        self.music_value = Some(self.digit_display(Vec2::new(480.0, 200.0))?);
        self.effects_value = Some(self.digit_display(Vec2::new(480.0, 260.0))?);
        Ok(())
    }

    fn setup_inputs(&mut self, input: &mut InputManager) {
        input.bind_key(ACTION_MUSIC_UP, Key::Up, true);
        input.bind_swipe(ACTION_MUSIC_UP, InputDirection::Up, SWIPE_DISTANCE);
        input.bind_key(ACTION_MUSIC_DOWN, Key::Down, true);
        input.bind_swipe(ACTION_MUSIC_DOWN, InputDirection::Down, SWIPE_DISTANCE);
        input.bind_key(ACTION_EFFECTS_UP, Key::Right, true);
        input.bind_key(ACTION_EFFECTS_DOWN, Key::Left, true);
    }

    fn handle_inputs(&mut self, input: &InputManager, ctx: &mut FrameContext) -> ScreenCommand {
        let music = ctx.audio.song_volume();
        let effects = ctx.audio.effect_volume();

        if input.is_pressed(ACTION_MUSIC_UP) {
            ctx.audio.set_song_volume(music + VOLUME_STEP);
        } else if input.is_pressed(ACTION_MUSIC_DOWN) {
            ctx.audio.set_song_volume(music - VOLUME_STEP);
        }

        if input.is_pressed(ACTION_EFFECTS_UP) {
            ctx.audio.set_effect_volume(effects + VOLUME_STEP);
            ctx.audio.play_effect("click");
        } else if input.is_pressed(ACTION_EFFECTS_DOWN) {
            ctx.audio.set_effect_volume(effects - VOLUME_STEP);
            ctx.audio.play_effect("click");
        }
        ScreenCommand::Stay
    }

    fn update_screen(&mut self, ctx: &mut FrameContext) -> ScreenCommand {
        if let Some(display) = &mut self.music_value {
            display.set_number((ctx.audio.song_volume() * 100.0).round() as i64);
        }
        if let Some(display) = &mut self.effects_value {
            display.set_number((ctx.audio.effect_volume() * 100.0).round() as i64);
        }
        ScreenCommand::Stay
    }

    fn draw_screen(&self, renderer: &mut dyn Renderer) {
        for label in &self.labels {
            label.draw(renderer);
        }
        if let Some(display) = &self.music_value {
            display.draw(renderer);
        }
        if let Some(display) = &self.effects_value {
            display.draw(renderer);
        }
    }
}
