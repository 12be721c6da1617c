//! Title card: waits a few seconds, or a tap or key, then hands off to the
//! menu.

use std::sync::Arc;

use drover_core::geometry::Rect;
use drover_core::input::{Button, InputManager, Key};
use drover_core::time::Ticker;
use drover_framework::{
    BackButtonPolicy, DisplayContent, FrameContext, HudDisplay, Screen, ScreenCommand, ScreenCore,
};
use drover_platform::content::ContentCatalog;
use drover_render::Renderer;
use glam::Vec2;

use super::{MENU, SCREEN_HEIGHT, SCREEN_WIDTH, SPLASH};

const ACTION_SKIP: &str = "splash.skip";
const HOLD_SECONDS: f32 = 3.0;

pub struct SplashScreen {
    core: ScreenCore,
    hold_timer: Ticker,
    title: Option<HudDisplay>,
}

impl SplashScreen {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self {
            core: ScreenCore::new(SPLASH, BackButtonPolicy::Close, catalog),
            hold_timer: Ticker::new(HOLD_SECONDS),
            title: None,
        }
    }
}

impl Screen for SplashScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn load_content(&mut self) -> Result<(), String> {
        let glyphs = super::caps_strip(&mut self.core.content)?;
        let mut title = HudDisplay::new(
            glyphs,
            DisplayContent::Text("DROVER".to_string()),
            Vec2::ZERO,
        );
        title.set_position(Vec2::new(
            (SCREEN_WIDTH as f32 - title.width()) / 2.0,
            SCREEN_HEIGHT as f32 / 2.0 - 12.0,
        ));
        self.title = Some(title);
        Ok(())
    }

    fn setup_inputs(&mut self, input: &mut InputManager) {
        input.bind_key(ACTION_SKIP, Key::Space, true);
        input.bind_key(ACTION_SKIP, Key::Enter, true);
        input.bind_button(ACTION_SKIP, Button::A, true);
        input.bind_touch_area(
            ACTION_SKIP,
            Rect::new(0, 0, SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32),
            true,
        );
    }

    fn handle_inputs(&mut self, input: &InputManager, _ctx: &mut FrameContext) -> ScreenCommand {
        if input.is_pressed(ACTION_SKIP) {
            return ScreenCommand::ChangeTo(MENU.to_string());
        }
        ScreenCommand::Stay
    }

    fn update_screen(&mut self, ctx: &mut FrameContext) -> ScreenCommand {
        self.hold_timer.update(ctx.dt);
        if self.hold_timer.elapsed() {
            return ScreenCommand::ChangeTo(MENU.to_string());
        }
        ScreenCommand::Stay
    }

    fn draw_screen(&self, renderer: &mut dyn Renderer) {
        if let Some(title) = &self.title {
            title.draw(renderer);
        }
    }
}
