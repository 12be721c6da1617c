//! The pasture: a wandering cow, a score readout, and a dust-puff pool.
//!
//! Declares the `Manual` back policy — the back signal pushes the pause
//! overlay instead of leaving the game outright.

use std::sync::Arc;

use drover_core::geometry::Rect;
use drover_core::input::{
    AccelerometerFilter, Button, InputDirection, InputManager, Key,
};
use drover_framework::{
    BackButtonPolicy, DisplayContent, FrameContext, GlyphStrip, HudDisplay, ObjectPool, Outline,
    Screen, ScreenCommand, ScreenCore,
};
use drover_platform::content::ContentCatalog;
use drover_render::{Camera2D, Color, DrawParams, Renderer, Texture};
use glam::Vec2;

use super::{GAME, MENU, PAUSE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::assets::DIGITS_CHARSET;
use crate::cow::Cow;

const ACTION_STARTLE: &str = "game.startle";
const ACTION_GRAZE: &str = "game.graze";
const ACTION_MOO: &str = "game.moo";
const ACTION_HERD_LEFT: &str = "game.herd_left";
const ACTION_HERD_RIGHT: &str = "game.herd_right";
const ACTION_QUIT: &str = "game.quit";

const PASTURE: Rect = Rect::new(0, 0, 1600, 960);
const TILT_THRESHOLD: f32 = 0.25;
const PUFF_SECONDS: f32 = 0.8;
const PUFF_POOL_SIZE: usize = 8;
const PUFFS_PER_STARTLE: usize = 3;

struct Puff {
    position: Vec2,
    ttl: f32,
}

struct GameWorld {
    cow: Cow,
    camera: Camera2D,
    pasture_texture: Texture,
    puff_texture: Texture,
    puffs: ObjectPool<Puff>,
    score_display: HudDisplay,
    theme_started: bool,
}

pub struct GameScreen {
    core: ScreenCore,
    world: Option<GameWorld>,
}

impl GameScreen {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self {
            core: ScreenCore::new(GAME, BackButtonPolicy::Manual, catalog),
            world: None,
        }
    }
}

impl Screen for GameScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn load_content(&mut self) -> Result<(), String> {
        let scope = &mut self.core.content;
        let cow = Cow::new(scope, Vec2::new(400.0, 300.0))?;
        let pasture_texture = scope.load_texture("pasture")?;
        let puff_texture = scope.load_texture("dust_puff")?;

        let digits = GlyphStrip::new(scope.load_texture("digits")?, 16, 24, DIGITS_CHARSET);
        let mut score_display =
            HudDisplay::new(digits, DisplayContent::Number(0), Vec2::new(16.0, 16.0));
        score_display.set_outline(Some(Outline {
            color: Color::BLACK,
            offset: 1.0,
        }));

        self.world = Some(GameWorld {
            cow,
            camera: Camera2D::new(SCREEN_WIDTH, SCREEN_HEIGHT, PASTURE),
            pasture_texture,
            puff_texture,
            puffs: ObjectPool::new(PUFF_POOL_SIZE, false, |p: &Puff| p.ttl > 0.0, || Puff {
                position: Vec2::ZERO,
                ttl: 0.0,
            }),
            score_display,
            theme_started: false,
        });
        Ok(())
    }

    fn setup_inputs(&mut self, input: &mut InputManager) {
        input.bind_key(ACTION_STARTLE, Key::Space, true);
        input.bind_button(ACTION_STARTLE, Button::A, true);
        input.bind_touch_area(
            ACTION_STARTLE,
            Rect::new(0, 0, SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32),
            true,
        );

        input.bind_key(ACTION_GRAZE, Key::S, true);
        input.bind_key(ACTION_MOO, Key::M, true);

        input.bind_tilt(
            ACTION_HERD_LEFT,
            InputDirection::Left,
            TILT_THRESHOLD,
            AccelerometerFilter::LowPass,
        );
        input.bind_swipe(ACTION_HERD_LEFT, InputDirection::Left, 60.0);
        input.bind_tilt(
            ACTION_HERD_RIGHT,
            InputDirection::Right,
            TILT_THRESHOLD,
            AccelerometerFilter::LowPass,
        );
        input.bind_swipe(ACTION_HERD_RIGHT, InputDirection::Right, 60.0);

        input.bind_key(ACTION_QUIT, Key::Enter, true);
    }

    fn handle_inputs(&mut self, input: &InputManager, ctx: &mut FrameContext) -> ScreenCommand {
        let Some(world) = &mut self.world else {
            return ScreenCommand::Stay;
        };

        if input.is_pressed(ACTION_QUIT) {
            return ScreenCommand::ChangeTo(MENU.to_string());
        }

        if input.is_pressed(ACTION_STARTLE) {
            world.cow.startle();
            ctx.audio.play_effect("stomp");
            let center = world.cow.center();
            for index in 0..PUFFS_PER_STARTLE {
                match world.puffs.acquire() {
                    Some(puff) => {
                        puff.position =
                            center + Vec2::new((index as f32 - 1.0) * 20.0, 24.0);
                        puff.ttl = PUFF_SECONDS;
                    }
                    // Pool exhausted: skip the extra puff this frame.
                    None => log::debug!("dust puff pool exhausted"),
                }
            }
        }
        if input.is_pressed(ACTION_GRAZE) {
            world.cow.graze();
        }
        if input.is_pressed(ACTION_MOO) {
            world.cow.moo();
            ctx.audio.play_effect("moo");
        }

        if input.is_pressed(ACTION_HERD_LEFT) {
            world.cow.head_toward(Vec2::new(-1.0, 0.0));
        } else if input.is_pressed(ACTION_HERD_RIGHT) {
            world.cow.head_toward(Vec2::new(1.0, 0.0));
        }
        ScreenCommand::Stay
    }

    fn update_screen(&mut self, ctx: &mut FrameContext) -> ScreenCommand {
        let Some(world) = &mut self.world else {
            return ScreenCommand::Stay;
        };
        if !world.theme_started {
            ctx.audio.play_song("pasture_theme");
            world.theme_started = true;
        }

        world.cow.update(ctx.dt, PASTURE);
        world.camera.look_at(world.cow.center());

        for puff in world.puffs.iter_live_mut() {
            puff.ttl -= ctx.dt;
        }
        world.puffs.update();

        world
            .score_display
            .set_number(world.cow.grazes_completed() as i64);
        ScreenCommand::Stay
    }

    fn draw_screen(&self, renderer: &mut dyn Renderer) {
        let Some(world) = &self.world else {
            return;
        };

        // Background fills the whole pasture; one quad scaled up from the
        // 800x480 source art.
        renderer.draw(
            &world.pasture_texture,
            Rect::new(0, 0, SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32),
            &DrawParams {
                position: world.camera.world_to_screen(Vec2::ZERO),
                scale: Vec2::new(2.0, 2.0),
                layer_depth: 1.0,
                ..Default::default()
            },
        );

        world.cow.draw(renderer, &world.camera);

        for puff in world.puffs.iter_live() {
            let fade = (puff.ttl / PUFF_SECONDS).clamp(0.0, 1.0);
            renderer.draw(
                &world.puff_texture,
                Rect::new(0, 0, 32, 32),
                &DrawParams {
                    position: world.camera.world_to_screen(puff.position),
                    origin: Vec2::new(16.0, 16.0),
                    tint: Color::WHITE.with_alpha(fade),
                    ..Default::default()
                },
            );
        }

        world.score_display.draw(renderer);
    }

    fn on_back_button(&mut self) -> ScreenCommand {
        ScreenCommand::Push(PAUSE.to_string())
    }
}
