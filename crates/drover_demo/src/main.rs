//! Drover demo — headless deterministic session over the screen framework.
//!
//! The session is driven end to end by a scripted input trace: splash, menu,
//! a spell of cow-herding gameplay with a pause overlay, a settings detour
//! through the back history, and finally backing out of the menu to exit.
//! Every frame runs at a fixed dt against the trace, so two runs of the same
//! build produce identical navigation, animation, and audio state — the
//! recording renderer stands in for a GPU-backed implementation of the same
//! `Renderer` contract.
//!
//! Pass a path to an input trace JSON to replay a different session:
//! `drover_demo my_trace.json`.

mod assets;
mod cow;
mod screens;

use std::path::Path;
use std::sync::Arc;

use drover_framework::{AudioManager, ScreenManager};
use drover_platform::audio_out::NullAudioOutput;
use drover_platform::content::parse_manifest;
use drover_platform::replay::{load_trace, parse_trace, ScriptedInputSource};
use drover_render::RecordingRenderer;

use screens::game::GameScreen;
use screens::menu::MenuScreen;
use screens::pause::PauseScreen;
use screens::settings::SettingsScreen;
use screens::splash::SplashScreen;

const FIXED_DT: f32 = 1.0 / 60.0;

/// Idle frames allowed past the end of the trace before the session is
/// declared stalled.
const TRAILING_IDLE_FRAMES: usize = 600;

fn main() {
    env_logger::init();

    let trace = match std::env::args().nth(1) {
        Some(path) => load_trace(Path::new(&path)),
        None => parse_trace(assets::DEMO_SESSION_TRACE),
    }
    .unwrap_or_else(|err| panic!("Failed to load input trace: {err}"));

    let catalog = Arc::new(
        parse_manifest(assets::CONTENT_MANIFEST)
            .unwrap_or_else(|err| panic!("Failed to load content manifest: {err}")),
    );

    let mut audio = AudioManager::new(Box::new(NullAudioOutput));
    audio.register_song("menu_theme");
    audio.register_song("pasture_theme");
    audio.register_effect("click");
    audio.register_effect("moo");
    audio.register_effect("stomp");

    let mut manager = ScreenManager::new(catalog, audio);
    manager.register_screen(screens::SPLASH, |catalog| {
        Box::new(SplashScreen::new(catalog))
    });
    manager.register_screen(screens::MENU, |catalog| Box::new(MenuScreen::new(catalog)));
    manager.register_screen(screens::SETTINGS, |catalog| {
        Box::new(SettingsScreen::new(catalog))
    });
    manager.register_screen(screens::GAME, |catalog| Box::new(GameScreen::new(catalog)));
    manager.register_screen(screens::PAUSE, |catalog| {
        Box::new(PauseScreen::new(catalog))
    });

    manager
        .start(screens::SPLASH)
        .unwrap_or_else(|err| panic!("Failed to start initial screen: {err}"));

    let mut source = ScriptedInputSource::from_trace(&trace);
    let mut renderer = RecordingRenderer::new();
    let mut frames: usize = 0;
    let mut draw_calls: usize = 0;

    log::info!("Session starting: {} trace frames", source.len());

    while !manager.exit_requested() {
        manager
            .update(FIXED_DT, &mut source)
            .unwrap_or_else(|err| panic!("Frame {frames} failed: {err}"));

        renderer.clear();
        manager.draw(&mut renderer);
        draw_calls += renderer.commands().len();
        frames += 1;

        if frames % 300 == 0 {
            log::info!(
                "frame {frames}: screen '{}', {} draw call(s), song {:?}",
                manager.active_screen_name().unwrap_or("<none>"),
                renderer.commands().len(),
                manager.audio().active_song()
            );
        }

        if source.finished() && frames > source.len() + TRAILING_IDLE_FRAMES {
            log::warn!("Input trace exhausted without reaching exit; stopping");
            break;
        }
    }

    log::info!(
        "Session ended after {frames} frames ({draw_calls} draw calls total), exit requested: {}",
        manager.exit_requested()
    );
}
