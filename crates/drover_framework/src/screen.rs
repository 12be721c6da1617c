//! The screen contract: one navigable unit of UI or gameplay state.
//!
//! Screens are built by composition: every screen embeds a `ScreenCore`
//! carrying the state the manager needs (back-button policy, content scope,
//! lifecycle flags) and implements the `Screen` trait hooks around it.
//!
//! Navigation is message passing. Screens never hold a reference back into
//! the manager; instead `handle_inputs` and `update_screen` return a
//! `ScreenCommand` that the manager interprets after the screen's frame work
//! is done.

use std::sync::Arc;

use drover_core::input::InputManager;
use drover_platform::content::{ContentCatalog, ContentScope};
use drover_render::Renderer;

use crate::audio::AudioManager;

/// What the platform back signal does while this screen is on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackButtonPolicy {
    /// Pop this screen; with nothing left underneath the application exits.
    Close,
    /// Return to the previous screen recorded in the back history.
    GoBack,
    /// Ask the screen itself via `on_back_button`.
    Manual,
}

/// Navigation intent returned from a screen's frame hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    Stay,
    /// Overlay a factory-built screen on top of this one.
    Push(String),
    /// Replace this screen with a factory-built screen.
    ChangeTo(String),
    /// Pop this screen off the stack.
    Pop,
    /// End the session.
    Exit,
}

impl ScreenCommand {
    /// First non-`Stay` of the two commands, favoring `self`.
    pub fn or(self, fallback: ScreenCommand) -> ScreenCommand {
        match self {
            ScreenCommand::Stay => fallback,
            other => other,
        }
    }
}

/// State every screen carries, embedded by composition.
pub struct ScreenCore {
    name: String,
    policy: BackButtonPolicy,
    /// This screen's private asset namespace. Never shared between screens.
    pub content: ContentScope,
    pub accept_inputs: bool,
    pub visible: bool,
    pub active: bool,
    pub(crate) content_loaded: bool,
}

impl ScreenCore {
    pub fn new(name: &str, policy: BackButtonPolicy, catalog: Arc<dyn ContentCatalog>) -> Self {
        Self {
            name: name.to_string(),
            policy,
            content: ContentScope::new(catalog),
            accept_inputs: false,
            visible: false,
            active: false,
            content_loaded: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> BackButtonPolicy {
        self.policy
    }

    pub fn is_content_loaded(&self) -> bool {
        self.content_loaded
    }
}

/// Per-frame services handed to the active screen.
pub struct FrameContext<'a> {
    pub dt: f32,
    pub audio: &'a mut AudioManager,
}

pub trait Screen {
    fn core(&self) -> &ScreenCore;
    fn core_mut(&mut self) -> &mut ScreenCore;

    /// Load this screen's assets into its own content scope. Called exactly
    /// once per instance, before the first activation.
    fn load_content(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Release this screen's assets. Called only on permanent removal, never
    /// on suspension or while parked in the back history.
    fn unload_content(&mut self) {
        self.core_mut().content.unload();
    }

    /// Register this screen's input actions. Called once, right after
    /// `load_content`.
    fn setup_inputs(&mut self, _input: &mut InputManager) {}

    /// Called every time this screen becomes the top of the stack: on its
    /// first push, when an overlay above it closes, and when back navigation
    /// returns to it.
    fn on_activate(&mut self) {}

    /// Input dispatch. Only runs while this screen is on top and accepting
    /// inputs.
    fn handle_inputs(&mut self, _input: &InputManager, _ctx: &mut FrameContext) -> ScreenCommand {
        ScreenCommand::Stay
    }

    /// Per-frame simulation. Only runs while this screen is on top.
    fn update_screen(&mut self, ctx: &mut FrameContext) -> ScreenCommand;

    /// Render. Unlike update, the whole stack draws every frame, bottom to
    /// top, so overlays can show through to the suspended screens beneath.
    fn draw_screen(&self, renderer: &mut dyn Renderer);

    /// Back-signal hook for `BackButtonPolicy::Manual` screens.
    fn on_back_button(&mut self) -> ScreenCommand {
        ScreenCommand::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_or_prefers_first_non_stay() {
        assert_eq!(
            ScreenCommand::Stay.or(ScreenCommand::Pop),
            ScreenCommand::Pop
        );
        assert_eq!(
            ScreenCommand::Exit.or(ScreenCommand::Pop),
            ScreenCommand::Exit
        );
        assert_eq!(
            ScreenCommand::Stay.or(ScreenCommand::Stay),
            ScreenCommand::Stay
        );
    }
}
