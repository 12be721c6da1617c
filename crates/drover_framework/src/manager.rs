//! Screen stack navigation: the overlap stack plus a separate back history.
//!
//! Two stacks with different jobs. The **overlap stack** holds every screen
//! currently resident (a pause menu overlapping the frozen game beneath it);
//! the **back history** records only the screens that "go back" should return
//! to. Whether history is recorded depends on the *incoming* screen's policy:
//! a screen declaring `GoBack` is the one that will later need somewhere to
//! return, so the screen it replaces is kept — loaded — in history. Any
//! other incoming policy severs the back chain entirely.
//!
//! Frame order is fixed: input snapshot, audio update, active-screen update,
//! command application, back-button dispatch, snapshot commit. Drawing walks
//! the whole stack bottom to top; update and input go only to the top.
//!
//! Popping an empty stack (or going back with empty history) is a wiring bug
//! in the calling code and panics.

use std::collections::HashMap;
use std::sync::Arc;

use drover_core::input::{Button, InputManager, InputSource, Key};
use drover_platform::content::ContentCatalog;
use drover_render::Renderer;

use crate::audio::AudioManager;
use crate::screen::{BackButtonPolicy, FrameContext, Screen, ScreenCommand};

/// Action the manager binds for the platform back signal.
pub const ACTION_BACK: &str = "back";

type ScreenFactory = Box<dyn Fn(Arc<dyn ContentCatalog>) -> Box<dyn Screen>>;

pub struct ScreenManager {
    catalog: Arc<dyn ContentCatalog>,
    input: InputManager,
    audio: AudioManager,
    factories: HashMap<String, ScreenFactory>,
    stack: Vec<Box<dyn Screen>>,
    history: Vec<Box<dyn Screen>>,
    exit_requested: bool,
}

impl ScreenManager {
    pub fn new(catalog: Arc<dyn ContentCatalog>, audio: AudioManager) -> Self {
        let mut input = InputManager::new();
        input.bind_button(ACTION_BACK, Button::Back, true);
        input.bind_key(ACTION_BACK, Key::Escape, true);

        Self {
            catalog,
            input,
            audio,
            factories: HashMap::new(),
            stack: Vec::new(),
            history: Vec::new(),
            exit_requested: false,
        }
    }

    /// Register a factory so screens can navigate to `name` by command.
    pub fn register_screen<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(Arc<dyn ContentCatalog>) -> Box<dyn Screen> + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Push the initial screen. Must be the first navigation call.
    pub fn start(&mut self, name: &str) -> Result<(), String> {
        assert!(
            self.stack.is_empty(),
            "start called with screens already on the stack"
        );
        let screen = self.build_screen(name);
        self.add_screen(screen)
    }

    /// Push an overlay on top of the current screen. History is untouched —
    /// overlays pop, they do not "go back".
    pub fn add_screen(&mut self, mut screen: Box<dyn Screen>) -> Result<(), String> {
        self.ensure_loaded(&mut screen)?;
        if let Some(top) = self.stack.last_mut() {
            let core = top.core_mut();
            core.active = false;
            core.accept_inputs = false;
        }
        log::info!("Screen '{}' pushed onto the stack", screen.core().name());
        self.stack.push(screen);
        self.activate_top();
        Ok(())
    }

    /// Replace the top of the stack with `incoming`.
    ///
    /// With `to_history` set and an incoming `GoBack` screen, the outgoing
    /// screen is parked — still loaded — in the back history. Any other
    /// incoming policy unloads the outgoing screen and clears the whole
    /// history. Back navigation passes `to_history = false` so backtracking
    /// never records new history.
    pub fn change_screen(
        &mut self,
        mut incoming: Box<dyn Screen>,
        to_history: bool,
    ) -> Result<(), String> {
        self.ensure_loaded(&mut incoming)?;

        let mut outgoing = self
            .stack
            .pop()
            .unwrap_or_else(|| panic!("change_screen called on an empty screen stack"));
        let core = outgoing.core_mut();
        core.active = false;
        core.accept_inputs = false;

        if to_history && incoming.core().policy() == BackButtonPolicy::GoBack {
            log::debug!(
                "Screen '{}' parked in back history",
                outgoing.core().name()
            );
            self.history.push(outgoing);
        } else {
            outgoing.unload_content();
            if to_history {
                // A non-GoBack destination severs the back chain.
                for mut parked in self.history.drain(..) {
                    parked.unload_content();
                }
            }
        }

        log::info!("Screen changed to '{}'", incoming.core().name());
        self.stack.push(incoming);
        self.activate_top();
        Ok(())
    }

    /// Build the screen registered under `name` and change to it.
    pub fn change_to(&mut self, name: &str) -> Result<(), String> {
        let screen = self.build_screen(name);
        self.change_screen(screen, true)
    }

    /// Return to the most recent history entry. Backtracking never creates
    /// new history.
    pub fn go_back(&mut self) -> Result<(), String> {
        let screen = self
            .history
            .pop()
            .unwrap_or_else(|| panic!("go_back called with an empty back history"));
        self.change_screen(screen, false)
    }

    /// Pop and unload the top screen. Closing the last screen ends the
    /// session; otherwise the revealed screen reactivates.
    pub fn close_screen(&mut self) {
        let mut closed = self
            .stack
            .pop()
            .unwrap_or_else(|| panic!("close_screen called on an empty screen stack"));
        closed.core_mut().active = false;
        closed.unload_content();
        log::info!("Screen '{}' closed", closed.core().name());

        if self.stack.is_empty() {
            log::info!("Screen stack is empty; exit requested");
            self.exit_requested = true;
        } else {
            self.activate_top();
        }
    }

    /// One simulation frame for the active screen.
    pub fn update(&mut self, dt: f32, source: &mut dyn InputSource) -> Result<(), String> {
        self.input.begin_update(source);
        self.audio.update(dt);

        let command = {
            let screen = self
                .stack
                .last_mut()
                .expect("update called on an empty screen stack");
            let mut ctx = FrameContext {
                dt,
                audio: &mut self.audio,
            };
            let input_command = if screen.core().accept_inputs {
                screen.handle_inputs(&self.input, &mut ctx)
            } else {
                ScreenCommand::Stay
            };
            let update_command = screen.update_screen(&mut ctx);
            input_command.or(update_command)
        };
        self.apply_command(command)?;
        self.handle_back_button()?;

        self.input.end_update();
        Ok(())
    }

    /// Draw the whole stack bottom to top, each visible screen in its own
    /// begin/end pass.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for screen in &self.stack {
            if !screen.core().visible {
                continue;
            }
            renderer.begin();
            screen.draw_screen(renderer);
            renderer.end();
        }
    }

    fn apply_command(&mut self, command: ScreenCommand) -> Result<(), String> {
        match command {
            ScreenCommand::Stay => Ok(()),
            ScreenCommand::Push(name) => {
                let screen = self.build_screen(&name);
                self.add_screen(screen)
            }
            ScreenCommand::ChangeTo(name) => {
                let screen = self.build_screen(&name);
                self.change_screen(screen, true)
            }
            ScreenCommand::Pop => {
                self.close_screen();
                Ok(())
            }
            ScreenCommand::Exit => {
                self.exit_requested = true;
                Ok(())
            }
        }
    }

    fn handle_back_button(&mut self) -> Result<(), String> {
        // A command this frame may already have emptied the stack and ended
        // the session; there is no screen left to dispatch to.
        if self.stack.is_empty() || !self.input.is_pressed(ACTION_BACK) {
            return Ok(());
        }
        let policy = self
            .stack
            .last()
            .expect("back button dispatch on an empty screen stack")
            .core()
            .policy();
        match policy {
            BackButtonPolicy::Close => self.close_screen(),
            BackButtonPolicy::GoBack => self.go_back()?,
            BackButtonPolicy::Manual => {
                let command = self
                    .stack
                    .last_mut()
                    .expect("back button dispatch on an empty screen stack")
                    .on_back_button();
                self.apply_command(command)?;
            }
        }
        Ok(())
    }

    fn build_screen(&self, name: &str) -> Box<dyn Screen> {
        let factory = self
            .factories
            .get(name)
            .unwrap_or_else(|| panic!("No screen factory registered for '{name}'"));
        factory(self.catalog.clone())
    }

    fn ensure_loaded(&mut self, screen: &mut Box<dyn Screen>) -> Result<(), String> {
        if screen.core().is_content_loaded() {
            return Ok(());
        }
        screen.load_content().map_err(|e| {
            format!(
                "Failed to load content for screen '{}': {e}",
                screen.core().name()
            )
        })?;
        screen.setup_inputs(&mut self.input);
        screen.core_mut().content_loaded = true;
        log::debug!("Content loaded for screen '{}'", screen.core().name());
        Ok(())
    }

    fn activate_top(&mut self) {
        let screen = self
            .stack
            .last_mut()
            .expect("activate called on an empty screen stack");
        let core = screen.core_mut();
        core.active = true;
        core.accept_inputs = true;
        core.visible = true;
        screen.on_activate();
        log::debug!("Screen '{}' activated", screen.core().name());
    }

    pub fn active_screen_name(&self) -> Option<&str> {
        self.stack.last().map(|s| s.core().name())
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }
}
