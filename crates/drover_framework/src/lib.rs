pub mod audio;
pub mod display;
pub mod manager;
pub mod pool;
pub mod screen;
pub mod sprite;

pub use audio::AudioManager;
pub use display::{DisplayContent, GlyphStrip, HudDisplay, Outline};
pub use manager::{ScreenManager, ACTION_BACK};
pub use pool::ObjectPool;
pub use screen::{BackButtonPolicy, FrameContext, Screen, ScreenCommand, ScreenCore};
pub use sprite::Sprite;
