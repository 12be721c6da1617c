//! Demo screen set and the names they register under.

pub mod game;
pub mod menu;
pub mod pause;
pub mod settings;
pub mod splash;

use drover_framework::GlyphStrip;
use drover_platform::content::ContentScope;

use crate::assets::CAPS_CHARSET;

pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 480;

pub const SPLASH: &str = "splash";
pub const MENU: &str = "menu";
pub const SETTINGS: &str = "settings";
pub const GAME: &str = "game";
pub const PAUSE: &str = "pause";

/// Shared capital-letter glyph strip, loaded into the calling screen's scope.
pub fn caps_strip(scope: &mut ContentScope) -> Result<GlyphStrip, String> {
    let texture = scope.load_texture("font_caps")?;
    Ok(GlyphStrip::new(texture, 16, 24, CAPS_CHARSET))
}
