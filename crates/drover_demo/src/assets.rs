//! Embedded demo assets. The manifest and definition files ship inside the
//! binary so a headless session needs nothing on disk; a real deployment
//! would read the same files from an asset directory.

pub const CONTENT_MANIFEST: &str = include_str!("../assets/content_manifest.json");
pub const COW_STRIPS: &str = include_str!("../assets/strips/cow.json");
pub const DEMO_SESSION_TRACE: &str = include_str!("../assets/replays/demo_session.json");

/// Characters of the capital-letter glyph sheet, in frame order.
pub const CAPS_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 ";

/// Characters of the score digit sheet, in frame order.
pub const DIGITS_CHARSET: &str = "0123456789";
