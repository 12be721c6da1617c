//! Sprite-sheet animation strips and the JSON strip-set format.
//!
//! A strip plays left-to-right across a **single-row** sheet: the source
//! rectangle of frame `i` is `(i * frame_width, 0, frame_width, frame_height)`.
//! The frame count is the floor of `texture_width / frame_width`; a sheet
//! whose width is not an exact multiple simply loses the partial last frame.
//!
//! Strips do not hold texture handles themselves — they carry only the frame
//! geometry, so the core stays independent of the renderer. The owning sprite
//! pairs each strip with the texture it was built from.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::geometry::Rect;
use crate::time::Ticker;

#[derive(Debug, Clone)]
pub struct AnimationStrip {
    name: String,
    frame_width: u32,
    frame_height: u32,
    frame_count: u32,
    frame_timer: Ticker,
    current_frame: u32,
    looping: bool,
    finished: bool,
    next_animation: Option<String>,
    active: bool,
}

impl AnimationStrip {
    /// Build a strip over a sheet of the given width.
    ///
    /// Panics if `frame_width` is zero or wider than the sheet — both are
    /// wiring bugs, not runtime conditions.
    pub fn new(
        name: &str,
        texture_width: u32,
        frame_width: u32,
        frame_height: u32,
        frame_seconds: f32,
    ) -> Self {
        assert!(
            frame_width > 0,
            "animation strip '{name}' has zero frame width"
        );
        let frame_count = texture_width / frame_width;
        assert!(
            frame_count > 0,
            "animation strip '{name}': sheet width {texture_width} is narrower than one frame ({frame_width})"
        );
        Self {
            name: name.to_string(),
            frame_width,
            frame_height,
            frame_count,
            frame_timer: Ticker::new(frame_seconds),
            current_frame: 0,
            looping: true,
            finished: false,
            next_animation: None,
            active: false,
        }
    }

    /// Start (or restart) playback from frame zero.
    pub fn play(&mut self) {
        self.current_frame = 0;
        self.finished = false;
        self.frame_timer.reset();
        self.active = true;
    }

    /// Advance playback. On each frame-timer elapse the index moves forward;
    /// past the end a looping strip wraps to zero while a non-looping strip
    /// clamps to the last frame and reports finished. The timer resets after
    /// every index change, wrapped or clamped.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.frame_timer.update(dt);
        if self.frame_timer.elapsed() {
            self.current_frame += 1;
            if self.current_frame >= self.frame_count {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = self.frame_count - 1;
                    self.finished = true;
                }
            }
            self.frame_timer.reset();
        }
    }

    /// Source rectangle of the current frame within the sheet.
    pub fn frame_rectangle(&self) -> Rect {
        Rect::new(
            (self.current_frame * self.frame_width) as i32,
            0,
            self.frame_width as i32,
            self.frame_height as i32,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn frame_seconds(&self) -> f32 {
        self.frame_timer.default_seconds()
    }

    pub fn set_frame_seconds(&mut self, seconds: f32) {
        self.frame_timer.set_default_seconds(seconds);
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn finished_playing(&self) -> bool {
        self.finished
    }

    pub fn next_animation(&self) -> Option<&str> {
        self.next_animation.as_deref()
    }

    pub fn set_next_animation(&mut self, next: Option<String>) {
        self.next_animation = next;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// One named strip definition from a strip-set file.
#[derive(Debug, Clone)]
pub struct StripDef {
    pub name: String,
    pub texture: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_seconds: f32,
    pub looping: bool,
    pub next: Option<String>,
}

/// A validated strip-set file: a named group of strip definitions.
#[derive(Debug, Clone)]
pub struct StripSetFile {
    pub version: String,
    pub set_id: String,
    pub strips: Vec<StripDef>,
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct StripSetJson {
    version: String,
    set_id: String,
    strips: Vec<StripDefJson>,
}

#[derive(Debug, Deserialize)]
struct StripDefJson {
    name: String,
    texture: String,
    frame_width: u32,
    frame_height: u32,
    frame_seconds: f32,
    #[serde(default = "default_looping")]
    looping: bool,
    #[serde(default)]
    next: Option<String>,
}

const fn default_looping() -> bool {
    true
}

/// Load a strip-set definition file from disk.
pub fn load_strip_set(path: &Path) -> Result<StripSetFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read strip set {}: {e}", path.display()))?;
    parse_strip_set(&raw).map_err(|e| format!("{} in {}", e, path.display()))
}

/// Parse a strip-set definition from an in-memory JSON string.
pub fn parse_strip_set(raw: &str) -> Result<StripSetFile, String> {
    let json: StripSetJson =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse strip set JSON: {e}"))?;
    validate_strip_set(&json)?;

    let strips = json
        .strips
        .into_iter()
        .map(|s| StripDef {
            name: s.name,
            texture: s.texture,
            frame_width: s.frame_width,
            frame_height: s.frame_height,
            frame_seconds: s.frame_seconds,
            looping: s.looping,
            next: s.next,
        })
        .collect();

    Ok(StripSetFile {
        version: json.version,
        set_id: json.set_id,
        strips,
    })
}

fn validate_strip_set(json: &StripSetJson) -> Result<(), String> {
    if json.version != "0.1" {
        return Err(format!(
            "Strip set validation failed: unsupported version '{}'",
            json.version
        ));
    }
    if json.set_id.is_empty() {
        return Err("Strip set validation failed: set_id is empty".to_string());
    }
    if json.strips.is_empty() {
        return Err("Strip set validation failed: strips array is empty".to_string());
    }

    let mut names = HashSet::new();
    for strip in &json.strips {
        if strip.name.is_empty() {
            return Err("Strip set validation failed: strip with empty name".to_string());
        }
        if !names.insert(strip.name.clone()) {
            return Err(format!(
                "Strip set validation failed: duplicate strip name '{}'",
                strip.name
            ));
        }
        if strip.texture.is_empty() {
            return Err(format!(
                "Strip set validation failed: strip '{}' has empty texture name",
                strip.name
            ));
        }
        if strip.frame_width == 0 || strip.frame_height == 0 {
            return Err(format!(
                "Strip set validation failed: strip '{}' has zero frame dimensions",
                strip.name
            ));
        }
        if strip.frame_seconds <= 0.0 {
            return Err(format!(
                "Strip set validation failed: strip '{}' has non-positive frame_seconds",
                strip.name
            ));
        }
        if let Some(next) = &strip.next {
            if next.is_empty() {
                return Err(format!(
                    "Strip set validation failed: strip '{}' has empty next name",
                    strip.name
                ));
            }
        }
    }

    for strip in &json.strips {
        if let Some(next) = &strip.next {
            if !names.contains(next) {
                log::warn!(
                    "Strip '{}' chains to '{}', which is not in this set. \
                     This is allowed but often accidental.",
                    strip.name,
                    next
                );
            }
        }
    }
    Ok(())
}
