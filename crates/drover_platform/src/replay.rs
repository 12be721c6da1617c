//! Scripted input traces: a JSON-described sequence of raw input frames.
//!
//! A trace stands in for live devices, which makes whole sessions
//! reproducible — identical traces and dt sequences replay identically. The
//! demo binary runs on one, and framework tests script exact input timings
//! with them.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use drover_core::input::{
    AccelerometerState, Button, InputSource, Key, RawInputSnapshot, TouchPoint,
};
use glam::{Vec2, Vec3};

#[derive(Debug, Clone)]
pub struct InputTrace {
    pub version: String,
    frames: Vec<TraceFrame>,
}

#[derive(Debug, Clone)]
struct TraceFrame {
    keys: Vec<Key>,
    buttons: Vec<Button>,
    touch: Option<Vec2>,
    tilt: Option<Vec3>,
    repeat: u32,
}

impl InputTrace {
    /// Expand repeat counts into one snapshot per frame. Touch ids stay
    /// stable for as long as a touch persists across consecutive frames and
    /// advance when a new touch begins after a gap.
    pub fn expanded(&self) -> Vec<RawInputSnapshot> {
        let mut out = Vec::new();
        let mut touch_id: u64 = 0;
        let mut touch_was_down = false;

        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                let touches = match frame.touch {
                    Some(position) => {
                        if !touch_was_down {
                            touch_id += 1;
                        }
                        touch_was_down = true;
                        vec![TouchPoint {
                            id: touch_id,
                            position,
                        }]
                    }
                    None => {
                        touch_was_down = false;
                        Vec::new()
                    }
                };
                out.push(RawInputSnapshot {
                    keys_down: frame.keys.iter().copied().collect(),
                    buttons_down: frame.buttons.iter().copied().collect(),
                    touches,
                    gestures: Vec::new(),
                    accelerometer: frame
                        .tilt
                        .map(AccelerometerState::uniform)
                        .unwrap_or_default(),
                });
            }
        }
        out
    }

    pub fn frame_count(&self) -> usize {
        self.frames.iter().map(|f| f.repeat.max(1) as usize).sum()
    }
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct TraceJson {
    version: String,
    frames: Vec<TraceFrameJson>,
}

#[derive(Debug, Deserialize)]
struct TraceFrameJson {
    #[serde(default)]
    keys: Vec<Key>,
    #[serde(default)]
    buttons: Vec<Button>,
    #[serde(default)]
    touch: Option<PointJson>,
    #[serde(default)]
    tilt: Option<TiltJson>,
    #[serde(default = "default_repeat")]
    repeat: u32,
}

#[derive(Debug, Deserialize)]
struct PointJson {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct TiltJson {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    z: f32,
}

const fn default_repeat() -> u32 {
    1
}

/// Load an input trace from disk.
pub fn load_trace(path: &Path) -> Result<InputTrace, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read input trace {}: {e}", path.display()))?;
    parse_trace(&raw).map_err(|e| format!("{} in {}", e, path.display()))
}

/// Parse an input trace from an in-memory JSON string.
pub fn parse_trace(raw: &str) -> Result<InputTrace, String> {
    let json: TraceJson =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse input trace JSON: {e}"))?;
    validate_trace(&json)?;

    let frames = json
        .frames
        .into_iter()
        .map(|f| TraceFrame {
            keys: f.keys,
            buttons: f.buttons,
            touch: f.touch.map(|p| Vec2::new(p.x, p.y)),
            tilt: f.tilt.map(|t| Vec3::new(t.x, t.y, t.z)),
            repeat: f.repeat,
        })
        .collect();

    Ok(InputTrace {
        version: json.version,
        frames,
    })
}

fn validate_trace(json: &TraceJson) -> Result<(), String> {
    if json.version != "0.1" {
        return Err(format!(
            "Input trace validation failed: unsupported version '{}'",
            json.version
        ));
    }
    if json.frames.is_empty() {
        return Err("Input trace validation failed: frames array is empty".to_string());
    }
    Ok(())
}

/// InputSource playing back an expanded trace. Polls past the end of the
/// trace return idle snapshots.
pub struct ScriptedInputSource {
    frames: Vec<RawInputSnapshot>,
    cursor: usize,
}

impl ScriptedInputSource {
    pub fn from_trace(trace: &InputTrace) -> Self {
        Self {
            frames: trace.expanded(),
            cursor: 0,
        }
    }

    pub fn from_snapshots(frames: Vec<RawInputSnapshot>) -> Self {
        Self { frames, cursor: 0 }
    }

    pub fn finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInputSource {
    fn poll(&mut self) -> RawInputSnapshot {
        let snapshot = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        snapshot
    }
}

/// InputSource that reports no device activity at all.
#[derive(Default)]
pub struct NullInputSource;

impl InputSource for NullInputSource {
    fn poll(&mut self) -> RawInputSnapshot {
        RawInputSnapshot::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trace_expands_repeats() {
        let trace = parse_trace(
            r#"{
              "version": "0.1",
              "frames": [
                { "keys": ["Space"], "repeat": 3 },
                { "buttons": ["Back"] }
              ]
            }"#,
        )
        .expect("trace should parse");

        let frames = trace.expanded();
        assert_eq!(frames.len(), 4);
        assert!(frames[0].keys_down.contains(&Key::Space));
        assert!(frames[2].keys_down.contains(&Key::Space));
        assert!(frames[3].buttons_down.contains(&Button::Back));
    }

    #[test]
    fn touch_ids_stay_stable_within_a_press() {
        let trace = parse_trace(
            r#"{
              "version": "0.1",
              "frames": [
                { "touch": { "x": 10.0, "y": 10.0 }, "repeat": 2 },
                { },
                { "touch": { "x": 30.0, "y": 30.0 } }
              ]
            }"#,
        )
        .expect("trace should parse");

        let frames = trace.expanded();
        assert_eq!(frames[0].touches[0].id, frames[1].touches[0].id);
        assert!(frames[2].touches.is_empty());
        assert_ne!(frames[0].touches[0].id, frames[3].touches[0].id);
    }

    #[test]
    fn tilt_populates_all_filter_variants() {
        let trace = parse_trace(
            r#"{
              "version": "0.1",
              "frames": [ { "tilt": { "x": -0.4 } } ]
            }"#,
        )
        .expect("trace should parse");

        let frames = trace.expanded();
        assert_eq!(frames[0].accelerometer.raw.x, -0.4);
        assert_eq!(frames[0].accelerometer.low_pass.x, -0.4);
    }

    #[test]
    fn parse_trace_rejects_empty_frames() {
        let err = parse_trace(r#"{ "version": "0.1", "frames": [] }"#)
            .expect_err("empty frames should fail");
        assert!(err.contains("frames array is empty"));
    }

    #[test]
    fn parse_trace_rejects_unknown_key_name() {
        let err = parse_trace(
            r#"{ "version": "0.1", "frames": [ { "keys": ["NotAKey"] } ] }"#,
        )
        .expect_err("unknown key should fail");
        assert!(err.contains("Failed to parse input trace JSON"));
    }

    #[test]
    fn scripted_source_returns_idle_after_end() {
        let trace = parse_trace(
            r#"{ "version": "0.1", "frames": [ { "keys": ["Space"] } ] }"#,
        )
        .expect("trace should parse");
        let mut source = ScriptedInputSource::from_trace(&trace);

        assert!(source.poll().keys_down.contains(&Key::Space));
        assert!(source.finished());
        assert!(source.poll().keys_down.is_empty());
    }
}
