//! Action-based input aggregation over heterogeneous device modalities.
//!
//! Screens register named **actions** ("jump", "pause") and bind each one to
//! any mix of raw triggers: keyboard keys, gamepad buttons, touch rectangles,
//! swipe directions, recognized gestures, and accelerometer tilt. A frame
//! later, `is_pressed("jump")` answers with a logical OR across every trigger
//! bound under that name, so one action can listen to spacebar, gamepad A,
//! and an on-screen button at once.
//!
//! Edge vs level: key/button/touch bindings carry an `edge_triggered` flag.
//! Edge bindings fire only on the frame the input transitions from released
//! to pressed (current down AND previous up); level bindings fire on every
//! frame the input is down.
//!
//! Frame protocol: `begin_update` pulls one `RawInputSnapshot` from the
//! `InputSource` collaborator into "current"; `end_update` commits current to
//! previous for the next frame's edge detection. Querying an action that was
//! never registered returns false — screens are composed dynamically and an
//! unbound action is a normal condition, not an error.

use glam::{Vec2, Vec3};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::geometry::Rect;

/// Side length of the square used to treat a touch point as an area when
/// testing it against bound rectangles.
const TOUCH_POINT_SIZE: i32 = 10;

/// Scale factor converting a pinch finger-distance delta into a scale change.
const PINCH_SCALE_FACTOR: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Space,
    Enter,
    A,
    D,
    M,
    P,
    S,
    W,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Start,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum InputDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AccelerometerFilter {
    /// Unfiltered sensor vector, lowest latency, noisiest.
    Raw,
    /// Arithmetic mean over a trailing window; very stable, high latency.
    Averaged,
    /// Low-pass with a threshold-triggered high-pass; stable and quick to
    /// follow large offsets.
    ThresholdFiltered,
    /// First-order low-pass; smooth with medium latency.
    LowPass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum GestureKind {
    Tap,
    DoubleTap,
    Hold,
    Flick,
    FreeDrag,
    Pinch,
}

/// One touch point with an id that is stable for the lifetime of the touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Vec2,
}

/// A gesture recognized by the platform this frame. Two-finger gestures
/// populate the secondary position/delta pair; single-finger gestures leave
/// them at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub position: Vec2,
    pub position2: Vec2,
    pub delta: Vec2,
    pub delta2: Vec2,
}

impl GestureEvent {
    /// Small rectangle around the primary sample position, used to test the
    /// gesture against bound screen areas.
    pub fn sample_area(&self) -> Rect {
        Rect::new(
            self.position.x as i32 - TOUCH_POINT_SIZE / 2,
            self.position.y as i32 - TOUCH_POINT_SIZE / 2,
            TOUCH_POINT_SIZE,
            TOUCH_POINT_SIZE,
        )
    }
}

/// Accelerometer vector in all four filtered variants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelerometerState {
    pub raw: Vec3,
    pub averaged: Vec3,
    pub threshold_filtered: Vec3,
    pub low_pass: Vec3,
}

impl AccelerometerState {
    /// Same vector for every filter variant — enough for scripted sources.
    pub fn uniform(v: Vec3) -> Self {
        Self {
            raw: v,
            averaged: v,
            threshold_filtered: v,
            low_pass: v,
        }
    }

    pub fn reading(&self, filter: AccelerometerFilter) -> Vec3 {
        match filter {
            AccelerometerFilter::Raw => self.raw,
            AccelerometerFilter::Averaged => self.averaged,
            AccelerometerFilter::ThresholdFiltered => self.threshold_filtered,
            AccelerometerFilter::LowPass => self.low_pass,
        }
    }
}

/// One frame's worth of raw device state.
#[derive(Debug, Clone, Default)]
pub struct RawInputSnapshot {
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<Button>,
    pub touches: Vec<TouchPoint>,
    pub gestures: Vec<GestureEvent>,
    pub accelerometer: AccelerometerState,
}

impl RawInputSnapshot {
    /// Primary touch position, if any finger is down.
    pub fn first_touch(&self) -> Option<Vec2> {
        self.touches.first().map(|t| t.position)
    }

    fn touch_rect(&self) -> Option<Rect> {
        self.first_touch().map(|p| {
            Rect::new(
                p.x as i32 - TOUCH_POINT_SIZE / 2,
                p.y as i32 - TOUCH_POINT_SIZE / 2,
                TOUCH_POINT_SIZE,
                TOUCH_POINT_SIZE,
            )
        })
    }
}

/// Per-frame raw-state provider. The platform crate ships a scripted
/// implementation driven by a JSON input trace.
pub trait InputSource {
    fn poll(&mut self) -> RawInputSnapshot;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TiltBinding {
    threshold: f32,
    filter: AccelerometerFilter,
}

#[derive(Default)]
struct ActionBindings {
    keys: HashMap<Key, bool>,
    buttons: HashMap<Button, bool>,
    touch_areas: HashMap<Rect, bool>,
    swipes: HashMap<InputDirection, f32>,
    gestures: HashSet<(GestureKind, Rect)>,
    tilts: HashMap<InputDirection, TiltBinding>,
}

/// Accumulated sample data from every gesture that matched an action this
/// frame. Gestures like free-drag arrive as many samples per frame; their
/// positions and deltas sum into one composite, matching how callers consume
/// them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureAggregate {
    pub position: Vec2,
    pub position2: Vec2,
    pub delta: Vec2,
    pub delta2: Vec2,
}

#[derive(Default)]
pub struct InputManager {
    actions: HashMap<String, ActionBindings>,
    current: RawInputSnapshot,
    previous: RawInputSnapshot,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull this frame's raw state from the source.
    pub fn begin_update(&mut self, source: &mut dyn InputSource) {
        self.current = source.poll();
    }

    /// Commit current state as the next frame's previous state.
    pub fn end_update(&mut self) {
        self.previous = self.current.clone();
    }

    fn bindings_mut(&mut self, action: &str) -> &mut ActionBindings {
        self.actions.entry(action.to_string()).or_default()
    }

    /// Bind a keyboard key. Rebinding the same key under the same action
    /// overwrites its edge flag; binding a different key augments the set.
    pub fn bind_key(&mut self, action: &str, key: Key, edge_triggered: bool) {
        self.bindings_mut(action).keys.insert(key, edge_triggered);
    }

    pub fn bind_button(&mut self, action: &str, button: Button, edge_triggered: bool) {
        self.bindings_mut(action)
            .buttons
            .insert(button, edge_triggered);
    }

    pub fn bind_touch_area(&mut self, action: &str, area: Rect, edge_triggered: bool) {
        self.bindings_mut(action)
            .touch_areas
            .insert(area, edge_triggered);
    }

    /// Bind a swipe: fires when the touch point moves at least
    /// `min_distance` along `direction` between two consecutive frames.
    pub fn bind_swipe(&mut self, action: &str, direction: InputDirection, min_distance: f32) {
        self.bindings_mut(action)
            .swipes
            .insert(direction, min_distance);
    }

    pub fn bind_gesture(&mut self, action: &str, kind: GestureKind, area: Rect) {
        self.bindings_mut(action).gestures.insert((kind, area));
    }

    pub fn bind_tilt(
        &mut self,
        action: &str,
        direction: InputDirection,
        threshold: f32,
        filter: AccelerometerFilter,
    ) {
        self.bindings_mut(action)
            .tilts
            .insert(direction, TiltBinding { threshold, filter });
    }

    /// True if any trigger bound under `action` fired this frame.
    /// Unregistered actions are simply not pressed.
    pub fn is_pressed(&self, action: &str) -> bool {
        self.evaluate(action, None)
    }

    /// Like `is_pressed`, but gesture bindings are tested against `area`
    /// instead of the rectangles they were registered with.
    pub fn is_pressed_in(&self, action: &str, area: Rect) -> bool {
        self.evaluate(action, Some(area))
    }

    fn evaluate(&self, action: &str, gesture_area: Option<Rect>) -> bool {
        let Some(bindings) = self.actions.get(action) else {
            return false;
        };
        self.keys_pressed(bindings)
            || self.buttons_pressed(bindings)
            || self.touch_tap_pressed(bindings)
            || self.swipe_pressed(bindings)
            || self.matched_gesture(bindings, gesture_area).is_some()
            || self.tilt_pressed(bindings)
    }

    fn keys_pressed(&self, bindings: &ActionBindings) -> bool {
        bindings.keys.iter().any(|(key, &edge)| {
            let down = self.current.keys_down.contains(key);
            if edge {
                down && !self.previous.keys_down.contains(key)
            } else {
                down
            }
        })
    }

    fn buttons_pressed(&self, bindings: &ActionBindings) -> bool {
        bindings.buttons.iter().any(|(button, &edge)| {
            let down = self.current.buttons_down.contains(button);
            if edge {
                down && !self.previous.buttons_down.contains(button)
            } else {
                down
            }
        })
    }

    fn touch_tap_pressed(&self, bindings: &ActionBindings) -> bool {
        let Some(touch_rect) = self.current.touch_rect() else {
            return false;
        };
        bindings.touch_areas.iter().any(|(area, &edge)| {
            let inside = area.intersects(&touch_rect);
            if edge {
                // Edge for touch means the finger was entirely absent last frame.
                inside && self.previous.first_touch().is_none()
            } else {
                inside
            }
        })
    }

    fn swipe_pressed(&self, bindings: &ActionBindings) -> bool {
        // Both samples must exist: no swipe on touch-down or touch-up frames.
        let (Some(current), Some(previous)) =
            (self.current.first_touch(), self.previous.first_touch())
        else {
            return false;
        };
        bindings
            .swipes
            .iter()
            .any(|(direction, &distance)| match direction {
                InputDirection::Up => current.y + distance < previous.y,
                InputDirection::Down => current.y - distance > previous.y,
                InputDirection::Left => current.x + distance < previous.x,
                InputDirection::Right => current.x - distance > previous.x,
            })
    }

    fn tilt_pressed(&self, bindings: &ActionBindings) -> bool {
        bindings.tilts.iter().any(|(direction, tilt)| {
            let reading = self.current.accelerometer.reading(tilt.filter);
            match direction {
                InputDirection::Up => reading.y.abs() > tilt.threshold && reading.y < 0.0,
                InputDirection::Down => reading.y.abs() > tilt.threshold && reading.y > 0.0,
                InputDirection::Left => reading.x.abs() > tilt.threshold && reading.x < 0.0,
                InputDirection::Right => reading.x.abs() > tilt.threshold && reading.x > 0.0,
            }
        })
    }

    fn matched_gesture(
        &self,
        bindings: &ActionBindings,
        area_override: Option<Rect>,
    ) -> Option<GestureAggregate> {
        self.aggregate_gestures(bindings, area_override, None)
    }

    fn aggregate_gestures(
        &self,
        bindings: &ActionBindings,
        area_override: Option<Rect>,
        kind_filter: Option<GestureKind>,
    ) -> Option<GestureAggregate> {
        let mut aggregate: Option<GestureAggregate> = None;
        for (kind, bound_area) in &bindings.gestures {
            if kind_filter.is_some_and(|k| k != *kind) {
                continue;
            }
            let area = area_override.unwrap_or(*bound_area);
            for gesture in &self.current.gestures {
                if gesture.kind != *kind || !gesture.sample_area().intersects(&area) {
                    continue;
                }
                match &mut aggregate {
                    None => {
                        aggregate = Some(GestureAggregate {
                            position: gesture.position,
                            position2: gesture.position2,
                            delta: gesture.delta,
                            delta2: gesture.delta2,
                        });
                    }
                    Some(acc) => {
                        acc.position += gesture.position;
                        acc.position2 += gesture.position2;
                        acc.delta += gesture.delta;
                        acc.delta2 += gesture.delta2;
                    }
                }
            }
        }
        aggregate
    }

    /// Composite sample data for the gestures that matched `action` this
    /// frame, if any did.
    pub fn gesture_aggregate(&self, action: &str) -> Option<GestureAggregate> {
        let bindings = self.actions.get(action)?;
        self.matched_gesture(bindings, None)
    }

    /// Primary position of this frame's matched gesture, or zero.
    pub fn gesture_position(&self, action: &str) -> Vec2 {
        self.gesture_aggregate(action)
            .map(|g| g.position)
            .unwrap_or(Vec2::ZERO)
    }

    /// Primary delta of this frame's matched gesture, or zero.
    pub fn gesture_delta(&self, action: &str) -> Vec2 {
        self.gesture_aggregate(action)
            .map(|g| g.delta)
            .unwrap_or(Vec2::ZERO)
    }

    /// Scale change of a matched pinch gesture: positive when the fingers
    /// spread apart, negative when they close, zero when no pinch fired.
    pub fn pinch_scale_change(&self, action: &str) -> f32 {
        let Some(bindings) = self.actions.get(action) else {
            return 0.0;
        };
        let Some(pinch) = self.aggregate_gestures(bindings, None, Some(GestureKind::Pinch)) else {
            return 0.0;
        };
        let current_distance = pinch.position.distance(pinch.position2);
        let previous_distance = (pinch.position - pinch.delta)
            .distance(pinch.position2 - pinch.delta2);
        (current_distance - previous_distance) * PINCH_SCALE_FACTOR
    }

    /// Primary touch position this frame, if any finger is down.
    pub fn current_touch_position(&self) -> Option<Vec2> {
        self.current.first_touch()
    }

    pub fn accelerometer_reading(&self, filter: AccelerometerFilter) -> Vec3 {
        self.current.accelerometer.reading(filter)
    }

    pub fn is_registered(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }
}
