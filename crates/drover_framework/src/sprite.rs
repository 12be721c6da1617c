//! Positioned, rotatable, scalable game entity with named animation strips
//! and collision queries.
//!
//! A sprite owns a map of named `AnimationStrip`s, each paired with the
//! texture it plays over, and at most one current animation. Strips that
//! finish and declare a successor chain automatically: "startle" can flow
//! into "graze" into "walk" with no per-frame code in the owner. A finished
//! strip with no successor holds its last frame forever.
//!
//! Collision comes in two forms. Axis-aligned bounding boxes are cheap but
//! undefined once either sprite is rotated — a known limitation of the
//! contract, flagged at debug level rather than silently miscomputed. For
//! rotated or irregular shapes, sprites carry collision circles authored in
//! local (unrotated, unscaled) space; their world-space projections are
//! recomputed eagerly on every position, rotation, or scale change so
//! queries are always consistent with the latest transform.

use std::collections::HashMap;

use drover_core::animation::{AnimationStrip, StripSetFile};
use drover_core::geometry::{rotate_about, Circle, Rect};
use drover_platform::content::ContentScope;
use drover_render::{Camera2D, Color, DrawParams, Flip, Renderer, Texture};
use glam::Vec2;

#[derive(Debug)]
struct SpriteAnimation {
    texture: Texture,
    strip: AnimationStrip,
}

#[derive(Debug)]
pub struct Sprite {
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
    scale: Vec2,
    tint: Color,
    flip: Flip,
    layer_depth: f32,
    active: bool,
    visible: bool,
    frame_width: u32,
    frame_height: u32,
    animations: HashMap<String, SpriteAnimation>,
    current: Option<String>,
    local_circles: Vec<Circle>,
    world_circles: Vec<Circle>,
}

impl Sprite {
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            tint: Color::WHITE,
            flip: Flip::None,
            layer_depth: 0.0,
            active: true,
            visible: true,
            frame_width,
            frame_height,
            animations: HashMap::new(),
            current: None,
            local_circles: Vec::new(),
            world_circles: Vec::new(),
        }
    }

    /// Build a sprite from a strip-set definition, resolving every texture
    /// through the given content scope. Frame dimensions come from the first
    /// strip in the file.
    pub fn from_strip_set(set: &StripSetFile, scope: &mut ContentScope) -> Result<Self, String> {
        let first = set
            .strips
            .first()
            .ok_or_else(|| format!("Strip set '{}' has no strips", set.set_id))?;
        let mut sprite = Sprite::new(first.frame_width, first.frame_height);

        for def in &set.strips {
            let texture = scope.load_texture(&def.texture)?;
            let mut strip = AnimationStrip::new(
                &def.name,
                texture.width(),
                def.frame_width,
                def.frame_height,
                def.frame_seconds,
            );
            strip.set_looping(def.looping);
            strip.set_next_animation(def.next.clone());
            sprite
                .animations
                .insert(def.name.clone(), SpriteAnimation { texture, strip });
        }
        Ok(sprite)
    }

    /// Register a looping animation over `texture` using this sprite's frame
    /// dimensions.
    pub fn add_animation(&mut self, name: &str, texture: Texture, frame_seconds: f32) {
        let strip = AnimationStrip::new(
            name,
            texture.width(),
            self.frame_width,
            self.frame_height,
            frame_seconds,
        );
        self.animations
            .insert(name.to_string(), SpriteAnimation { texture, strip });
    }

    pub fn set_looping(&mut self, name: &str, looping: bool) {
        match self.animations.get_mut(name) {
            Some(animation) => animation.strip.set_looping(looping),
            None => log::debug!("set_looping: no animation named '{name}'"),
        }
    }

    pub fn set_next_animation(&mut self, name: &str, next: Option<&str>) {
        match self.animations.get_mut(name) {
            Some(animation) => animation
                .strip
                .set_next_animation(next.map(str::to_string)),
            None => log::debug!("set_next_animation: no animation named '{name}'"),
        }
    }

    /// Switch to a named animation and restart it. Unknown or empty names
    /// are ignored — a missing successor just holds the current frame.
    pub fn play_animation(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        match self.animations.get_mut(name) {
            Some(animation) => {
                animation.strip.play();
                self.current = Some(name.to_string());
            }
            None => log::debug!("play_animation: no animation named '{name}'"),
        }
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// True when the current animation has clamped on its last frame.
    pub fn animation_finished(&self) -> bool {
        self.current
            .as_ref()
            .and_then(|name| self.animations.get(name))
            .map(|a| a.strip.finished_playing())
            .unwrap_or(false)
    }

    /// Integrate velocity, resolve animation chaining, and advance the
    /// current strip.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        if self.velocity != Vec2::ZERO {
            self.set_position(self.position + self.velocity * dt);
        }

        // A strip that finished last frame hands off to its successor before
        // this frame advances anything.
        if let Some(name) = self.current.clone() {
            if let Some(animation) = self.animations.get(&name) {
                if animation.strip.finished_playing() {
                    if let Some(next) = animation.strip.next_animation().map(str::to_string) {
                        self.play_animation(&next);
                    }
                }
            }
        }

        if let Some(name) = &self.current {
            if let Some(animation) = self.animations.get_mut(name) {
                animation.strip.update(dt);
            }
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera2D) {
        if !self.visible {
            return;
        }
        let Some(animation) = self
            .current
            .as_ref()
            .and_then(|name| self.animations.get(name))
        else {
            return;
        };
        let (frame_width, frame_height) = self.frame_size();
        let params = DrawParams {
            position: camera.world_to_screen(self.center()),
            rotation: self.rotation,
            scale: self.scale,
            origin: Vec2::new(frame_width as f32 / 2.0, frame_height as f32 / 2.0),
            tint: self.tint,
            layer_depth: self.layer_depth,
            flip: self.flip,
        };
        renderer.draw(&animation.texture, animation.strip.frame_rectangle(), &params);
    }

    /// Frame dimensions of the current animation, falling back to the
    /// sprite's own.
    pub fn frame_size(&self) -> (u32, u32) {
        self.current
            .as_ref()
            .and_then(|name| self.animations.get(name))
            .map(|a| (a.strip.frame_width(), a.strip.frame_height()))
            .unwrap_or((self.frame_width, self.frame_height))
    }

    pub fn width(&self) -> f32 {
        self.frame_size().0 as f32 * self.scale.x
    }

    pub fn height(&self) -> f32 {
        self.frame_size().1 as f32 * self.scale.y
    }

    /// Center of the unscaled frame in world coordinates.
    pub fn center(&self) -> Vec2 {
        let (frame_width, frame_height) = self.frame_size();
        self.position + Vec2::new(frame_width as f32 / 2.0, frame_height as f32 / 2.0)
    }

    /// Scaled bounds, grown about the center of the unscaled frame.
    pub fn bounding_box(&self) -> Rect {
        let (frame_width, frame_height) = self.frame_size();
        let width = self.width();
        let height = self.height();
        Rect::new(
            (self.position.x - (width - frame_width as f32) / 2.0) as i32,
            (self.position.y - (height - frame_height as f32) / 2.0) as i32,
            width as i32,
            height as i32,
        )
    }

    pub fn source_bounding_box(&self) -> Rect {
        let (frame_width, frame_height) = self.frame_size();
        Rect::new(
            self.position.x as i32,
            self.position.y as i32,
            frame_width as i32,
            frame_height as i32,
        )
    }

    /// Author collision circles in local space, relative to the sprite
    /// center, before rotation and scaling.
    pub fn set_collision_circles(&mut self, circles: Vec<Circle>) {
        self.local_circles = circles;
        self.update_world_circles();
    }

    /// Current world-space collision circles.
    pub fn collision_circles(&self) -> &[Circle] {
        &self.world_circles
    }

    pub fn can_circle_collide(&self) -> bool {
        self.active && !self.world_circles.is_empty()
    }

    fn update_world_circles(&mut self) {
        let center = self.center();
        let scale = self.scale;
        let rotation = self.rotation;
        let radius_scale = scale.x.max(scale.y);
        self.world_circles.clear();
        self.world_circles
            .extend(self.local_circles.iter().map(|circle| {
                let scaled = center + circle.center * scale;
                Circle::new(
                    rotate_about(scaled, center, rotation),
                    circle.radius * radius_scale,
                )
            }));
    }

    /// Per-circle intersection test, O(n×m) with an early exit on the first
    /// intersecting pair.
    pub fn collides_with_circles(&self, other: &Sprite) -> bool {
        if !self.can_circle_collide() || !other.can_circle_collide() {
            return false;
        }
        self.world_circles.iter().any(|circle| {
            other
                .world_circles
                .iter()
                .any(|other_circle| circle.intersects_circle(other_circle))
        })
    }

    /// Bounding-box intersection. Unreliable once either sprite is rotated;
    /// use collision circles there instead.
    pub fn collides_with_aabb(&self, other: &Sprite) -> bool {
        if self.rotation != 0.0 || other.rotation != 0.0 {
            log::debug!("bounding-box collision queried on a rotated sprite");
        }
        self.bounding_box().intersects(&other.bounding_box())
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_world_circles();
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
        self.update_world_circles();
    }

    /// Face a world point. Zero rotation faces +X.
    pub fn rotate_to(&mut self, world_point: Vec2) {
        self.rotate_to_direction(world_point - self.position);
    }

    pub fn rotate_to_direction(&mut self, direction: Vec2) {
        self.set_rotation(direction.y.atan2(direction.x));
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
        self.update_world_circles();
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    pub fn set_flip(&mut self, flip: Flip) {
        self.flip = flip;
    }

    pub fn set_layer_depth(&mut self, layer_depth: f32) {
        self.layer_depth = layer_depth;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
