//! The demo's herd animal: a sprite with a chained animation graph and a
//! simple wander behavior.
//!
//! Animation graph: `startle` flows into `graze` which flows into the
//! looping `walk`; `moo` also falls back to `walk`. The cow only moves
//! while walking — transient animations stop it in place, and the chain
//! brings it back to wandering without any outside bookkeeping.

use drover_core::animation::parse_strip_set;
use drover_core::geometry::{Circle, Rect};
use drover_core::time::Ticker;
use drover_framework::Sprite;
use drover_platform::content::ContentScope;
use drover_render::{Camera2D, Flip, Renderer};
use glam::Vec2;

use crate::assets::COW_STRIPS;

const WALK_SPEED: f32 = 60.0;
const WANDER_SECONDS: f32 = 2.5;

/// Wander headings, cycled on each timer elapse and on pasture-edge bumps.
const HEADINGS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, -1.0),
];

pub struct Cow {
    sprite: Sprite,
    wander_timer: Ticker,
    heading_index: usize,
    grazes_completed: u32,
}

impl Cow {
    pub fn new(scope: &mut ContentScope, start: Vec2) -> Result<Self, String> {
        let set = parse_strip_set(COW_STRIPS)?;
        let mut sprite = Sprite::from_strip_set(&set, scope)?;
        // Body and head circles, authored relative to the frame center.
        sprite.set_collision_circles(vec![
            Circle::new(Vec2::new(0.0, 4.0), 18.0),
            Circle::new(Vec2::new(18.0, -6.0), 10.0),
        ]);
        sprite.set_position(start);
        sprite.play_animation("walk");

        Ok(Self {
            sprite,
            wander_timer: Ticker::new(WANDER_SECONDS),
            heading_index: 0,
            grazes_completed: 0,
        })
    }

    pub fn update(&mut self, dt: f32, pasture: Rect) {
        self.wander_timer.update(dt);
        if self.wander_timer.elapsed() {
            self.turn();
            self.wander_timer.reset();
        }

        let heading = HEADINGS[self.heading_index];
        let walking = self.sprite.current_animation() == Some("walk");
        self.sprite.set_velocity(if walking {
            heading * WALK_SPEED
        } else {
            Vec2::ZERO
        });
        self.sprite.set_flip(if heading.x < 0.0 {
            Flip::Horizontal
        } else {
            Flip::None
        });

        let before_grazing = self.sprite.current_animation() == Some("graze");
        self.sprite.update(dt);
        if before_grazing && self.sprite.current_animation() == Some("walk") {
            self.grazes_completed += 1;
        }

        self.stay_in_pasture(pasture);
    }

    fn stay_in_pasture(&mut self, pasture: Rect) {
        let (frame_width, frame_height) = self.sprite.frame_size();
        let position = self.sprite.position();
        let clamped = Vec2::new(
            position.x.clamp(
                pasture.x as f32,
                (pasture.right() - frame_width as i32) as f32,
            ),
            position.y.clamp(
                pasture.y as f32,
                (pasture.bottom() - frame_height as i32) as f32,
            ),
        );
        if clamped != position {
            self.sprite.set_position(clamped);
            self.turn();
        }
    }

    fn turn(&mut self) {
        self.heading_index = (self.heading_index + 1) % HEADINGS.len();
    }

    /// Point the wander heading along the strongest axis of `direction`.
    pub fn head_toward(&mut self, direction: Vec2) {
        if direction == Vec2::ZERO {
            return;
        }
        self.heading_index = if direction.x.abs() >= direction.y.abs() {
            if direction.x >= 0.0 {
                0
            } else {
                2
            }
        } else if direction.y >= 0.0 {
            1
        } else {
            3
        };
        self.wander_timer.reset();
    }

    pub fn graze(&mut self) {
        self.sprite.play_animation("graze");
    }

    pub fn moo(&mut self) {
        self.sprite.play_animation("moo");
    }

    pub fn startle(&mut self) {
        self.sprite.play_animation("startle");
    }

    pub fn grazes_completed(&self) -> u32 {
        self.grazes_completed
    }

    pub fn center(&self) -> Vec2 {
        self.sprite.center()
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera2D) {
        self.sprite.draw(renderer, camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::CONTENT_MANIFEST;
    use drover_platform::content::parse_manifest;
    use std::sync::Arc;

    fn pasture() -> Rect {
        Rect::new(0, 0, 1600, 960)
    }

    fn cow() -> Cow {
        let catalog = Arc::new(parse_manifest(CONTENT_MANIFEST).expect("manifest should parse"));
        let mut scope = ContentScope::new(catalog);
        Cow::new(&mut scope, Vec2::new(400.0, 300.0)).expect("cow should build")
    }

    #[test]
    fn walking_cow_moves_and_transients_stop_it() {
        let mut cow = cow();
        let start = cow.center();
        cow.update(0.1, pasture());
        assert_ne!(cow.center(), start);

        cow.moo();
        let held = cow.center();
        cow.update(0.1, pasture());
        assert_eq!(cow.center(), held);
    }

    #[test]
    fn startle_chain_settles_back_into_walk() {
        let mut cow = cow();
        cow.startle();
        assert_eq!(cow.sprite().current_animation(), Some("startle"));

        // startle (2 frames) -> graze (3 frames) -> walk
        for _ in 0..60 {
            cow.update(0.2, pasture());
        }
        assert_eq!(cow.sprite().current_animation(), Some("walk"));
        assert_eq!(cow.grazes_completed(), 1);
    }

    #[test]
    fn graze_completion_increments_score_once_per_graze() {
        let mut cow = cow();
        cow.graze();
        for _ in 0..60 {
            cow.update(0.2, pasture());
        }
        assert_eq!(cow.grazes_completed(), 1);

        // Walking frames afterwards add nothing.
        for _ in 0..60 {
            cow.update(0.2, pasture());
        }
        assert_eq!(cow.grazes_completed(), 1);
    }

    #[test]
    fn cow_stays_inside_the_pasture() {
        let small = Rect::new(0, 0, 300, 300);
        let mut cow = cow();
        for _ in 0..600 {
            cow.update(0.1, small);
            let center = cow.center();
            assert!(center.x >= 0.0 && center.x <= 300.0);
            assert!(center.y >= 0.0 && center.y <= 300.0);
        }
    }

    #[test]
    fn head_toward_picks_dominant_axis() {
        let mut cow = cow();
        cow.head_toward(Vec2::new(-3.0, 1.0));
        cow.update(0.1, pasture());
        assert!(cow.sprite().velocity().x < 0.0);
        assert_eq!(cow.sprite().velocity().y, 0.0);
    }
}
