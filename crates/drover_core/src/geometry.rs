//! Integer rectangles and collision circles shared by input, sprites, and
//! the renderer contract.
//!
//! `Rect` is integer-valued so it can double as a hash key for touch-area
//! input bindings; re-registering the same rectangle overwrites the previous
//! binding rather than duplicating it.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x as f32
            && point.x < self.right() as f32
            && point.y >= self.y as f32
            && point.y < self.bottom() as f32
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn intersects_circle(&self, other: &Circle) -> bool {
        let combined = self.radius + other.radius;
        self.center.distance_squared(other.center) < combined * combined
    }

    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let closest = Vec2::new(
            self.center.x.clamp(rect.x as f32, rect.right() as f32),
            self.center.y.clamp(rect.y as f32, rect.bottom() as f32),
        );
        self.center.distance_squared(closest) <= self.radius * self.radius
    }
}

/// Rotate `point` about `pivot` by `radians`.
pub fn rotate_about(point: Vec2, pivot: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    let offset = point - pivot;
    pivot
        + Vec2::new(
            offset.x * cos - offset.y * sin,
            offset.x * sin + offset.y * cos,
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_intersection_overlap_and_separation() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(20, 20, 4, 4);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn rect_contains_point_half_open() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains_point(Vec2::new(0.0, 0.0)));
        assert!(rect.contains_point(Vec2::new(9.9, 9.9)));
        assert!(!rect.contains_point(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn circle_circle_intersection() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 2.0);
        let b = Circle::new(Vec2::new(3.0, 0.0), 1.5);
        let c = Circle::new(Vec2::new(10.0, 0.0), 1.0);
        assert!(a.intersects_circle(&b));
        assert!(!a.intersects_circle(&c));
    }

    #[test]
    fn circle_rect_intersection_includes_contained_center() {
        let rect = Rect::new(0, 0, 10, 10);
        let inside = Circle::new(Vec2::new(5.0, 5.0), 1.0);
        let grazing = Circle::new(Vec2::new(12.0, 5.0), 3.0);
        let outside = Circle::new(Vec2::new(20.0, 20.0), 2.0);
        assert!(inside.intersects_rect(&rect));
        assert!(grazing.intersects_rect(&rect));
        assert!(!outside.intersects_rect(&rect));
    }

    #[test]
    fn rotate_about_quarter_turn() {
        let rotated = rotate_about(
            Vec2::new(1.0, 0.0),
            Vec2::ZERO,
            std::f32::consts::FRAC_PI_2,
        );
        assert!((rotated.x - 0.0).abs() < 1e-6);
        assert!((rotated.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_about_offset_pivot() {
        let rotated = rotate_about(
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            std::f32::consts::PI,
        );
        assert!((rotated.x - 0.0).abs() < 1e-6);
        assert!((rotated.y - 1.0).abs() < 1e-6);
    }
}
