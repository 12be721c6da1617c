//! 2D camera as a plain value owned by whichever screen needs one and passed
//! into draw code explicitly — there is no global camera state.

use drover_core::geometry::Rect;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    position: Vec2,
    viewport: Vec2,
    world: Rect,
}

impl Camera2D {
    /// Camera anchored at the world origin. `world` bounds where the camera
    /// may travel; a world smaller than the viewport pins the camera at the
    /// world origin.
    pub fn new(viewport_width: u32, viewport_height: u32, world: Rect) -> Self {
        let mut camera = Self {
            position: Vec2::new(world.x as f32, world.y as f32),
            viewport: Vec2::new(viewport_width as f32, viewport_height as f32),
            world,
        };
        camera.clamp_to_world();
        camera
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    /// Move the camera by an offset, clamped to the world bounds.
    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
        self.clamp_to_world();
    }

    /// Center the view on a world point, clamped to the world bounds.
    pub fn look_at(&mut self, center: Vec2) {
        self.position = center - self.viewport / 2.0;
        self.clamp_to_world();
    }

    fn clamp_to_world(&mut self) {
        let max_x = (self.world.right() as f32 - self.viewport.x).max(self.world.x as f32);
        let max_y = (self.world.bottom() as f32 - self.viewport.y).max(self.world.y as f32);
        self.position.x = self.position.x.clamp(self.world.x as f32, max_x);
        self.position.y = self.position.y.clamp(self.world.y as f32, max_y);
    }

    pub fn world_to_screen(&self, world_point: Vec2) -> Vec2 {
        world_point - self.position
    }

    pub fn world_to_screen_rect(&self, world_rect: Rect) -> Rect {
        Rect::new(
            world_rect.x - self.position.x as i32,
            world_rect.y - self.position.y as i32,
            world_rect.w,
            world_rect.h,
        )
    }

    /// View rectangle in world coordinates.
    pub fn view_rect(&self) -> Rect {
        Rect::new(
            self.position.x as i32,
            self.position.y as i32,
            self.viewport.x as i32,
            self.viewport.y as i32,
        )
    }

    /// True when any part of `bounds` is inside the view.
    pub fn is_visible(&self, bounds: Rect) -> bool {
        self.view_rect().intersects(&bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera2D {
        Camera2D::new(800, 480, Rect::new(0, 0, 1600, 960))
    }

    #[test]
    fn world_to_screen_subtracts_camera_position() {
        let mut cam = camera();
        cam.move_by(Vec2::new(100.0, 50.0));
        assert_eq!(
            cam.world_to_screen(Vec2::new(150.0, 80.0)),
            Vec2::new(50.0, 30.0)
        );
    }

    #[test]
    fn move_by_clamps_to_world_bounds() {
        let mut cam = camera();
        cam.move_by(Vec2::new(-500.0, -500.0));
        assert_eq!(cam.position(), Vec2::ZERO);

        cam.move_by(Vec2::new(10_000.0, 10_000.0));
        assert_eq!(cam.position(), Vec2::new(800.0, 480.0));
    }

    #[test]
    fn look_at_centers_view() {
        let mut cam = camera();
        cam.look_at(Vec2::new(800.0, 480.0));
        assert_eq!(cam.position(), Vec2::new(400.0, 240.0));
    }

    #[test]
    fn look_at_near_edge_clamps() {
        let mut cam = camera();
        cam.look_at(Vec2::new(0.0, 0.0));
        assert_eq!(cam.position(), Vec2::ZERO);
    }

    #[test]
    fn visibility_against_view_rect() {
        let cam = camera();
        assert!(cam.is_visible(Rect::new(700, 400, 50, 50)));
        assert!(!cam.is_visible(Rect::new(900, 500, 50, 50)));
    }

    #[test]
    fn small_world_pins_camera_at_origin() {
        let cam = Camera2D::new(800, 480, Rect::new(0, 0, 400, 200));
        assert_eq!(cam.position(), Vec2::ZERO);
    }
}
