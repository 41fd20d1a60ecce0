use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Viewport dimensions in physical pixels.
///
/// Both the simulation (wrap and off-screen bounds) and the renderer (canvas
/// center) derive their extents from this value, so a resize only has to
/// replace it in one place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    pub fn half_height(&self) -> f64 {
        self.height * 0.5
    }

    /// Half extents as a vector: world bounds are `[-half, half]` on each axis.
    pub fn half_extents(&self) -> DVec2 {
        DVec2::new(self.half_width(), self.half_height())
    }

    /// Canvas-space position of the world origin.
    pub fn center(&self) -> DVec2 {
        self.half_extents()
    }

    /// Convert a canvas-space point (top-left origin) to world space.
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        screen - self.center()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_extents_and_center() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(v.half_width(), 400.0);
        assert_eq!(v.half_height(), 300.0);
        assert_eq!(v.center(), DVec2::new(400.0, 300.0));
    }

    #[test]
    fn screen_to_world_is_centered() {
        let v = Viewport::new(1000.0, 500.0);
        assert_eq!(v.screen_to_world(DVec2::new(500.0, 250.0)), DVec2::ZERO);
        assert_eq!(
            v.screen_to_world(DVec2::new(0.0, 0.0)),
            DVec2::new(-500.0, -250.0)
        );
    }
}
