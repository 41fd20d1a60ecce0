use asteroids_common::Viewport;
use glam::{Mat4, Vec3};

/// Orthographic canvas camera: origin at the top-left corner, Y down, one unit
/// per pixel. Only the viewport dimensions are stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    width: f32,
    height: f32,
}

impl Camera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width as f32,
            height: viewport.height as f32,
        }
    }

    /// Pick up the current viewport. Called every frame.
    pub fn update(&mut self, viewport: Viewport) {
        self.width = viewport.width as f32;
        self.height = viewport.height as f32;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    // Depth range [0, 2] in front of the eye puts the canvas plane (one unit
    // away) at clip depth 0.5.
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, 0.0, 2.0)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_view(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
