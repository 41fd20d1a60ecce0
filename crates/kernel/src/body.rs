use asteroids_common::TriangleMesh;
use glam::DVec2;

/// What every simulated, drawable object exposes.
///
/// Renderers only need `position`, `mesh`, `scale` and `rotation`; the
/// simulation drives `update` once per frame.
pub trait Body {
    fn position(&self) -> DVec2;

    fn velocity(&self) -> DVec2 {
        DVec2::ZERO
    }

    /// Advance one frame of linear motion.
    fn update(&mut self);

    fn mesh(&self) -> &'static TriangleMesh;

    fn scale(&self) -> f64 {
        1.0
    }

    fn rotation(&self) -> f64 {
        0.0
    }
}
