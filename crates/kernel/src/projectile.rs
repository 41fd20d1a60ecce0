use asteroids_common::{MeshVertex, TriangleMesh};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::body::Body;

const RED: [f32; 3] = [1.0, 0.0, 0.0];

/// Tiny red triangle, drawn unscaled and unrotated.
pub static PROJECTILE_MESH: TriangleMesh = TriangleMesh::new(
    MeshVertex::new(0.0, -2.0, RED),
    MeshVertex::new(-2.0, 2.0, RED),
    MeshVertex::new(2.0, 2.0, RED),
);

/// A shot travelling in a straight line until it leaves the screen or hits
/// something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: DVec2,
    pub velocity: DVec2,
}

impl Projectile {
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self { position, velocity }
    }

    /// Shot leaving a muzzle `muzzle_distance` ahead of `origin` along the unit
    /// vector `forward`.
    pub fn fired_from(origin: DVec2, forward: DVec2, muzzle_distance: f64, speed: f64) -> Self {
        Self::new(origin + forward * muzzle_distance, forward * speed)
    }

    pub fn update(&mut self) {
        self.position += self.velocity;
    }

    /// Outside the `[-w/2, w/2] x [-h/2, h/2]` world bounds. Points on the
    /// boundary are still on screen.
    pub fn is_off_screen(&self, width: f64, height: f64) -> bool {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let p = self.position;
        p.x < -hw || p.x > hw || p.y < -hh || p.y > hh
    }
}

impl Body for Projectile {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn velocity(&self) -> DVec2 {
        self.velocity
    }

    fn update(&mut self) {
        Projectile::update(self);
    }

    fn mesh(&self) -> &'static TriangleMesh {
        &PROJECTILE_MESH
    }
}
