use asteroids_common::{MeshVertex, TriangleMesh};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::body::Body;

const HULL: [f32; 3] = [0.6, 0.9, 1.0];

/// Ship triangle pointing up (negative Y) at zero rotation.
pub static PLAYER_MESH: TriangleMesh = TriangleMesh::new(
    MeshVertex::new(0.0, -20.0, HULL),
    MeshVertex::new(-12.0, 12.0, HULL),
    MeshVertex::new(12.0, 12.0, HULL),
);

/// The ship. It never moves: it sits at the world origin and only turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rotation: f64,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> DVec2 {
        DVec2::ZERO
    }

    pub fn rotate(&mut self, delta: f64) {
        self.rotation += delta;
    }

    /// Unit vector the ship's nose points along: `(sin r, -cos r)`.
    pub fn forward(&self) -> DVec2 {
        DVec2::new(self.rotation.sin(), -self.rotation.cos())
    }
}

impl Body for Player {
    fn position(&self) -> DVec2 {
        Player::position(self)
    }

    fn update(&mut self) {}

    fn mesh(&self) -> &'static TriangleMesh {
        &PLAYER_MESH
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn zero_rotation_points_up() {
        let p = Player::new();
        let f = p.forward();
        assert!(f.x.abs() < 1e-12);
        assert!((f.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn quarter_turn_points_right() {
        let mut p = Player::new();
        p.rotate(FRAC_PI_2);
        let f = p.forward();
        assert!((f.x - 1.0).abs() < 1e-12);
        assert!(f.y.abs() < 1e-12);
    }

    #[test]
    fn player_stays_at_origin() {
        let mut p = Player::new();
        p.rotate(1.0);
        Body::update(&mut p);
        assert_eq!(Body::position(&p), DVec2::ZERO);
    }
}
