use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One model-space vertex: position plus an RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: DVec2,
    pub color: [f32; 3],
}

impl MeshVertex {
    pub const fn new(x: f64, y: f64, color: [f32; 3]) -> Self {
        Self {
            position: DVec2::new(x, y),
            color,
        }
    }
}

/// A single-triangle mesh. Every drawable in the game is exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: [MeshVertex; 3],
}

impl TriangleMesh {
    pub const fn new(a: MeshVertex, b: MeshVertex, c: MeshVertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Average of the three model-space positions. Rotation pivots here.
    pub fn centroid(&self) -> DVec2 {
        let [a, b, c] = self.vertices;
        (a.position + b.position + c.position) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_symmetric_triangle() {
        let m = TriangleMesh::new(
            MeshVertex::new(0.0, -3.0, [1.0; 3]),
            MeshVertex::new(-3.0, 3.0, [1.0; 3]),
            MeshVertex::new(3.0, 3.0, [1.0; 3]),
        );
        assert_eq!(m.centroid(), DVec2::new(0.0, 1.0));
    }
}
