use asteroids_common::TriangleMesh;
use glam::DVec2;

use crate::error::RenderError;

/// `x, y, r, g, b`
pub const FLOATS_PER_VERTEX: usize = 5;
pub const VERTICES_PER_INSTANCE: usize = 3;
pub const FLOATS_PER_INSTANCE: usize = FLOATS_PER_VERTEX * VERTICES_PER_INSTANCE;
/// Default batch capacity in instances.
pub const MAX_INSTANCES: usize = 1000;

/// Transform one model-space triangle into canvas space.
///
/// Each vertex is taken relative to the mesh centroid, scaled, rotated by
/// `rotation` radians, moved back by `centroid × scale` and finally offset by
/// `canvas_center + position`. Spinning therefore pivots on the triangle's own
/// centroid. Colors are copied through untouched.
pub fn transform_triangle(
    mesh: &TriangleMesh,
    canvas_center: DVec2,
    position: DVec2,
    scale: f64,
    rotation: f64,
) -> [f32; FLOATS_PER_INSTANCE] {
    let c = mesh.centroid();
    let (sin, cos) = rotation.sin_cos();
    let offset = canvas_center + position;

    let mut out = [0.0f32; FLOATS_PER_INSTANCE];
    for (slot, vertex) in out.chunks_exact_mut(FLOATS_PER_VERTEX).zip(&mesh.vertices) {
        let d = (vertex.position - c) * scale;
        let rotated = DVec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
        let p = rotated + c * scale + offset;
        slot[0] = p.x as f32;
        slot[1] = p.y as f32;
        slot[2..].copy_from_slice(&vertex.color);
    }
    out
}

/// Index buffer for `capacity` instances: sequential triples `3i, 3i+1, 3i+2`.
pub fn index_buffer(capacity: usize) -> Result<Vec<u16>, RenderError> {
    let vertex_count = capacity * VERTICES_PER_INSTANCE;
    if vertex_count > usize::from(u16::MAX) + 1 {
        return Err(RenderError::CapacityExceeded { capacity });
    }
    Ok((0..vertex_count).map(|i| i as u16).collect())
}

/// Fixed-capacity arena of per-instance vertex data.
///
/// The backing store is allocated once at construction; `reset` only rewinds
/// the cursor. Pushing past capacity is a caller bug: it trips a debug
/// assertion and returns `CapacityExceeded` instead of truncating silently.
#[derive(Debug, Clone)]
pub struct InstanceBatch {
    data: Vec<f32>,
    capacity: usize,
    count: usize,
}

impl InstanceBatch {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity * FLOATS_PER_INSTANCE],
            capacity,
            count: 0,
        }
    }

    pub fn push(&mut self, instance: &[f32; FLOATS_PER_INSTANCE]) -> Result<(), RenderError> {
        debug_assert!(
            self.count < self.capacity,
            "instance batch overflow: capacity {}",
            self.capacity
        );
        if self.count >= self.capacity {
            return Err(RenderError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let start = self.count * FLOATS_PER_INSTANCE;
        self.data[start..start + FLOATS_PER_INSTANCE].copy_from_slice(instance);
        self.count += 1;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Vertices covered by the instances pushed this frame.
    pub fn vertex_count(&self) -> usize {
        self.count * VERTICES_PER_INSTANCE
    }

    /// The filled prefix of the backing store.
    pub fn vertices(&self) -> &[f32] {
        &self.data[..self.count * FLOATS_PER_INSTANCE]
    }
}
