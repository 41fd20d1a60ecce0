use asteroids_common::{TriangleMesh, Viewport};
use asteroids_kernel::Body;
use glam::DVec2;

use crate::backend::RenderBackend;
use crate::batch::{InstanceBatch, MAX_INSTANCES, transform_triangle};
use crate::camera::Camera;
use crate::error::RenderError;

/// Accumulates one frame of triangle instances and hands them to the backend
/// as a single indexed draw.
#[derive(Debug)]
pub struct BatchRenderer<B> {
    backend: B,
    camera: Camera,
    batch: InstanceBatch,
    viewport: Viewport,
}

impl<B: RenderBackend> BatchRenderer<B> {
    pub fn new(backend: B, viewport: Viewport) -> Self {
        Self::with_capacity(backend, viewport, MAX_INSTANCES)
    }

    pub fn with_capacity(backend: B, viewport: Viewport, capacity: usize) -> Self {
        Self {
            backend,
            camera: Camera::new(viewport),
            batch: InstanceBatch::new(capacity),
            viewport,
        }
    }

    /// New canvas size. Camera and canvas center follow on the next `begin`.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(width = viewport.width, height = viewport.height, "renderer resized");
        self.viewport = viewport;
    }

    /// Start a frame: rewind the batch and refresh the camera transform.
    pub fn begin(&mut self) {
        self.batch.reset();
        self.camera.update(self.viewport);
        self.backend.set_projection_view(self.camera.projection_view());
    }

    /// Append one transformed triangle.
    pub fn draw(
        &mut self,
        mesh: &TriangleMesh,
        position: DVec2,
        scale: f64,
        rotation: f64,
    ) -> Result<(), RenderError> {
        let instance = transform_triangle(mesh, self.viewport.center(), position, scale, rotation);
        self.batch.push(&instance)
    }

    pub fn draw_body<T: Body>(&mut self, body: &T) -> Result<(), RenderError> {
        self.draw(body.mesh(), body.position(), body.scale(), body.rotation())
    }

    /// Upload the frame and issue the one indexed draw. Returns the number of
    /// instances drawn.
    pub fn end(&mut self) -> Result<usize, RenderError> {
        let instances = self.batch.len();
        self.backend.upload_vertices(self.batch.vertices())?;
        self.backend.draw_indexed(self.batch.vertex_count() as u32)?;
        self.batch.reset();
        tracing::trace!(instances, "frame submitted");
        Ok(instances)
    }

    pub fn instance_count(&self) -> usize {
        self.batch.len()
    }

    pub fn capacity(&self) -> usize {
        self.batch.capacity()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
