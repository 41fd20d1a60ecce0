//! Rendering adapter: turns world state into one batched triangle draw per frame.
//!
//! # Invariants
//! - The renderer never mutates world truth; it only reads entity transforms.
//! - Each drawable is one triangle instance (3 vertices of `x, y, r, g, b`).
//! - The index buffer is built once for the full batch capacity and never
//!   regenerated.
//! - A frame is `begin` → `draw`* → `end`, and `end` issues exactly one indexed
//!   draw covering `3 × instance_count` vertices.
//!
//! The GPU lives behind [`RenderBackend`]; [`RecordingBackend`] is the headless
//! implementation used by tests and the CLI.

mod backend;
mod batch;
mod camera;
mod error;
mod renderer;

pub use backend::{RecordingBackend, RenderBackend};
pub use batch::{
    FLOATS_PER_INSTANCE, FLOATS_PER_VERTEX, InstanceBatch, MAX_INSTANCES, VERTICES_PER_INSTANCE,
    index_buffer, transform_triangle,
};
pub use camera::Camera;
pub use error::RenderError;
pub use renderer::BatchRenderer;
