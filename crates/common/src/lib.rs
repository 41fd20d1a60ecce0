//! Shared types used by the simulation kernel and the renderers.
//!
//! # Invariants
//! - World space is centered on the canvas: (0,0) is the middle of the viewport,
//!   Y grows downward.
//! - Meshes are single triangles in model space; color passes through untouched.

pub mod mesh;
pub mod types;

pub use mesh::{MeshVertex, TriangleMesh};
pub use types::Viewport;
