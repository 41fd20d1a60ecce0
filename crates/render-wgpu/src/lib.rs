//! wgpu render backend for the asteroids batch renderer.
//!
//! # Invariants
//! - Device, pipeline and buffers are created once; failures there are fatal and
//!   surface as `RenderError` before the first frame.
//! - The index buffer is static and sized for the batch capacity.
//! - One render pass and one `draw_indexed` per frame. The egui overlay is a
//!   separate pass owned by the host.

mod backend;
mod gpu;
mod shaders;

pub use backend::WgpuBackend;
pub use gpu::GpuContext;
