/// Renderer failures. Everything except `CapacityExceeded` is fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("rendering context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error("pipeline creation failed: {0}")]
    PipelineCreation(String),
    #[error("instance batch full ({capacity} instances)")]
    CapacityExceeded { capacity: usize },
    #[error("no render target set for this frame")]
    NoTarget,
    #[error("surface error: {0}")]
    Surface(String),
}
