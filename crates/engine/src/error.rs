use asteroids_kernel::ConfigError;
use asteroids_render::RenderError;

use crate::engine::EngineState;
use crate::results::ResultsError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("results error: {0}")]
    Results(#[from] ResultsError),
    #[error("engine is not running (state: {0:?})")]
    NotRunning(EngineState),
    #[error("game already ended")]
    AlreadyEnded,
}
