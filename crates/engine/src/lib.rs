//! Engine: the explicit run-loop controller for one game.
//!
//! # Invariants
//! - Lifecycle is `Initializing → Running → Ended`; frames only run while `Running`.
//! - Each frame runs in a fixed order: rotate, fire, asteroids, projectiles,
//!   spawning, render, player collision, HUD.
//! - Final score and time are persisted exactly once, on a player hit. A
//!   cancelled game persists nothing.
//! - The engine never blocks: no I/O inside a frame except the one-time
//!   results hand-off at game over.

mod clock;
mod engine;
mod error;
mod hud;
mod results;

pub use clock::{Clock, FixedStepClock, SystemClock};
pub use engine::{Engine, EngineState, FrameOutcome, GameResult, entropy_seed};
pub use error::EngineError;
pub use hud::{Hud, HudText, NullHud, format_clock, format_score};
pub use results::{
    FINAL_SCORE_KEY, FINAL_TIME_KEY, JsonFileResults, MemoryResults, ResultsError, ResultsStore,
    load_result, save_result,
};
