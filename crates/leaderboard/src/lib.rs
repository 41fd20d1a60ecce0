//! Leaderboard: validate submitted scores and keep them in SQLite.
//!
//! # Invariants
//! - Stored score and time are whole, non-negative numbers; a submission with
//!   either field invalid writes nothing.
//! - Listing order is score descending, then earliest submission first.

mod store;
mod validate;

pub use store::{Leaderboard, ScoreEntry};
pub use validate::{
    DEFAULT_LIMIT, DEFAULT_NAME, MAX_LIMIT, MAX_NAME_CHARS, NewScore, ValidationError,
    clamp_limit, validate_submission,
};

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
