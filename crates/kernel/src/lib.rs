//! Game kernel: authoritative world state and per-frame simulation.
//!
//! # Invariants
//! - The `World` exclusively owns every entity; entities never reference it back.
//! - All state mutations flow through the World's phase operations, run once
//!   per frame in a fixed order.
//! - Given the same seed, config, viewport and input sequence, a run is
//!   reproducible.

pub mod asteroid;
pub mod body;
pub mod config;
pub mod player;
pub mod projectile;
pub mod rng;
pub mod world;

pub use asteroid::{ASTEROID_MESH, Asteroid, SizeTier, TierTraits};
pub use body::Body;
pub use config::{ConfigError, GameConfig, WrapMode};
pub use player::{PLAYER_MESH, Player};
pub use projectile::{PROJECTILE_MESH, Projectile};
pub use rng::Rng;
pub use world::{GameEvent, World};
