use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::asteroid::SizeTier;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How an asteroid that leaves the world bounds re-enters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// One axis per frame, X checked first. A diagonal exit wraps X this frame
    /// and Y on a later one.
    #[default]
    XBeforeY,
    /// Both axes are checked every frame.
    BothAxes,
}

/// Gameplay tuning. All counts are in frames, distances in world units
/// (pixels), angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rotation applied per frame while a turn action is held.
    pub rotation_step: f64,
    /// Frames between shots.
    pub shoot_cooldown_frames: u32,
    pub projectile_speed: f64,
    /// Distance ahead of the ship center where projectiles appear.
    pub muzzle_distance: f64,
    pub player_radius: f64,
    /// Large asteroids spawned before the first frame.
    pub initial_asteroids: usize,
    /// The spawning governor stops adding large asteroids at this count.
    pub max_large_asteroids: usize,
    pub spawn_interval_frames: u32,
    /// Perpendicular velocity factor given to split children.
    pub split_kick: f64,
    /// Hard cap on live projectiles.
    pub max_projectiles: usize,
    /// Hard cap on live asteroids, counting the fragments each one can still produce.
    pub max_asteroids: usize,
    pub wrap_mode: WrapMode,
    /// Fixed RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rotation_step: 0.04,
            shoot_cooldown_frames: 10,
            projectile_speed: 6.0,
            muzzle_distance: 30.0,
            player_radius: 13.0,
            initial_asteroids: 6,
            max_large_asteroids: 8,
            spawn_interval_frames: 60,
            split_kick: 0.25,
            max_projectiles: 64,
            max_asteroids: 256,
            wrap_mode: WrapMode::XBeforeY,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from a YAML (`.yaml`/`.yml`) or JSON (`.json`) file. Missing
    /// fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        let config: Self = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Most drawables a single frame can produce: the ship plus every
    /// projectile and asteroid the caps allow.
    pub fn max_drawables(&self) -> usize {
        1 + self.max_projectiles + self.max_asteroids
    }

    /// Reject configs that could overflow a renderer batch of `capacity`
    /// instances, or that make no sense at all.
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.max_drawables() > capacity {
            return Err(ConfigError::Invalid(format!(
                "1 ship + {} projectiles + {} asteroids exceeds render capacity {capacity}",
                self.max_projectiles, self.max_asteroids
            )));
        }
        let large_weight = SizeTier::Large.budget_weight();
        if self.max_asteroids < large_weight {
            return Err(ConfigError::Invalid(format!(
                "max_asteroids must be at least {large_weight} to fit one large asteroid"
            )));
        }
        for (name, value) in [
            ("rotation_step", self.rotation_step),
            ("projectile_speed", self.projectile_speed),
            ("muzzle_distance", self.muzzle_distance),
            ("player_radius", self.player_radius),
            ("split_kick", self.split_kick),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if self.projectile_speed <= 0.0 {
            return Err(ConfigError::Invalid("projectile_speed must be positive".into()));
        }
        if self.player_radius < 0.0 {
            return Err(ConfigError::Invalid("player_radius must not be negative".into()));
        }
        Ok(())
    }
}
