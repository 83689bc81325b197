//! World configuration
//!
//! Every tunable the simulation reads lives here. The config is built once,
//! validated, and then passed by reference into entity operations.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Arena extent must be positive and finite, got {width}x{height}")]
    ArenaExtent { width: f64, height: f64 },

    #[error("Arena {width}x{height} is too small for entities of radius {radius}")]
    ArenaTooSmall { width: f64, height: f64, radius: f64 },

    #[error("Minimum power {min} exceeds maximum power {max}")]
    PowerRange { min: f64, max: f64 },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("Probability {field} must lie in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Restitution factors applied on a wall bounce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Restitution {
    /// Scale for the velocity component normal to the wall (sign is flipped)
    pub orthogonal: f64,
    /// Scale for the velocity component along the wall
    pub parallel: f64,
}

impl Default for Restitution {
    fn default() -> Self {
        Self {
            orthogonal: RESTITUTION_ORTHOGONAL,
            parallel: RESTITUTION_PARALLEL,
        }
    }
}

/// Immutable world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// RNG seed for the session
    pub seed: u64,

    // === Arena ===
    /// Arena width and height (origin top-left, y down)
    pub arena: DVec2,
    /// Per-tick gravity added to shell velocity
    pub gravity: f64,
    /// Wall bounce factors for shells
    pub restitution: Restitution,

    // === Shells ===
    pub shell_radius: f64,
    /// Base lifetime for Powerful/Heavy shells (tick limit is 5x this)
    pub shell_base_lifetime: u32,

    // === Cannons ===
    pub min_power: f64,
    pub max_power: f64,
    /// Power added per tick while charging
    pub charge_increment: f64,
    /// Horizontal distance per tick while a pan key is held
    pub pan_step: f64,
    /// Cannon keep-out distance from side walls
    pub wall_margin: f64,
    /// Player cannon mount point
    pub player_start: DVec2,
    /// Autonomous cannon mount point
    pub autonomous_start: DVec2,
    /// Autonomous cannon patrol velocity (per tick)
    pub autonomous_velocity: DVec2,
    /// Autonomous cannon fires on one press edge in this many
    pub autonomous_fire_odds: u32,

    // === Missions ===
    /// Each mission spawns this many of every target kind
    pub targets_per_mission: u32,

    // === Bombs ===
    /// Chance per live target per tick of dropping a bomb
    pub bomb_spawn_chance: f64,
    pub bomb_gravity: f64,
    pub bomb_radius: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,

            arena: DVec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            gravity: GRAVITY,
            restitution: Restitution::default(),

            shell_radius: SHELL_RADIUS,
            shell_base_lifetime: SHELL_BASE_LIFETIME,

            min_power: MIN_POWER,
            max_power: MAX_POWER,
            charge_increment: CHARGE_INCREMENT,
            pan_step: PAN_STEP,
            wall_margin: WALL_MARGIN,
            player_start: DVec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT - 30.0),
            autonomous_start: DVec2::new(100.0, 100.0),
            autonomous_velocity: DVec2::new(3.0, 1.5),
            autonomous_fire_odds: AUTONOMOUS_FIRE_ODDS,

            targets_per_mission: TARGETS_PER_MISSION,

            bomb_spawn_chance: BOMB_SPAWN_CHANCE,
            bomb_gravity: BOMB_GRAVITY,
            bomb_radius: BOMB_RADIUS,
        }
    }
}

impl WorldConfig {
    /// Default config with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded world config ({}x{}, seed {})",
            config.arena.x,
            config.arena.y,
            config.seed
        );
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.arena.x, self.arena.y);
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::ArenaExtent { width, height });
        }

        let largest = self
            .shell_radius
            .max(MAX_TARGET_RADIUS as f64)
            .max(self.bomb_radius)
            .max(self.wall_margin);
        if width <= 2.0 * largest || height <= 2.0 * largest {
            return Err(ConfigError::ArenaTooSmall {
                width,
                height,
                radius: largest,
            });
        }

        if self.min_power > self.max_power {
            return Err(ConfigError::PowerRange {
                min: self.min_power,
                max: self.max_power,
            });
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("min_power", self.min_power),
            ("charge_increment", self.charge_increment),
            ("pan_step", self.pan_step),
            ("wall_margin", self.wall_margin),
            ("bomb_gravity", self.bomb_gravity),
            ("restitution.orthogonal", self.restitution.orthogonal),
            ("restitution.parallel", self.restitution.parallel),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let positive = [
            ("shell_radius", self.shell_radius),
            ("bomb_radius", self.bomb_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.bomb_spawn_chance) {
            return Err(ConfigError::Probability {
                field: "bomb_spawn_chance",
                value: self.bomb_spawn_chance,
            });
        }
        if self.autonomous_fire_odds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "autonomous_fire_odds",
                value: 0.0,
            });
        }

        Ok(())
    }

    /// Tick limit for timed shells
    pub fn shell_lifetime_ticks(&self) -> u32 {
        self.shell_base_lifetime.saturating_mul(LIFETIME_SCALE)
    }
}
