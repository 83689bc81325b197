//! Cannon Arena - a tick-driven artillery arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring, missions)
//! - `config`: World configuration and validation
//!
//! Rendering, input capture and frame pacing live outside this crate. A
//! driver feeds one [`sim::TickInput`] per frame and draws from
//! [`sim::RenderSnapshot`].

pub mod config;
pub mod sim;

pub use config::{ConfigError, WorldConfig};

use glam::DVec2;

/// Reference constants (defaults for [`WorldConfig`])
pub mod consts {
    /// Reference tick rate supplied by the driver
    pub const TICK_HZ: u32 = 30;
    /// Integration time step per tick
    pub const TICK_STEP: f64 = 1.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f64 = 800.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Per-tick gravity applied to shell velocity
    pub const GRAVITY: f64 = 2.0;

    /// Wall bounce: normal component is flipped and scaled by this
    pub const RESTITUTION_ORTHOGONAL: f64 = 0.8;
    /// Wall bounce: tangential component is scaled by this
    pub const RESTITUTION_PARALLEL: f64 = 0.9;

    /// Shell defaults
    pub const SHELL_RADIUS: f64 = 20.0;
    /// Base lifetime for timed shells; the tick limit is this times `LIFETIME_SCALE`
    pub const SHELL_BASE_LIFETIME: u32 = 10;
    pub const LIFETIME_SCALE: u32 = 5;
    /// A standard shell dies once its squared speed drops below this near the floor
    pub const SHELL_REST_SPEED_SQ: f64 = 4.0;
    /// A shell counts as landed once its cubed speed drops below this near the floor
    pub const SHELL_LANDED_SPEED_CUBED: f64 = 27.0;

    /// Cannon defaults
    pub const MIN_POWER: f64 = 10.0;
    pub const MAX_POWER: f64 = 50.0;
    pub const CHARGE_INCREMENT: f64 = 2.0;
    pub const PAN_STEP: f64 = 5.0;
    /// Cannon center never pans closer than this to a side wall
    pub const WALL_MARGIN: f64 = 30.0;
    pub const FOOTPRINT_WIDTH: f64 = 50.0;
    pub const FOOTPRINT_HEIGHT: f64 = 30.0;
    /// Turret cover circle (projectile hit body)
    pub const TURRET_RADIUS: f64 = 15.0;
    pub const TURRET_OFFSET_Y: f64 = 5.0;
    /// Barrel half-width for the rendered polygon
    pub const BARREL_HALF_WIDTH: f64 = 5.0;

    /// Target defaults
    pub const TARGETS_PER_MISSION: u32 = 3;
    pub const MAX_TARGET_RADIUS: i64 = 30;
    /// Orbit phase step multiplier (phase is in units of pi radians)
    pub const ORBIT_PHASE_STEP: f64 = 0.03;
    pub const ORBIT_INITIAL_PHASE: f64 = 1.0;

    /// Bomb defaults
    pub const BOMB_SPAWN_CHANCE: f64 = 0.005;
    pub const BOMB_GRAVITY: f64 = 1.0;
    pub const BOMB_RADIUS: f64 = 8.0;
    pub const BOMB_DRIFT_X: f64 = 1.5;
    pub const BOMB_DRIFT_Y: f64 = 1.0;

    /// Autonomous cannon fires on one press edge in this many
    pub const AUTONOMOUS_FIRE_ODDS: u32 = 3;
}

/// Angle (radians) of the direction from `from` toward `to`
#[inline]
pub fn angle_to(from: DVec2, to: DVec2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    (a - b).length()
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_to() {
        let origin = DVec2::new(10.0, 10.0);
        assert!((angle_to(origin, DVec2::new(20.0, 10.0))).abs() < 1e-12);
        // y grows downward, so "up" on screen is -pi/2
        assert!((angle_to(origin, DVec2::new(10.0, 0.0)) + FRAC_PI_2).abs() < 1e-12);
        assert!((angle_to(origin, DVec2::new(0.0, 10.0)) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_distance() {
        assert!((distance(DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }
}
