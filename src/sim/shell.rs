//! Shells: the projectiles fired by cannons
//!
//! Every kind shares one integration step and the same inelastic wall
//! bounce; the kind only decides how much gravity applies and which rule
//! ends the shell's life.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::Rgb;
use crate::config::{Restitution, WorldConfig};
use crate::consts::{SHELL_LANDED_SPEED_CUBED, SHELL_REST_SPEED_SQ};

/// Color of a shell until the game state paints it on registration
const UNPAINTED: Rgb = [255, 255, 255];

/// Shell kinds, cycled by the weapon key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShellKind {
    /// Full gravity, dies when it comes to rest on the floor
    #[default]
    Standard,
    /// Ignores gravity, dies when its timer runs out
    Powerful,
    /// Double gravity, dies when its timer runs out
    Heavy,
}

impl ShellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShellKind::Standard => "Standard",
            ShellKind::Powerful => "Powerful",
            ShellKind::Heavy => "Heavy",
        }
    }

    /// Multiplier applied to the world gravity
    pub fn gravity_scale(&self) -> f64 {
        match self {
            ShellKind::Standard => 1.0,
            ShellKind::Powerful => 0.0,
            ShellKind::Heavy => 2.0,
        }
    }

    /// Whether this kind expires on an age timer
    pub fn is_timed(&self) -> bool {
        !matches!(self, ShellKind::Standard)
    }

    /// Next kind in the weapon cycle
    pub fn next(&self) -> Self {
        match self {
            ShellKind::Standard => ShellKind::Powerful,
            ShellKind::Powerful => ShellKind::Heavy,
            ShellKind::Heavy => ShellKind::Standard,
        }
    }
}

/// Which cannon fired a shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Autonomous,
}

/// A shell in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shell {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub kind: ShellKind,
    pub owner: Owner,
    pub color: Rgb,
    pub alive: bool,
    /// Set once the shell settles near the floor; never cleared
    pub landed: bool,
    /// Ticks advanced so far
    pub age: u32,
    /// Tick limit for timed kinds
    pub lifetime: u32,
}

impl Shell {
    pub fn new(pos: DVec2, vel: DVec2, kind: ShellKind, owner: Owner, config: &WorldConfig) -> Self {
        Self {
            pos,
            vel,
            radius: config.shell_radius,
            kind,
            owner,
            color: UNPAINTED,
            alive: true,
            landed: false,
            age: 0,
            lifetime: config.shell_lifetime_ticks(),
        }
    }

    /// Integrate one step: gravity, motion, wall bounce, then liveness
    pub fn advance(&mut self, dt: f64, gravity: f64, config: &WorldConfig) {
        if !self.alive {
            return;
        }

        self.vel.y += gravity * self.kind.gravity_scale();
        self.pos += self.vel * dt;
        self.reflect_off_walls(config.arena, config.restitution);
        self.age = self.age.saturating_add(1);

        let near_floor = self.pos.y > config.arena.y - 2.0 * self.radius;
        let speed_sq = self.vel.length_squared();

        if near_floor && speed_sq * speed_sq.sqrt() < SHELL_LANDED_SPEED_CUBED {
            self.landed = true;
        }

        let expired = if self.kind.is_timed() {
            self.age > self.lifetime
        } else {
            near_floor && speed_sq < SHELL_REST_SPEED_SQ
        };
        if expired {
            self.alive = false;
        }
    }

    /// Inelastic bounce off each arena edge, one axis at a time
    fn reflect_off_walls(&mut self, extent: DVec2, restitution: Restitution) {
        for axis in 0..2 {
            let other = 1 - axis;
            let low = self.radius;
            let high = extent[axis] - self.radius;

            let clamped = if self.pos[axis] < low {
                low
            } else if self.pos[axis] > high {
                high
            } else {
                continue;
            };

            self.pos[axis] = clamped;
            self.vel[axis] = -self.vel[axis] * restitution.orthogonal;
            self.vel[other] *= restitution.parallel;
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    fn shell(pos: DVec2, vel: DVec2, kind: ShellKind) -> Shell {
        Shell::new(pos, vel, kind, Owner::Player, &WorldConfig::default())
    }

    #[test]
    fn test_reflect_right_wall() {
        let config = WorldConfig::default();
        let mut s = shell(DVec2::new(790.0, 300.0), DVec2::new(10.0, 4.0), ShellKind::Powerful);
        s.advance(1.0, config.gravity, &config);

        assert_eq!(s.pos.x, 780.0);
        assert!((s.pos.y - 304.0).abs() < 1e-12);
        assert!((s.vel.x - (-8.0)).abs() < 1e-12);
        // Tangential component damped, not inverted
        assert!((s.vel.y - 3.6).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_top_wall() {
        let config = WorldConfig::default();
        let mut s = shell(DVec2::new(400.0, 25.0), DVec2::new(-5.0, -10.0), ShellKind::Powerful);
        s.advance(1.0, config.gravity, &config);

        assert_eq!(s.pos.y, 20.0);
        assert!((s.vel.y - 8.0).abs() < 1e-12);
        assert!((s.vel.x - (-4.5)).abs() < 1e-12);
    }

    #[test]
    fn test_gravity_per_kind() {
        let config = WorldConfig::default();
        let start = DVec2::new(400.0, 300.0);

        let mut standard = shell(start, DVec2::ZERO, ShellKind::Standard);
        let mut powerful = shell(start, DVec2::ZERO, ShellKind::Powerful);
        let mut heavy = shell(start, DVec2::ZERO, ShellKind::Heavy);
        for s in [&mut standard, &mut powerful, &mut heavy] {
            s.advance(1.0, config.gravity, &config);
        }

        assert_eq!(standard.vel.y, 2.0);
        assert_eq!(powerful.vel.y, 0.0);
        assert_eq!(heavy.vel.y, 4.0);
        assert_eq!(heavy.pos.y, 304.0);
    }

    #[test]
    fn test_powerful_lifetime_expiry() {
        let config = WorldConfig::default();
        let mut s = shell(DVec2::new(400.0, 300.0), DVec2::ZERO, ShellKind::Powerful);
        assert_eq!(s.lifetime, 50);

        for _ in 0..50 {
            s.advance(1.0, config.gravity, &config);
            assert!(s.alive);
        }
        s.advance(1.0, config.gravity, &config);
        assert!(!s.alive);
    }

    #[test]
    fn test_heavy_lifetime_expiry() {
        let config = WorldConfig {
            shell_base_lifetime: 2,
            ..Default::default()
        };
        let mut s = Shell::new(
            DVec2::new(400.0, 100.0),
            DVec2::new(3.0, 0.0),
            ShellKind::Heavy,
            Owner::Player,
            &config,
        );
        for _ in 0..10 {
            s.advance(1.0, config.gravity, &config);
        }
        assert!(s.alive);
        s.advance(1.0, config.gravity, &config);
        assert!(!s.alive);
    }

    #[test]
    fn test_standard_rests_on_floor() {
        let config = WorldConfig::default();
        let mut s = shell(DVec2::new(400.0, 580.0), DVec2::new(1.0, 0.0), ShellKind::Standard);
        s.advance(1.0, config.gravity, &config);
        // vy: 0 + 2 -> clamp -> -1.6, vx: 0.9; speed^2 < 4 at the floor
        assert!(!s.alive);
        assert!(s.landed);
    }

    #[test]
    fn test_standard_airborne_stays_alive() {
        let config = WorldConfig::default();
        let mut s = shell(DVec2::new(400.0, 300.0), DVec2::ZERO, ShellKind::Standard);
        s.advance(1.0, config.gravity, &config);
        assert!(s.alive);
        assert!(!s.landed);
    }

    #[test]
    fn test_dead_shell_is_frozen() {
        let config = WorldConfig::default();
        let mut s = shell(DVec2::new(400.0, 300.0), DVec2::new(5.0, 5.0), ShellKind::Standard);
        s.alive = false;
        s.advance(1.0, config.gravity, &config);
        assert_eq!(s.pos, DVec2::new(400.0, 300.0));
    }

    #[test]
    fn test_straight_up_shot_round_trip() {
        let config = WorldConfig::default();
        let power = 50.0;
        let angle = -FRAC_PI_2;
        let start = DVec2::new(400.0, 570.0);
        let mut s = shell(
            start,
            DVec2::new(power * angle.cos(), power * angle.sin()),
            ShellKind::Standard,
        );

        // Rise until the top wall clamps it
        let mut ticks = 0;
        while s.pos.y > s.radius {
            s.advance(1.0, config.gravity, &config);
            ticks += 1;
            assert!(ticks < 100, "shell never reached the top wall");
        }
        assert_eq!(s.pos.y, s.radius);
        assert!(s.vel.y > 0.0);

        // Fall back to the firing height
        while s.pos.y < start.y - s.radius {
            let before = s.pos.y;
            s.advance(1.0, config.gravity, &config);
            assert!(s.pos.y > before, "shell bounced again before returning");
        }
        assert!((s.pos.y - start.y).abs() <= s.radius);
        assert!(s.speed() < power);
        assert!(s.alive);

        // Eventually settles on the floor and dies
        let mut ticks = 0;
        while s.alive {
            s.advance(1.0, config.gravity, &config);
            ticks += 1;
            assert!(ticks < 2000, "shell never came to rest");
        }
        assert!(s.speed() * s.speed() < 4.0);
        assert!(s.pos.y > config.arena.y - 2.0 * s.radius);
    }

    #[test]
    fn test_kind_cycle() {
        let k = ShellKind::default();
        assert_eq!(k, ShellKind::Standard);
        assert_eq!(k.next(), ShellKind::Powerful);
        assert_eq!(k.next().next(), ShellKind::Heavy);
        assert_eq!(k.next().next().next(), ShellKind::Standard);
    }

    proptest! {
        #[test]
        fn prop_shell_stays_inside_arena(
            x in 20.0f64..=780.0,
            y in 20.0f64..=580.0,
            vx in -200.0f64..200.0,
            vy in -200.0f64..200.0,
        ) {
            let config = WorldConfig::default();
            let mut s = shell(DVec2::new(x, y), DVec2::new(vx, vy), ShellKind::Powerful);
            s.advance(1.0, config.gravity, &config);

            prop_assert!(s.pos.x >= s.radius && s.pos.x <= config.arena.x - s.radius);
            prop_assert!(s.pos.y >= s.radius && s.pos.y <= config.arena.y - s.radius);
        }

        #[test]
        fn prop_single_axis_bounce_scales_exactly(
            y in 100.0f64..=500.0,
            vx in 1.0f64..100.0,
            vy in -50.0f64..50.0,
        ) {
            // Start at the right wall so only the x axis can bounce
            let config = WorldConfig::default();
            let mut s = shell(DVec2::new(780.0, y), DVec2::new(vx, vy), ShellKind::Powerful);
            s.advance(1.0, config.gravity, &config);

            prop_assert_eq!(s.pos.x, 780.0);
            prop_assert!((s.vel.x + vx * 0.8).abs() < 1e-9);
            prop_assert!((s.vel.y - vy * 0.9).abs() < 1e-9);
        }
    }
}
