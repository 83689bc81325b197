//! Targets: what the player is shooting at

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::collision::circles_overlap;
use super::shell::Shell;
use super::state::Rgb;
use crate::config::WorldConfig;
use crate::consts::{ORBIT_INITIAL_PHASE, ORBIT_PHASE_STEP};

/// Motion pattern of a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetKind {
    Stationary,
    /// Straight-line drift, bouncing off the arena edges without losing speed
    Patrolling { vel: DVec2 },
    /// Circles a fixed center; `phase` is measured in units of pi radians
    Orbiting {
        center: DVec2,
        orbit_radius: f64,
        phase: f64,
        angular_speed: f64,
        clockwise: bool,
    },
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Stationary => "Stationary",
            TargetKind::Patrolling { .. } => "Patrolling",
            TargetKind::Orbiting { .. } => "Orbiting",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub pos: DVec2,
    pub radius: f64,
    pub color: Rgb,
    pub kind: TargetKind,
}

impl Target {
    pub fn stationary(pos: DVec2, radius: f64, color: Rgb) -> Self {
        Self {
            pos,
            radius,
            color,
            kind: TargetKind::Stationary,
        }
    }

    pub fn patrolling(pos: DVec2, radius: f64, vel: DVec2, color: Rgb) -> Self {
        Self {
            pos,
            radius,
            color,
            kind: TargetKind::Patrolling { vel },
        }
    }

    /// Orbiting target; starts half a turn around from phase zero
    pub fn orbiting(
        center: DVec2,
        radius: f64,
        orbit_radius: f64,
        angular_speed: f64,
        clockwise: bool,
        color: Rgb,
    ) -> Self {
        Self {
            pos: orbit_point(center, orbit_radius, ORBIT_INITIAL_PHASE),
            radius,
            color,
            kind: TargetKind::Orbiting {
                center,
                orbit_radius,
                phase: ORBIT_INITIAL_PHASE,
                angular_speed,
                clockwise,
            },
        }
    }

    pub fn advance(&mut self, config: &WorldConfig) {
        match &mut self.kind {
            TargetKind::Stationary => {}
            TargetKind::Patrolling { vel } => {
                self.pos += *vel;
                for axis in 0..2 {
                    let past_high = self.pos[axis] + self.radius > config.arena[axis];
                    let past_low = self.pos[axis] - self.radius < 0.0;
                    if (past_high && vel[axis] > 0.0) || (past_low && vel[axis] < 0.0) {
                        vel[axis] = -vel[axis];
                    }
                }
            }
            TargetKind::Orbiting {
                center,
                orbit_radius,
                phase,
                angular_speed,
                clockwise,
            } => {
                let direction = if *clockwise { 1.0 } else { -1.0 };
                *phase += *angular_speed * ORBIT_PHASE_STEP * direction;
                self.pos = orbit_point(*center, *orbit_radius, *phase);
            }
        }
    }

    /// A shell hits when the circles touch or overlap
    pub fn check_collision(&self, shell: &Shell) -> bool {
        circles_overlap(self.pos, self.radius, shell.pos, shell.radius)
    }
}

#[inline]
fn orbit_point(center: DVec2, orbit_radius: f64, phase: f64) -> DVec2 {
    center + crate::polar_to_cartesian(orbit_radius, PI * phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shell::{Owner, ShellKind};

    const WHITE: Rgb = [255, 255, 255];

    #[test]
    fn test_stationary_does_not_move() {
        let config = WorldConfig::default();
        let mut t = Target::stationary(DVec2::new(200.0, 200.0), 15.0, WHITE);
        for _ in 0..10 {
            t.advance(&config);
        }
        assert_eq!(t.pos, DVec2::new(200.0, 200.0));
    }

    #[test]
    fn test_patrolling_bounces_without_damping() {
        let config = WorldConfig::default();
        let mut t = Target::patrolling(DVec2::new(788.0, 300.0), 10.0, DVec2::new(2.0, -1.0), WHITE);
        t.advance(&config); // x = 790, touching
        t.advance(&config); // x = 792, past the wall: flip
        assert_eq!(t.pos, DVec2::new(792.0, 298.0));
        assert_eq!(t.kind, TargetKind::Patrolling { vel: DVec2::new(-2.0, -1.0) });
        t.advance(&config);
        assert_eq!(t.pos, DVec2::new(790.0, 297.0));
    }

    #[test]
    fn test_orbiting_determinism() {
        let config = WorldConfig::default();
        let center = DVec2::new(100.0, 100.0);
        let mut t = Target::orbiting(center, 10.0, 30.0, 2.0, true, WHITE);

        // Starts at phase 1: half a turn from +x
        assert!((t.pos - DVec2::new(70.0, 100.0)).length() < 1e-9);

        for n in 1..=40 {
            t.advance(&config);
            let phase = 1.0 + n as f64 * 2.0 * 0.03;
            let expected = center + 30.0 * DVec2::new((PI * phase).cos(), (PI * phase).sin());
            assert!((t.pos - expected).length() < 1e-9, "tick {n}");
        }
    }

    #[test]
    fn test_orbiting_counter_clockwise() {
        let config = WorldConfig::default();
        let center = DVec2::new(300.0, 300.0);
        let mut t = Target::orbiting(center, 10.0, 50.0, 1.0, false, WHITE);
        t.advance(&config);
        let phase = 1.0 - 0.03;
        let expected = center + 50.0 * DVec2::new((PI * phase).cos(), (PI * phase).sin());
        assert!((t.pos - expected).length() < 1e-9);
        assert!((crate::distance(t.pos, center) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_check_collision() {
        let config = WorldConfig::default();
        let t = Target::stationary(DVec2::new(100.0, 100.0), 10.0, WHITE);
        let near = Shell::new(DVec2::new(130.0, 100.0), DVec2::ZERO, ShellKind::Standard, Owner::Player, &config);
        let far = Shell::new(DVec2::new(131.0, 100.0), DVec2::ZERO, ShellKind::Standard, Owner::Player, &config);
        assert!(t.check_collision(&near));
        assert!(!t.check_collision(&far));
    }
}
