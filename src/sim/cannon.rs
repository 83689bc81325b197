//! Cannons: the player's artillery piece and its autonomous opponent

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::shell::{Owner, Shell, ShellKind};
use super::state::Rgb;
use crate::config::WorldConfig;
use crate::consts::*;

/// Who drives a cannon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CannonRole {
    /// Steered by the input snapshot
    Player,
    /// Patrols on its own with a fixed per-tick velocity
    Autonomous { velocity: DVec2 },
}

/// A cannon emplacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    /// Mount point (top-center of the footprint)
    pub pos: DVec2,
    /// Aim angle in radians (y down, so negative is up)
    pub angle: f64,
    /// Current charge; always within [min_power, max_power]
    pub power: f64,
    pub min_power: f64,
    pub max_power: f64,
    pub charging: bool,
    /// Footprint width and height
    pub footprint: DVec2,
    pub color: Rgb,
    pub role: CannonRole,
}

impl Cannon {
    fn with_role(pos: DVec2, role: CannonRole, color: Rgb, config: &WorldConfig) -> Self {
        Self {
            pos,
            angle: 0.0,
            power: config.min_power,
            min_power: config.min_power,
            max_power: config.max_power,
            charging: false,
            footprint: DVec2::new(FOOTPRINT_WIDTH, FOOTPRINT_HEIGHT),
            color,
            role,
        }
    }

    pub fn player(config: &WorldConfig) -> Self {
        Self::with_role(config.player_start, CannonRole::Player, [255, 0, 0], config)
    }

    pub fn autonomous(config: &WorldConfig) -> Self {
        Self::with_role(
            config.autonomous_start,
            CannonRole::Autonomous {
                velocity: config.autonomous_velocity,
            },
            [0, 160, 255],
            config,
        )
    }

    pub fn is_autonomous(&self) -> bool {
        matches!(self.role, CannonRole::Autonomous { .. })
    }

    /// Start charging
    pub fn activate(&mut self) {
        self.charging = true;
    }

    /// Build up power while charging, never past `max_power`
    pub fn charge_tick(&mut self, increment: f64) {
        if self.charging && self.power < self.max_power {
            self.power = (self.power + increment).min(self.max_power);
        }
    }

    /// Point the barrel at `target`
    pub fn aim_at(&mut self, target: DVec2) {
        self.angle = crate::angle_to(self.pos, target);
    }

    /// Emit a shell along the barrel at the current power, then reset the charge
    pub fn fire(&mut self, kind: ShellKind, config: &WorldConfig) -> Shell {
        let vel = crate::polar_to_cartesian(self.power, self.angle);
        let owner = if self.is_autonomous() {
            Owner::Autonomous
        } else {
            Owner::Player
        };
        let shell = Shell::new(self.pos, vel, kind, owner, config);
        log::debug!(
            "{:?} fired {} shell at power {:.1}, angle {:.3}",
            owner,
            kind.as_str(),
            self.power,
            self.angle
        );
        self.power = self.min_power;
        self.charging = false;
        shell
    }

    /// Move horizontally; blocked toward a side wall inside the margin
    pub fn pan(&mut self, delta: f64, config: &WorldConfig) {
        let margin = config.wall_margin;
        let clear_of_left = self.pos.x > margin || delta > 0.0;
        let clear_of_right = self.pos.x < config.arena.x - margin || delta < 0.0;
        if clear_of_left && clear_of_right {
            self.pos.x += delta;
        }
    }

    /// Drift by the patrol velocity, flipping direction once past an arena edge
    pub fn patrol(&mut self, config: &WorldConfig) {
        let CannonRole::Autonomous { velocity } = &mut self.role else {
            return;
        };
        self.pos += *velocity;

        for axis in 0..2 {
            if (self.pos[axis] < 0.0 && velocity[axis] < 0.0)
                || (self.pos[axis] > config.arena[axis] && velocity[axis] > 0.0)
            {
                velocity[axis] = -velocity[axis];
            }
        }
    }

    /// Collision rectangle of the base (hangs below the mount point)
    pub fn footprint_rect(&self) -> Rect {
        Rect::new(
            DVec2::new(self.pos.x - self.footprint.x / 2.0, self.pos.y),
            self.footprint,
        )
    }

    /// Center of the turret cover circle, the body shells can hit
    pub fn turret_center(&self) -> DVec2 {
        self.pos + DVec2::new(0.0, TURRET_OFFSET_Y)
    }

    pub fn turret_radius(&self) -> f64 {
        TURRET_RADIUS
    }

    /// Barrel outline: a quad along the aim whose length is the current power
    pub fn barrel_polygon(&self) -> [DVec2; 4] {
        let side = crate::polar_to_cartesian(
            BARREL_HALF_WIDTH,
            self.angle - std::f64::consts::FRAC_PI_2,
        );
        let along = crate::polar_to_cartesian(self.power, self.angle);
        [
            self.pos + side,
            self.pos + side + along,
            self.pos + along - side,
            self.pos - side,
        ]
    }
}
