//! Bombs dropped by live targets onto the player

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::WorldConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: DVec2,
    /// Randomized per-axis drift added every tick
    pub drift: DVec2,
    pub radius: f64,
    /// Fixed downward fall per tick
    pub gravity: f64,
}

impl Bomb {
    pub fn new(pos: DVec2, drift: DVec2, config: &WorldConfig) -> Self {
        Self {
            pos,
            drift,
            radius: config.bomb_radius,
            gravity: config.bomb_gravity,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.gravity;
        self.pos += self.drift;
    }

    /// Fell past the floor or drifted off either side
    pub fn is_out_of_bounds(&self, config: &WorldConfig) -> bool {
        self.pos.y > config.arena.y
            || self.pos.x < self.radius
            || self.pos.x > config.arena.x - self.radius
    }

    /// Bounding box derived from the current center
    pub fn bounding_rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn hits(&self, rect: &Rect) -> bool {
        self.bounding_rect().overlaps(rect)
    }
}
