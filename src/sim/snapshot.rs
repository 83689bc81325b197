//! Render snapshot: a read-only copy of everything a renderer draws
//!
//! Building it never modifies the game state.

use glam::DVec2;
use serde::Serialize;

use super::cannon::Cannon;
use super::collision::Rect;
use super::shell::{Owner, ShellKind};
use super::state::{GameState, Rgb, Scoreboard};

#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub pos: DVec2,
    pub radius: f64,
    pub color: Rgb,
    pub kind: ShellKind,
    pub owner: Owner,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetView {
    pub pos: DVec2,
    pub radius: f64,
    pub color: Rgb,
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BombView {
    pub pos: DVec2,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CannonView {
    pub pos: DVec2,
    pub angle: f64,
    pub power: f64,
    pub color: Rgb,
    pub footprint: Rect,
    pub barrel: [DVec2; 4],
    pub turret_center: DVec2,
    pub turret_radius: f64,
}

impl CannonView {
    fn from_cannon(cannon: &Cannon) -> Self {
        Self {
            pos: cannon.pos,
            angle: cannon.angle,
            power: cannon.power,
            color: cannon.color,
            footprint: cannon.footprint_rect(),
            barrel: cannon.barrel_polygon(),
            turret_center: cannon.turret_center(),
            turret_radius: cannon.turret_radius(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub destroyed: u32,
    pub fired: u32,
    pub hits_taken: u32,
    pub score: i64,
    pub lines: [String; 4],
}

impl From<&Scoreboard> for ScoreView {
    fn from(board: &Scoreboard) -> Self {
        Self {
            destroyed: board.destroyed,
            fired: board.fired,
            hits_taken: board.hits_taken,
            score: board.score(),
            lines: board.lines(),
        }
    }
}

/// Everything a frame needs to be drawn
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub mission: u32,
    pub arena: DVec2,
    pub selected_kind: ShellKind,
    pub shells: Vec<ShellView>,
    pub targets: Vec<TargetView>,
    pub bombs: Vec<BombView>,
    pub player: CannonView,
    pub autonomous: CannonView,
    pub score: ScoreView,
}

impl RenderSnapshot {
    pub fn build(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            mission: state.mission_index,
            arena: state.config.arena,
            selected_kind: state.selected_kind,
            shells: state
                .shells
                .iter()
                .map(|s| ShellView {
                    pos: s.pos,
                    radius: s.radius,
                    color: s.color,
                    kind: s.kind,
                    owner: s.owner,
                })
                .collect(),
            targets: state
                .targets
                .iter()
                .map(|t| TargetView {
                    pos: t.pos,
                    radius: t.radius,
                    color: t.color,
                    kind: t.kind.as_str(),
                })
                .collect(),
            bombs: state
                .bombs
                .iter()
                .map(|b| BombView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            player: CannonView::from_cannon(&state.player),
            autonomous: CannonView::from_cannon(&state.autonomous),
            score: ScoreView::from(&state.scoreboard),
        }
    }
}
