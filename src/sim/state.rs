//! Game state and core simulation types
//!
//! The game state owns every entity collection, the scoreboard and the
//! session RNG. Nothing outside a tick mutates it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bomb::Bomb;
use super::cannon::Cannon;
use super::shell::{Shell, ShellKind};
use super::snapshot::RenderSnapshot;
use super::target::Target;
use super::tick::{TickInput, TickOutcome, generate_mission, tick};
use crate::config::{ConfigError, WorldConfig};

/// 8-bit RGB color handed to the renderer
pub type Rgb = [u8; 3];

/// Uniformly random color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    [rng.random(), rng.random(), rng.random()]
}

/// Internal-logic faults raised inside a tick
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Removal index {index} out of range for collection of length {len}")]
    RemovalOutOfRange { index: usize, len: usize },
}

/// Session counters; all only ever grow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub destroyed: u32,
    pub fired: u32,
    pub hits_taken: u32,
}

impl Scoreboard {
    /// Destroyed targets minus shells used minus hits taken
    pub fn score(&self) -> i64 {
        self.destroyed as i64 - self.fired as i64 - self.hits_taken as i64
    }

    /// Text lines for the scoreboard renderer
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Destroyed: {}", self.destroyed),
            format!("Balls used: {}", self.fired),
            format!("Hits taken: {}", self.hits_taken),
            format!("Total: {}", self.score()),
        ]
    }
}

/// Complete simulation state (the manager of one session)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: WorldConfig,
    /// Session RNG; the only source of randomness
    pub rng: Pcg32,
    pub player: Cannon,
    pub autonomous: Cannon,
    pub shells: Vec<Shell>,
    pub targets: Vec<Target>,
    pub bombs: Vec<Bomb>,
    pub scoreboard: Scoreboard,
    /// Kind the player fires on release
    pub selected_kind: ShellKind,
    /// Missions spawned so far (1-based once the first one is out)
    pub mission_index: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Validate the config, place both cannons and spawn the first mission
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut state = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            player: Cannon::player(&config),
            autonomous: Cannon::autonomous(&config),
            shells: Vec::new(),
            targets: Vec::new(),
            bombs: Vec::new(),
            scoreboard: Scoreboard::default(),
            selected_kind: ShellKind::default(),
            mission_index: 0,
            time_ticks: 0,
            config,
        };
        generate_mission(&mut state);

        Ok(state)
    }

    /// Run one tick against an input snapshot
    pub fn process(&mut self, input: &TickInput) -> Result<TickOutcome, SimError> {
        tick(self, input)
    }

    /// Paint and register a freshly fired shell
    pub fn register_shell(&mut self, mut shell: Shell) {
        shell.color = random_color(&mut self.rng);
        self.shells.push(shell);
    }

    /// Mission is cleared once no target and no shell remains
    pub fn mission_cleared(&self) -> bool {
        self.targets.is_empty() && self.shells.is_empty()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::target::TargetKind;

    #[test]
    fn test_new_spawns_first_mission() {
        let state = GameState::new(WorldConfig::default()).unwrap();
        assert_eq!(state.mission_index, 1);
        assert_eq!(state.targets.len(), 9);
        assert!(state.shells.is_empty());
        assert!(state.bombs.is_empty());
        assert_eq!(state.scoreboard, Scoreboard::default());
        assert!(state.player.footprint_rect().min.x < state.player.pos.x);
        assert!(state.autonomous.is_autonomous());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = WorldConfig {
            min_power: 100.0,
            ..Default::default()
        };
        assert!(GameState::new(config).is_err());
    }

    #[test]
    fn test_mission_has_one_of_each_kind() {
        let state = GameState::new(WorldConfig::default()).unwrap();
        let count = |f: fn(&TargetKind) -> bool| state.targets.iter().filter(|t| f(&t.kind)).count();
        assert_eq!(count(|k| matches!(k, TargetKind::Stationary)), 3);
        assert_eq!(count(|k| matches!(k, TargetKind::Patrolling { .. })), 3);
        assert_eq!(count(|k| matches!(k, TargetKind::Orbiting { .. })), 3);
    }

    #[test]
    fn test_score_can_go_negative() {
        let board = Scoreboard {
            destroyed: 2,
            fired: 5,
            hits_taken: 1,
        };
        assert_eq!(board.score(), -4);
        assert_eq!(
            board.lines(),
            [
                "Destroyed: 2".to_string(),
                "Balls used: 5".to_string(),
                "Hits taken: 1".to_string(),
                "Total: -4".to_string(),
            ]
        );
    }

    #[test]
    fn test_register_shell_paints_from_session_rng() {
        let mut a = GameState::new(WorldConfig::with_seed(5)).unwrap();
        let mut b = GameState::new(WorldConfig::with_seed(5)).unwrap();
        for state in [&mut a, &mut b] {
            let shell = state.player.fire(ShellKind::Heavy, &state.config);
            state.register_shell(shell);
        }
        assert_eq!(a.shells.len(), 1);
        assert_eq!(a.shells[0].color, b.shells[0].color);
        assert_eq!(a.snapshot().shells[0].color, a.shells[0].color);
    }

    #[test]
    fn test_same_seed_same_mission() {
        let a = GameState::new(WorldConfig::with_seed(42)).unwrap();
        let b = GameState::new(WorldConfig::with_seed(42)).unwrap();
        for (ta, tb) in a.targets.iter().zip(&b.targets) {
            assert_eq!(ta.pos, tb.pos);
            assert_eq!(ta.radius, tb.radius);
            assert_eq!(ta.color, tb.color);
        }
    }
}
