//! Fixed-order simulation tick
//!
//! One call advances the world by exactly one frame: input, motion,
//! collisions, bombs, then the mission check.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::bomb::Bomb;
use super::collision::{circles_overlap, remove_indices};
use super::shell::ShellKind;
use super::state::{GameState, SimError, random_color};
use super::target::Target;
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Window close / process quit
    pub quit_requested: bool,
    /// Primary button went down this tick (start charging)
    pub primary_pressed_edge: bool,
    /// Primary button went up this tick (fire)
    pub primary_released_edge: bool,
    /// Pointer position in arena coordinates
    pub pointer_position: Option<DVec2>,
    pub pointer_has_focus: bool,
    pub left_held: bool,
    pub right_held: bool,
    /// Weapon key went down this tick
    pub weapon_cycle_edge: bool,
    /// Quit key went down this tick
    pub quit_key_edge: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Quit was requested; the driver should stop
    pub done: bool,
    pub targets_destroyed: u32,
    pub hits_taken: u32,
    pub mission_started: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<TickOutcome, SimError> {
    let done = input.quit_requested || input.quit_key_edge;
    state.time_ticks += 1;

    handle_events(state, input);
    move_entities(state)?;
    let (targets_destroyed, hits_taken) = collide(state)?;
    bomb_pass(state)?;

    let mission_started = state.mission_cleared();
    if mission_started {
        generate_mission(state);
    }

    Ok(TickOutcome {
        done,
        targets_destroyed,
        hits_taken,
        mission_started,
    })
}

/// Apply the input snapshot to the player cannon
fn handle_events(state: &mut GameState, input: &TickInput) {
    if input.weapon_cycle_edge {
        state.selected_kind = state.selected_kind.next();
        log::debug!("Weapon: {}", state.selected_kind.as_str());
    }

    if input.primary_pressed_edge {
        state.player.activate();
        // The opponent answers some presses with an immediate shot at the origin
        if state.rng.random_range(0..state.config.autonomous_fire_odds) == 0 {
            state.autonomous.aim_at(DVec2::ZERO);
            let shell = state.autonomous.fire(ShellKind::Standard, &state.config);
            state.register_shell(shell);
        }
    }

    if input.primary_released_edge {
        let shell = state.player.fire(state.selected_kind, &state.config);
        state.register_shell(shell);
        state.scoreboard.fired += 1;
    }

    if input.left_held {
        state.player.pan(-state.config.pan_step, &state.config);
    }
    if input.right_held {
        state.player.pan(state.config.pan_step, &state.config);
    }

    if input.pointer_has_focus {
        if let Some(pointer) = input.pointer_position {
            state.player.aim_at(pointer);
        }
    }
}

/// Integrate every entity and cull dead shells
fn move_entities(state: &mut GameState) -> Result<(), SimError> {
    let gravity = state.config.gravity;
    for shell in &mut state.shells {
        shell.advance(TICK_STEP, gravity, &state.config);
    }
    let dead: Vec<usize> = state
        .shells
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.alive)
        .map(|(i, _)| i)
        .collect();
    remove_indices(&mut state.shells, dead)?;

    for target in &mut state.targets {
        target.advance(&state.config);
    }
    state.autonomous.patrol(&state.config);

    for bomb in &mut state.bombs {
        bomb.advance();
    }

    state.player.charge_tick(state.config.charge_increment);
    Ok(())
}

/// Resolve shell/target, shell/player and bomb/player contacts, in that order
fn collide(state: &mut GameState) -> Result<(u32, u32), SimError> {
    // Every target any shell touches goes, even several per shell
    let mut struck = Vec::new();
    for shell in &state.shells {
        for (j, target) in state.targets.iter().enumerate() {
            if target.check_collision(shell) {
                struck.push(j);
            }
        }
    }
    let destroyed = remove_indices(&mut state.targets, struck)? as u32;
    state.scoreboard.destroyed += destroyed;
    if destroyed > 0 {
        log::debug!("{} target(s) destroyed, {} left", destroyed, state.targets.len());
    }

    // Only shells that have settled can hit the player's turret
    let turret = state.player.turret_center();
    let turret_radius = state.player.turret_radius();
    let landed_hits: Vec<usize> = state
        .shells
        .iter()
        .enumerate()
        .filter(|(_, s)| s.landed && circles_overlap(s.pos, s.radius, turret, turret_radius))
        .map(|(i, _)| i)
        .collect();
    let shell_hits = remove_indices(&mut state.shells, landed_hits)? as u32;

    let footprint = state.player.footprint_rect();
    let bomb_hits: Vec<usize> = state
        .bombs
        .iter()
        .enumerate()
        .filter(|(_, b)| b.hits(&footprint))
        .map(|(i, _)| i)
        .collect();
    let bomb_hits = remove_indices(&mut state.bombs, bomb_hits)? as u32;

    let hits = shell_hits + bomb_hits;
    state.scoreboard.hits_taken += hits;
    if hits > 0 {
        log::debug!("Player hit: {} shell(s), {} bomb(s)", shell_hits, bomb_hits);
    }

    Ok((destroyed, hits))
}

/// Drop bombs that left the arena, then roll a new bomb under each live target
fn bomb_pass(state: &mut GameState) -> Result<(), SimError> {
    let gone: Vec<usize> = state
        .bombs
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_out_of_bounds(&state.config))
        .map(|(i, _)| i)
        .collect();
    remove_indices(&mut state.bombs, gone)?;

    let chance = state.config.bomb_spawn_chance;
    for target in &state.targets {
        if state.rng.random_bool(chance) {
            let drift = DVec2::new(
                state.rng.random_range(-BOMB_DRIFT_X..=BOMB_DRIFT_X),
                state.rng.random_range(0.0..=BOMB_DRIFT_Y),
            );
            state.bombs.push(Bomb::new(target.pos, drift, &state.config));
        }
    }
    Ok(())
}

/// Spawn the next batch of targets
///
/// Every kind is spawned `targets_per_mission` times. Radii shrink as the
/// score climbs and never go below 1.
pub fn generate_mission(state: &mut GameState) {
    state.mission_index += 1;

    let score = state.scoreboard.score().max(0);
    let low = (MAX_TARGET_RADIUS - 2 * score).max(1);
    let high = (MAX_TARGET_RADIUS - score).max(low);
    log::info!(
        "Mission {}: score {}, target radius {}..={}",
        state.mission_index,
        state.scoreboard.score(),
        low,
        high
    );

    let arena = state.config.arena;
    let rng = &mut state.rng;

    for _ in 0..state.config.targets_per_mission {
        let radius = rng.random_range(low..=high) as f64;
        let pos = random_spot(rng, radius, arena);
        state
            .targets
            .push(Target::stationary(pos, radius, random_color(rng)));

        let radius = rng.random_range(low..=high) as f64;
        let pos = random_spot(rng, radius, arena);
        let vel = DVec2::new(
            rng.random_range(-2..=2) as f64,
            rng.random_range(-2..=2) as f64,
        );
        state
            .targets
            .push(Target::patrolling(pos, radius, vel, random_color(rng)));

        let radius = rng.random_range(low..=high) as f64;
        let center = random_spot(rng, radius, arena);
        let orbit_radius = rng.random_range(20.0..=60.0);
        let angular_speed = rng.random_range(1.0..=3.0);
        let clockwise = rng.random_bool(0.5);
        state.targets.push(Target::orbiting(
            center,
            radius,
            orbit_radius,
            angular_speed,
            clockwise,
            random_color(rng),
        ));
    }
}

/// Uniform point keeping a circle of `radius` inside the arena
fn random_spot(rng: &mut Pcg32, radius: f64, arena: DVec2) -> DVec2 {
    DVec2::new(
        rng.random_range(radius..=arena.x - radius),
        rng.random_range(radius..=arena.y - radius),
    )
}
