//! Cannon Arena headless driver
//!
//! Runs a scripted session against the simulation and prints the final
//! scoreboard. Usage:
//!
//! ```text
//! cannon-arena [config.json] [--ticks N] [--realtime] [--dump]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cannon Arena (headless) starting...");

    if let Err(e) = native::run(std::env::args().skip(1)) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::time::{Duration, Instant};

    use cannon_arena::WorldConfig;
    use cannon_arena::consts::TICK_HZ;
    use cannon_arena::sim::{GameState, TickInput};
    use glam::DVec2;

    const DEFAULT_TICKS: u64 = 900;
    /// Ticks between trigger presses
    const PRESS_PERIOD: u64 = 20;
    /// Ticks to cycle the selected shell kind
    const WEAPON_PERIOD: u64 = 150;

    #[derive(Debug, Default)]
    struct Args {
        config_path: Option<String>,
        ticks: Option<u64>,
        realtime: bool,
        dump: bool,
    }

    fn parse_args(args: impl Iterator<Item = String>) -> Result<Args, Box<dyn Error>> {
        let mut parsed = Args::default();
        let mut args = args;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--realtime" => parsed.realtime = true,
                "--dump" => parsed.dump = true,
                "--ticks" => {
                    let value = args.next().ok_or("--ticks needs a value")?;
                    parsed.ticks = Some(value.parse()?);
                }
                flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}").into()),
                path => parsed.config_path = Some(path.to_string()),
            }
        }
        Ok(parsed)
    }

    /// Scripted player: aims at the nearest target, holds the trigger for a
    /// while, releases, and now and then switches shell kind
    fn scripted_input(state: &GameState, hold_ticks: &mut Option<u64>) -> TickInput {
        let t = state.time_ticks;
        let mut input = TickInput {
            pointer_has_focus: true,
            ..Default::default()
        };

        let nearest = state.targets.iter().min_by(|a, b| {
            let da = a.pos.distance_squared(state.player.pos);
            let db = b.pos.distance_squared(state.player.pos);
            da.total_cmp(&db)
        });
        if let Some(target) = nearest {
            input.pointer_position = Some(target.pos);
            let dx = target.pos.x - state.player.pos.x;
            input.left_held = dx < -100.0;
            input.right_held = dx > 100.0;
        } else {
            input.pointer_position = Some(DVec2::new(state.player.pos.x, 0.0));
        }

        match *hold_ticks {
            None if t % PRESS_PERIOD == 0 => {
                input.primary_pressed_edge = true;
                *hold_ticks = Some(12 + t % 4);
            }
            Some(0) => {
                input.primary_released_edge = true;
                *hold_ticks = None;
            }
            Some(n) => *hold_ticks = Some(n - 1),
            None => {}
        }

        input.weapon_cycle_edge = t > 0 && t % WEAPON_PERIOD == 0;
        input
    }

    pub fn run(args: impl Iterator<Item = String>) -> Result<(), Box<dyn Error>> {
        let args = parse_args(args)?;

        let config = match &args.config_path {
            Some(path) => {
                log::info!("Loading config from {path}");
                WorldConfig::from_json(&std::fs::read_to_string(path)?)?
            }
            None => WorldConfig::default(),
        };

        let mut state = GameState::new(config)?;
        let ticks = args.ticks.unwrap_or(DEFAULT_TICKS);
        let frame = Duration::from_secs_f64(1.0 / TICK_HZ as f64);
        let mut hold_ticks = None;

        for _ in 0..ticks {
            let started = Instant::now();
            let input = scripted_input(&state, &mut hold_ticks);
            let outcome = state.process(&input)?;

            if outcome.targets_destroyed > 0 || outcome.hits_taken > 0 {
                log::debug!(
                    "tick {}: destroyed {}, hits taken {}",
                    state.time_ticks,
                    outcome.targets_destroyed,
                    outcome.hits_taken
                );
            }
            if outcome.done {
                break;
            }
            if args.realtime {
                if let Some(rest) = frame.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        log::info!(
            "Finished after {} ticks, mission {}",
            state.time_ticks,
            state.mission_index
        );
        for line in state.scoreboard.lines() {
            println!("{line}");
        }
        if args.dump {
            println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        }
        Ok(())
    }

}
