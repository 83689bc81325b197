//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded session RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod bomb;
pub mod cannon;
pub mod collision;
pub mod shell;
pub mod snapshot;
pub mod state;
pub mod target;
pub mod tick;

pub use bomb::Bomb;
pub use cannon::{Cannon, CannonRole};
pub use collision::{Rect, circles_overlap, remove_indices};
pub use shell::{Owner, Shell, ShellKind};
pub use snapshot::{BombView, CannonView, RenderSnapshot, ScoreView, ShellView, TargetView};
pub use state::{GameState, Rgb, Scoreboard, SimError, random_color};
pub use target::{Target, TargetKind};
pub use tick::{TickInput, TickOutcome, generate_mission, tick};
