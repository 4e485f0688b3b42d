//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic: fixed-point integer arithmetic only, no rendering or
//! platform dependencies, one mutation path per tick.

pub mod physics;
pub mod state;
pub mod tick;
pub mod tilemap;

pub use state::{Actor, GamePhase, GameState, ProgressTracker};
pub use tick::{TickInput, tick};
pub use tilemap::{CHECKPOINT_TILE, ObstacleMap, is_lethal};
