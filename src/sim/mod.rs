//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only; the host owns real time
//! - Seeded RNG only, passed in by the caller
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod food;
pub mod grid;
pub mod heading;
pub mod state;
pub mod tick;

pub use autopilot::suggest_heading;
pub use food::place_food;
pub use grid::{GridCoordinate, SnakeBody};
pub use heading::Heading;
pub use state::{CollisionMarker, GameEvent, GamePhase, SimConfig, SimulationState};
pub use tick::{Command, apply_command, finish_collision, tick};
