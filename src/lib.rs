//! Snake Arcade - a grid-based snake game on a toroidal board
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake body, step engine)
//! - `session`: Host control loop (command queue, tick timer, collision delay)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (timer, input, storage)
//! - `audio`: Procedural sound effects driven by simulation events
//! - `settings` / `theme`: Persisted preferences and visual themes

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod theme;

pub use error::{ConfigError, PreferenceError};
pub use session::GameSession;
pub use settings::Preferences;
pub use theme::Theme;

/// Game configuration constants
pub mod consts {
    /// Default board size (tiles per side)
    pub const TILE_COUNT: i32 = 20;
    /// Points awarded per food item
    pub const FOOD_REWARD: u32 = 10;
    /// Score step that triggers a milestone and a speed increase
    pub const MILESTONE_POINTS: u32 = 100;
    /// Tick interval at speed level 1 (ms)
    pub const BASE_TICK_INTERVAL_MS: f64 = 1000.0;
    /// Real-time delay between a self-collision and game over (ms)
    pub const COLLISION_DELAY_MS: f64 = 1000.0;
    /// Maximum ticks replayed in one host frame to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;
    /// Largest supported board side; keeps `tile_count²` well inside usize/u32
    pub const MAX_TILE_COUNT: i32 = 1024;
}
