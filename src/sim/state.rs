//! Game state and core simulation types
//!
//! `SimulationState` is the single owner of everything a run needs. It is replaced
//! wholesale on restart; nothing carries over between runs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::food::place_food;
use super::grid::{GridCoordinate, SnakeBody};
use super::heading::Heading;
use crate::consts::*;
use crate::error::ConfigError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh board, waiting for a start command
    Idle,
    /// Ticking
    Running,
    /// Ticking suspended
    Paused,
    /// Head hit the body; frozen while the hit is shown
    CollisionPending,
    /// Run ended
    Over,
}

/// Which segment the head ran into, shown only while `CollisionPending`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionMarker {
    pub segment_index: usize,
    /// Host time (ms) of the collision tick
    pub timestamp_ms: f64,
}

/// Events emitted by the step engine for audio, UI and the host loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AteFood { score: u32 },
    Collided { segment_index: usize },
    Milestone { score: u32 },
    /// Re-arm signal: the host must restart its tick timer at `interval_ms`
    SpeedChanged { speed_level: u32, interval_ms: f64 },
    PhaseChanged { from: GamePhase, to: GamePhase },
    GameOver { score: u32, length: usize },
    /// Snake covers every cell; no room left for food
    BoardFilled,
}

impl GameEvent {
    /// Stable event name used by the audio subsystem
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::AteFood { .. } => "ateFood",
            GameEvent::Collided { .. } => "collided",
            GameEvent::Milestone { .. } => "milestone",
            GameEvent::SpeedChanged { .. } => "speedChanged",
            GameEvent::PhaseChanged { .. } => "phaseChanged",
            GameEvent::GameOver { .. } => "gameOver",
            GameEvent::BoardFilled => "boardFilled",
        }
    }
}

/// Externally tunable parameters, supplied when a session starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Board side length in tiles
    pub tile_count: i32,
    /// Tick interval at speed level 1 (ms)
    pub base_interval_ms: f64,
    /// Treat the first heading key in Idle as a start command
    pub start_on_heading: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tile_count: TILE_COUNT,
            base_interval_ms: BASE_TICK_INTERVAL_MS,
            start_on_heading: false,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_TILE_COUNT).contains(&self.tile_count) {
            return Err(ConfigError::TileCount {
                got: self.tile_count,
                max: MAX_TILE_COUNT,
            });
        }
        if !self.base_interval_ms.is_finite() || self.base_interval_ms <= 0.0 {
            return Err(ConfigError::TickInterval(self.base_interval_ms));
        }
        Ok(())
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub body: SnakeBody,
    pub heading: Heading,
    /// Latest heading request since the last tick (later requests overwrite)
    pub pending_heading: Option<Heading>,
    pub food: GridCoordinate,
    pub score: u32,
    pub speed_level: u32,
    pub phase: GamePhase,
    /// Present only during `CollisionPending`
    pub collision: Option<CollisionMarker>,
    /// Score at the last milestone check
    pub last_score_checkpoint: u32,
    pub tile_count: i32,
    pub base_interval_ms: f64,
    /// Ticks advanced this run
    pub time_ticks: u64,
}

impl SimulationState {
    /// Fresh Idle board: length-1 snake at the center, Neutral heading, new food.
    ///
    /// `config` must have passed [`SimConfig::validate`]; `GameSession::new`
    /// guarantees this.
    pub fn new<R: Rng>(config: &SimConfig, rng: &mut R) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated config: {config:?}");
        let body = SnakeBody::new(GridCoordinate::center(config.tile_count));
        // A validated board has at least 4 cells, so a free cell always exists
        let food = place_food(&body, config.tile_count, rng).unwrap_or_default();

        Self {
            body,
            heading: Heading::Neutral,
            pending_heading: None,
            food,
            score: 0,
            speed_level: 1,
            phase: GamePhase::Idle,
            collision: None,
            last_score_checkpoint: 0,
            tile_count: config.tile_count,
            base_interval_ms: config.base_interval_ms,
            time_ticks: 0,
        }
    }

    /// Current tick interval (ms)
    pub fn interval_ms(&self) -> f64 {
        self.base_interval_ms / self.speed_level.max(1) as f64
    }

    pub fn head(&self) -> GridCoordinate {
        self.body.head()
    }

    /// Snake length in segments
    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Speed level implied by the score
    pub fn expected_speed_level(score: u32) -> u32 {
        1 + score / MILESTONE_POINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_state_is_idle_at_center() {
        let mut rng = Pcg32::seed_from_u64(1);
        let state = SimulationState::new(&SimConfig::default(), &mut rng);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.heading, Heading::Neutral);
        assert_eq!(state.length(), 1);
        assert_eq!(state.head(), GridCoordinate::new(10, 10));
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_level, 1);
        assert!(state.collision.is_none());
        assert_ne!(state.food, state.head());
        assert!(state.food.in_bounds(state.tile_count));
    }

    #[test]
    fn test_config_validation() {
        assert!(SimConfig::default().validate().is_ok());

        let tiny = SimConfig {
            tile_count: 1,
            ..Default::default()
        };
        assert!(matches!(tiny.validate(), Err(ConfigError::TileCount { got: 1, .. })));

        let stalled = SimConfig {
            base_interval_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(stalled.validate(), Err(ConfigError::TickInterval(_))));

        let nan = SimConfig {
            base_interval_ms: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unvalidated config")]
    fn test_new_rejects_empty_board_in_debug() {
        let config = SimConfig {
            tile_count: 0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let _ = SimulationState::new(&config, &mut rng);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: SimConfig = serde_json::from_str(r#"{ "tile_count": 12 }"#).expect("json");
        assert_eq!(config.tile_count, 12);
        assert_eq!(config.base_interval_ms, BASE_TICK_INTERVAL_MS);
        assert!(!config.start_on_heading);
    }

    #[test]
    fn test_interval_scales_with_speed() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = SimulationState::new(&SimConfig::default(), &mut rng);
        assert_eq!(state.interval_ms(), 1000.0);
        state.speed_level = 2;
        assert_eq!(state.interval_ms(), 500.0);
        state.speed_level = 4;
        assert_eq!(state.interval_ms(), 250.0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::AteFood { score: 10 }.name(), "ateFood");
        assert_eq!(GameEvent::Collided { segment_index: 1 }.name(), "collided");
        assert_eq!(GameEvent::Milestone { score: 100 }.name(), "milestone");
    }
}
