//! Host control loop
//!
//! Owns the authoritative `SimulationState`, the RNG, a command queue and a
//! single re-armable tick timer. Input handlers only push commands; the state
//! is mutated inside `advance`, between renders, so a frame never sees a
//! half-applied update.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::error::ConfigError;
use crate::platform::TickTimer;
use crate::sim::{
    Command, GameEvent, GamePhase, SimConfig, SimulationState, apply_command, finish_collision,
    tick,
};

/// One game session: state plus everything needed to drive it in real time
#[derive(Debug)]
pub struct GameSession {
    config: SimConfig,
    rng: Pcg32,
    state: SimulationState,
    commands: VecDeque<Command>,
    timer: TickTimer,
    /// Host time at which CollisionPending turns into Over
    collision_deadline_ms: Option<f64>,
}

impl GameSession {
    /// Create an Idle session with a validated config and a run seed
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = SimulationState::new(&config, &mut rng);
        log::info!(
            "Session created: {}x{} board, seed {}",
            config.tile_count,
            config.tile_count,
            seed
        );

        Ok(Self {
            config,
            rng,
            state,
            commands: VecDeque::new(),
            timer: TickTimer::new(),
            collision_deadline_ms: None,
        })
    }

    /// Read-only snapshot for renderers and UI
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Queue a command; it is applied at the start of the next `advance`
    pub fn submit(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Apply queued commands, run every tick due by `now_ms`, and finish a
    /// pending collision once its delay has elapsed. Returns all events in order.
    pub fn advance(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();

        while let Some(command) = self.commands.pop_front() {
            let produced = apply_command(&mut self.state, command, &self.config, &mut self.rng);
            self.react(&produced, now_ms);
            events.extend(produced);
        }

        let mut ticks = 0;
        while let Some(due_ms) = self.timer.poll(now_ms) {
            if ticks == MAX_CATCHUP_TICKS {
                log::warn!("Tick backlog at {:.0} ms, dropping late ticks", now_ms);
                self.timer.resync(now_ms);
                break;
            }
            let produced = tick(&mut self.state, &mut self.rng, due_ms);
            self.react(&produced, due_ms);
            events.extend(produced);
            ticks += 1;
        }

        if let Some(deadline) = self.collision_deadline_ms {
            if now_ms >= deadline {
                self.collision_deadline_ms = None;
                let produced = finish_collision(&mut self.state);
                self.react(&produced, now_ms);
                events.extend(produced);
            }
        }

        events
    }

    /// Keep the timer and collision delay in step with state transitions
    fn react(&mut self, events: &[GameEvent], at_ms: f64) {
        for event in events {
            match *event {
                GameEvent::PhaseChanged { to, .. } => match to {
                    GamePhase::Running => self.timer.arm(self.state.interval_ms(), at_ms),
                    GamePhase::CollisionPending => {
                        self.timer.disarm();
                        self.collision_deadline_ms = Some(at_ms + COLLISION_DELAY_MS);
                    }
                    GamePhase::Paused => self.timer.disarm(),
                    GamePhase::Idle | GamePhase::Over => {
                        self.timer.disarm();
                        self.collision_deadline_ms = None;
                    }
                },
                GameEvent::SpeedChanged { interval_ms, .. } => {
                    if self.state.phase == GamePhase::Running {
                        self.timer.arm(interval_ms, at_ms);
                    }
                }
                _ => {}
            }
        }
    }
}
