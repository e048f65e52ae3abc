//! Step engine
//!
//! Advances the simulation one discrete tick at a time and applies player
//! commands. Nothing here knows about timers: the host decides when a tick
//! happens and reacts to the events returned from each call.

use rand::Rng;

use super::food::place_food;
use super::heading::Heading;
use super::state::{CollisionMarker, GameEvent, GamePhase, SimConfig, SimulationState};
use crate::consts::*;

/// Player/host commands, buffered by the host and applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Idle -> Running
    Start,
    /// Running -> Paused
    Pause,
    /// Paused -> Running
    Resume,
    /// Running <-> Paused
    TogglePause,
    /// Replace the state with a fresh Idle board, optionally starting right away
    Restart { autostart: bool },
    /// Heading change request, honored at the next tick
    Heading(Heading),
}

/// Apply one command. Commands that make no sense in the current phase are ignored.
pub fn apply_command<R: Rng>(
    state: &mut SimulationState,
    command: Command,
    config: &SimConfig,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match command {
        Command::Start => {
            if state.phase == GamePhase::Idle {
                start(state, None, &mut events);
            }
        }
        Command::Heading(Heading::Neutral) => {}
        Command::Heading(heading) => match state.phase {
            // Later requests in the same tick overwrite earlier ones
            GamePhase::Running => state.pending_heading = Some(heading),
            GamePhase::Idle if config.start_on_heading => {
                start(state, Some(heading), &mut events);
            }
            _ => log::trace!("Ignoring heading {:?} in {:?}", heading, state.phase),
        },
        Command::Pause => {
            if state.phase == GamePhase::Running {
                set_phase(state, GamePhase::Paused, &mut events);
            }
        }
        Command::Resume => {
            if state.phase == GamePhase::Paused {
                set_phase(state, GamePhase::Running, &mut events);
            }
        }
        Command::TogglePause => match state.phase {
            GamePhase::Running => set_phase(state, GamePhase::Paused, &mut events),
            GamePhase::Paused => set_phase(state, GamePhase::Running, &mut events),
            _ => {}
        },
        Command::Restart { autostart } => {
            let from = state.phase;
            *state = SimulationState::new(config, rng);
            if from != GamePhase::Idle {
                events.push(GameEvent::PhaseChanged {
                    from,
                    to: GamePhase::Idle,
                });
            }
            log::info!("Game restarted");
            if autostart {
                start(state, None, &mut events);
            }
        }
    }

    events
}

/// Advance the game state by one tick. Does nothing unless the phase is Running.
pub fn tick<R: Rng>(state: &mut SimulationState, rng: &mut R, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }
    state.time_ticks += 1;

    // Reversal guard: compare against the heading in effect, not the request
    if let Some(requested) = state.pending_heading.take() {
        if !state.heading.is_opposite(requested) {
            state.heading = requested;
        }
    }

    let new_head = state.head().stepped(state.heading).wrapped(state.tile_count);

    // Scan the pre-move body; the tail has not moved out of its cell yet
    if let Some(segment_index) = state.body.collision_index(new_head) {
        log::info!(
            "Self-collision at segment {} (score {}, length {})",
            segment_index,
            state.score,
            state.length()
        );
        state.collision = Some(CollisionMarker {
            segment_index,
            timestamp_ms: now_ms,
        });
        events.push(GameEvent::Collided { segment_index });
        set_phase(state, GamePhase::CollisionPending, &mut events);
        return events;
    }

    state.body.push_head(new_head);

    if new_head == state.food {
        eat_food(state, rng, &mut events);
    } else {
        state.body.pop_tail();
    }

    log::debug!(
        "Tick {}: head=({}, {}) len={} score={}",
        state.time_ticks,
        new_head.x,
        new_head.y,
        state.length(),
        state.score
    );

    events
}

/// End the collision display: CollisionPending -> Over
pub fn finish_collision(state: &mut SimulationState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::CollisionPending {
        state.collision = None;
        set_phase(state, GamePhase::Over, &mut events);
    }
    events
}

fn start(state: &mut SimulationState, initial: Option<Heading>, events: &mut Vec<GameEvent>) {
    if let Some(heading) = initial {
        state.heading = heading;
    } else if state.heading.is_neutral() {
        state.heading = Heading::Right;
    }
    state.pending_heading = None;
    set_phase(state, GamePhase::Running, events);
}

fn eat_food<R: Rng>(state: &mut SimulationState, rng: &mut R, events: &mut Vec<GameEvent>) {
    state.score += FOOD_REWARD;
    events.push(GameEvent::AteFood { score: state.score });

    if crossed_milestone(state.last_score_checkpoint, state.score) {
        log::info!("Milestone reached: {}", state.score);
        events.push(GameEvent::Milestone { score: state.score });
    }
    state.last_score_checkpoint = state.score;

    if state.score % MILESTONE_POINTS == 0 {
        state.speed_level += 1;
        let interval_ms = state.interval_ms();
        log::info!("Speed level {} ({:.0} ms/tick)", state.speed_level, interval_ms);
        events.push(GameEvent::SpeedChanged {
            speed_level: state.speed_level,
            interval_ms,
        });
    }

    match place_food(&state.body, state.tile_count, rng) {
        Some(food) => state.food = food,
        None => {
            log::info!("Board filled at length {}", state.length());
            events.push(GameEvent::BoardFilled);
            set_phase(state, GamePhase::Over, events);
        }
    }
}

/// True if `score` is in a later hundred than `checkpoint`
fn crossed_milestone(checkpoint: u32, score: u32) -> bool {
    score / MILESTONE_POINTS > checkpoint / MILESTONE_POINTS
}

fn set_phase(state: &mut SimulationState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    state.phase = to;
    log::info!("Phase {:?} -> {:?}", from, to);
    events.push(GameEvent::PhaseChanged { from, to });
    if to == GamePhase::Over {
        events.push(GameEvent::GameOver {
            score: state.score,
            length: state.length(),
        });
    }
}
