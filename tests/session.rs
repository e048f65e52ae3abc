//! End-to-end runs of `GameSession` driven by the autopilot

use std::collections::HashSet;

use snake_arcade::GameSession;
use snake_arcade::consts::COLLISION_DELAY_MS;
use snake_arcade::sim::{
    Command, GameEvent, GamePhase, SimConfig, SimulationState, suggest_heading,
};

/// Play until game over (or `max_ticks`), checking invariants after every advance
fn play(config: SimConfig, seed: u64, max_ticks: u64) -> (GameSession, Vec<GameEvent>) {
    let mut session = GameSession::new(config, seed).expect("valid config");
    let mut log = Vec::new();
    session.submit(Command::Start);

    let mut now_ms = 0.0;
    while session.state().time_ticks < max_ticks {
        if let Some(h) = suggest_heading(session.state()) {
            session.submit(Command::Heading(h));
        }
        log.extend(session.advance(now_ms));
        check_invariants(session.state());

        if session.state().phase == GamePhase::Over {
            break;
        }
        now_ms = session
            .timer()
            .next_due_ms()
            .unwrap_or(now_ms + COLLISION_DELAY_MS);
    }
    (session, log)
}

fn check_invariants(state: &SimulationState) {
    let n = state.tile_count;
    assert_eq!(
        state.speed_level,
        SimulationState::expected_speed_level(state.score)
    );
    assert_eq!(state.length(), 1 + (state.score / 10) as usize);
    for cell in state.body.iter() {
        assert!(cell.in_bounds(n), "{cell:?} outside {n}x{n}");
    }
    let distinct: HashSet<_> = state.body.iter().collect();
    assert_eq!(distinct.len(), state.length(), "body overlaps itself");
    if state.phase == GamePhase::Running {
        assert!(!state.body.contains(state.food), "food on the body");
    }
}

#[test]
fn autopilot_game_keeps_invariants() {
    let (session, events) = play(SimConfig::default(), 7, 3_000);
    assert!(session.state().score > 0);
    assert!(events.iter().any(|e| matches!(e, GameEvent::AteFood { .. })));
}

#[test]
fn small_board_game_over_is_reported_once() {
    let config = SimConfig {
        tile_count: 5,
        ..Default::default()
    };
    let (session, events) = play(config, 11, 10_000);
    let over = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    let expected = usize::from(session.state().phase == GamePhase::Over);
    assert_eq!(over, expected);
    assert!(session.state().collision.is_none() || session.state().phase != GamePhase::Over);
}

#[test]
fn same_seed_same_game() {
    let (a, events_a) = play(SimConfig::default(), 99, 500);
    let (b, events_b) = play(SimConfig::default(), 99, 500);
    assert_eq!(a.state(), b.state());
    assert_eq!(events_a, events_b);
}
