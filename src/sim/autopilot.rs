//! Demo autopilot
//!
//! Greedy steering used by the attract/demo mode and the native headless run:
//! pick the safe heading that gets closest to the food on the wrapped board.

use super::grid::GridCoordinate;
use super::heading::Heading;
use super::state::SimulationState;

const HEADINGS: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

/// Shortest distance along one wrapped axis
fn axis_distance(a: i32, b: i32, tile_count: i32) -> i32 {
    let d = (b - a).rem_euclid(tile_count);
    d.min(tile_count - d)
}

/// Manhattan distance on the torus
pub fn wrapped_distance(a: GridCoordinate, b: GridCoordinate, tile_count: i32) -> i32 {
    axis_distance(a.x, b.x, tile_count) + axis_distance(a.y, b.y, tile_count)
}

/// Suggest a heading for the next tick, or `None` if every move hits the body
pub fn suggest_heading(state: &SimulationState) -> Option<Heading> {
    let head = state.head();
    HEADINGS
        .into_iter()
        .filter(|&h| !state.heading.is_opposite(h))
        .filter_map(|h| {
            let next = head.stepped(h).wrapped(state.tile_count);
            if state.body.collision_index(next).is_some() {
                return None;
            }
            // Prefer keeping the current heading on ties
            let turn_cost = i32::from(h != state.heading);
            Some((wrapped_distance(next, state.food, state.tile_count) * 2 + turn_cost, h))
        })
        .min_by_key(|&(score, _)| score)
        .map(|(_, h)| h)
}
