//! Scene building: simulation snapshot -> vertex list
//!
//! Pure and GPU-free so it can be tested natively. Output is in grid units
//! (tile `(x, y)` covers `[x, x+1] x [y, y+1]`); `RenderState` maps to NDC.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use crate::sim::{GamePhase, GridCoordinate, SimulationState};
use crate::theme::{Theme, colors};

/// Gap between a piece and its tile edge
const PIECE_INSET: f32 = 0.1;
const GRID_LINE_WIDTH: f32 = 0.05;
const FOOD_RADIUS: f32 = 0.38;
const CIRCLE_SEGMENTS: u32 = 16;

fn tile_center(pos: GridCoordinate) -> Vec2 {
    Vec2::new(pos.x as f32 + 0.5, pos.y as f32 + 0.5)
}

/// Alpha for body segment `index` of `len`: fades toward the tail
pub fn body_alpha(index: usize, len: usize) -> f32 {
    1.0 - (index as f32 / len as f32) * 0.5
}

/// Build the full frame for `state` under `theme`
pub fn build_scene(state: &SimulationState, theme: Theme, now_ms: f64) -> Vec<Vertex> {
    let n = state.tile_count;
    let size = n as f32;
    let palette = theme.palette();
    let mut out = Vec::with_capacity((n * n) as usize * 3 + state.length() * 6 + 256);

    // Background: diagonal gradient
    let [start, mid, end] = palette.background;
    out.extend(shapes::gradient_rect(
        Vec2::ZERO,
        Vec2::splat(size),
        [start, mid, end, mid],
    ));

    // Checkerboard highlight
    for y in 0..n {
        for x in 0..n {
            if (x + y) % 2 == 0 {
                let min = Vec2::new(x as f32, y as f32) + Vec2::splat(0.05);
                out.extend(shapes::rect(min, min + Vec2::splat(0.9), palette.cell_highlight));
            }
        }
    }

    // Grid lines
    for i in 0..=n {
        let t = i as f32;
        out.extend(shapes::line(
            Vec2::new(t, 0.0),
            Vec2::new(t, size),
            GRID_LINE_WIDTH,
            palette.grid_line,
        ));
        out.extend(shapes::line(
            Vec2::new(0.0, t),
            Vec2::new(size, t),
            GRID_LINE_WIDTH,
            palette.grid_line,
        ));
    }

    out.extend(shapes::circle(
        tile_center(state.food),
        FOOD_RADIUS,
        colors::FOOD,
        CIRCLE_SEGMENTS,
    ));

    push_snake(&mut out, state, now_ms);

    if matches!(state.phase, GamePhase::Paused | GamePhase::Over) {
        out.extend(shapes::rect(Vec2::ZERO, Vec2::splat(size), colors::OVERLAY));
    }

    out
}

fn push_snake(out: &mut Vec<Vertex>, state: &SimulationState, now_ms: f64) {
    let len = state.length();
    let hit = state
        .collision
        .filter(|_| state.phase == GamePhase::CollisionPending)
        .map(|marker| (marker.segment_index, now_ms - marker.timestamp_ms));
    let side = 1.0 - 2.0 * PIECE_INSET;

    // Tail first so the head ends up on top
    for (i, segment) in state.body.iter().enumerate().rev() {
        let center = tile_center(segment);
        let is_hit = matches!(hit, Some((index, _)) if index == i);

        if let Some((_, elapsed)) = hit.filter(|_| is_hit) {
            let pulse = 0.6 + 0.2 * ((elapsed / 120.0).sin() as f32);
            let mut glow = colors::COLLISION_GLOW;
            glow[3] = pulse;
            out.extend(shapes::glow(center, 1.5, glow, CIRCLE_SEGMENTS));
        }

        let color = if is_hit {
            colors::COLLISION
        } else if i == 0 {
            out.extend(shapes::glow(center, 1.0, colors::HEAD_GLOW, CIRCLE_SEGMENTS));
            colors::HEAD
        } else if i == len - 1 {
            colors::TAIL
        } else {
            let mut c = colors::BODY;
            c[3] = body_alpha(i, len);
            c
        };
        out.extend(shapes::square(center, side, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CollisionMarker, SimConfig, SnakeBody};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> SimulationState {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = SimulationState::new(&SimConfig::default(), &mut rng);
        state.body = SnakeBody::from_segments([
            GridCoordinate::new(5, 5),
            GridCoordinate::new(4, 5),
            GridCoordinate::new(3, 5),
            GridCoordinate::new(2, 5),
        ])
        .expect("non-empty");
        state.food = GridCoordinate::new(12, 7);
        state.phase = GamePhase::Running;
        state
    }

    fn has_color(scene: &[Vertex], color: [f32; 4]) -> bool {
        scene.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_scene_stays_on_board() {
        let scene = build_scene(&state(), Theme::Grass, 0.0);
        assert!(!scene.is_empty());
        assert_eq!(scene.len() % 3, 0);
        // Glows may spill past the edge; everything else stays in the board
        let limit = 20.0 + 1.5;
        assert!(scene.iter().all(|v| v.position[0] >= -1.5 && v.position[0] <= limit));
    }

    #[test]
    fn test_head_body_tail_colors() {
        let scene = build_scene(&state(), Theme::Dark, 0.0);
        assert!(has_color(&scene, colors::HEAD));
        assert!(has_color(&scene, colors::TAIL));
        assert!(has_color(&scene, colors::FOOD));
        assert!(!has_color(&scene, colors::COLLISION));
        assert!(!has_color(&scene, colors::OVERLAY));
    }

    #[test]
    fn test_collision_segment_is_red_only_while_pending() {
        let mut s = state();
        s.collision = Some(CollisionMarker {
            segment_index: 2,
            timestamp_ms: 1000.0,
        });
        s.phase = GamePhase::CollisionPending;
        let scene = build_scene(&s, Theme::Grass, 1100.0);
        assert!(has_color(&scene, colors::COLLISION));

        s.phase = GamePhase::Over;
        let scene = build_scene(&s, Theme::Grass, 1100.0);
        assert!(!has_color(&scene, colors::COLLISION));
        assert!(has_color(&scene, colors::OVERLAY));
    }

    #[test]
    fn test_body_fades_toward_tail() {
        assert_eq!(body_alpha(0, 4), 1.0);
        assert!(body_alpha(3, 4) < body_alpha(1, 4));
        assert!(body_alpha(9, 10) > 0.5);
    }

    #[test]
    fn test_theme_changes_only_the_board() {
        let s = state();
        let grass = build_scene(&s, Theme::Grass, 0.0);
        let ocean = build_scene(&s, Theme::Ocean, 0.0);
        assert_eq!(grass.len(), ocean.len());
        assert_ne!(grass[0].color, ocean[0].color);
    }
}
