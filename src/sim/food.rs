//! Food placement

use rand::Rng;

use super::grid::{GridCoordinate, SnakeBody};

/// Pick a uniformly random free cell by rejection sampling.
///
/// Returns `None` when the body covers every cell (or the board has no
/// cells at all), so sampling always terminates.
pub fn place_food<R: Rng>(
    body: &SnakeBody,
    tile_count: i32,
    rng: &mut R,
) -> Option<GridCoordinate> {
    let side = usize::try_from(tile_count).ok().filter(|&n| n > 0)?;
    let cells = side.checked_mul(side)?;
    if body.len() >= cells {
        return None;
    }

    loop {
        let candidate = GridCoordinate::new(
            rng.random_range(0..tile_count),
            rng.random_range(0..tile_count),
        );
        if !body.contains(candidate) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_food_avoids_body() {
        let mut rng = Pcg32::seed_from_u64(7);
        // Snake fills every cell but one on a 3x3 board
        let free = GridCoordinate::new(2, 2);
        let cells = (0..3)
            .flat_map(|y| (0..3).map(move |x| GridCoordinate::new(x, y)))
            .filter(|&c| c != free);
        let body = SnakeBody::from_segments(cells).expect("non-empty");

        for _ in 0..20 {
            assert_eq!(place_food(&body, 3, &mut rng), Some(free));
        }
    }

    #[test]
    fn test_full_board_has_no_food() {
        let mut rng = Pcg32::seed_from_u64(7);
        let cells = (0..2).flat_map(|y| (0..2).map(move |x| GridCoordinate::new(x, y)));
        let body = SnakeBody::from_segments(cells).expect("non-empty");
        assert_eq!(place_food(&body, 2, &mut rng), None);
    }

    #[test]
    fn test_food_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(99);
        let body = SnakeBody::new(GridCoordinate::center(20));
        for _ in 0..200 {
            let food = place_food(&body, 20, &mut rng).expect("free cell");
            assert!(food.in_bounds(20));
            assert_ne!(food, body.head());
        }
    }

    #[test]
    fn test_degenerate_board_has_no_free_cell() {
        let mut rng = Pcg32::seed_from_u64(1);
        let body = SnakeBody::new(GridCoordinate::new(0, 0));
        assert_eq!(place_food(&body, 0, &mut rng), None);
        assert_eq!(place_food(&body, -3, &mut rng), None);
    }
}
