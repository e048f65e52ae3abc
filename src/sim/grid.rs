//! Grid coordinates and the snake body on a toroidal board

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::heading::Heading;

/// Integer cell position, `0 <= x, y < tile_count` once wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

impl GridCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center cell of a square board
    pub const fn center(tile_count: i32) -> Self {
        Self::new(tile_count / 2, tile_count / 2)
    }

    /// One step in `heading`, without wrapping
    pub fn stepped(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Fold the coordinate back onto the board; each axis wraps independently
    pub fn wrapped(self, tile_count: i32) -> Self {
        Self::new(self.x.rem_euclid(tile_count), self.y.rem_euclid(tile_count))
    }

    pub fn in_bounds(self, tile_count: i32) -> bool {
        (0..tile_count).contains(&self.x) && (0..tile_count).contains(&self.y)
    }
}

/// Snake segments, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeBody {
    segments: VecDeque<GridCoordinate>,
}

impl SnakeBody {
    /// A length-1 snake
    pub fn new(head: GridCoordinate) -> Self {
        Self {
            segments: VecDeque::from([head]),
        }
    }

    /// Build from explicit segments (head first); `None` if empty
    pub fn from_segments<I: IntoIterator<Item = GridCoordinate>>(segments: I) -> Option<Self> {
        let segments: VecDeque<_> = segments.into_iter().collect();
        (!segments.is_empty()).then_some(Self { segments })
    }

    pub fn head(&self) -> GridCoordinate {
        self.segments[0]
    }

    pub fn tail(&self) -> GridCoordinate {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<GridCoordinate> {
        self.segments.get(index).copied()
    }

    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = GridCoordinate> + ExactSizeIterator + '_ {
        self.segments.iter().copied()
    }

    pub fn contains(&self, pos: GridCoordinate) -> bool {
        self.segments.contains(&pos)
    }

    /// True if any of `positions` lies on the body
    pub fn contains_any<I: IntoIterator<Item = GridCoordinate>>(&self, positions: I) -> bool {
        positions.into_iter().any(|p| self.contains(p))
    }

    /// Index of the first non-head segment at `pos`
    pub fn collision_index(&self, pos: GridCoordinate) -> Option<usize> {
        self.segments
            .iter()
            .skip(1)
            .position(|&s| s == pos)
            .map(|i| i + 1)
    }

    pub(crate) fn push_head(&mut self, head: GridCoordinate) {
        self.segments.push_front(head);
    }

    /// Drop the tail segment, keeping at least the head
    pub(crate) fn pop_tail(&mut self) -> Option<GridCoordinate> {
        if self.segments.len() > 1 {
            self.segments.pop_back()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(cells: &[(i32, i32)]) -> SnakeBody {
        SnakeBody::from_segments(cells.iter().map(|&(x, y)| GridCoordinate::new(x, y)))
            .expect("non-empty")
    }

    #[test]
    fn test_wrap_each_edge() {
        let n = 20;
        assert_eq!(GridCoordinate::new(-1, 5).wrapped(n), GridCoordinate::new(19, 5));
        assert_eq!(GridCoordinate::new(20, 5).wrapped(n), GridCoordinate::new(0, 5));
        assert_eq!(GridCoordinate::new(5, -1).wrapped(n), GridCoordinate::new(5, 19));
        assert_eq!(GridCoordinate::new(5, 20).wrapped(n), GridCoordinate::new(5, 0));
        assert_eq!(GridCoordinate::new(7, 8).wrapped(n), GridCoordinate::new(7, 8));
    }

    #[test]
    fn test_center() {
        assert_eq!(GridCoordinate::center(20), GridCoordinate::new(10, 10));
        assert_eq!(GridCoordinate::center(7), GridCoordinate::new(3, 3));
    }

    #[test]
    fn test_collision_index_skips_head() {
        let b = body(&[(5, 5), (4, 5), (3, 5)]);
        assert_eq!(b.collision_index(GridCoordinate::new(5, 5)), None);
        assert_eq!(b.collision_index(GridCoordinate::new(4, 5)), Some(1));
        assert_eq!(b.collision_index(GridCoordinate::new(3, 5)), Some(2));
        assert_eq!(b.collision_index(GridCoordinate::new(9, 9)), None);
    }

    #[test]
    fn test_contains_any() {
        let b = body(&[(1, 1), (1, 2)]);
        assert!(b.contains_any([GridCoordinate::new(0, 0), GridCoordinate::new(1, 2)]));
        assert!(!b.contains_any([GridCoordinate::new(0, 0)]));
        assert!(!b.contains_any(std::iter::empty()));
    }

    #[test]
    fn test_push_and_pop_keep_head() {
        let mut b = SnakeBody::new(GridCoordinate::new(10, 10));
        b.push_head(GridCoordinate::new(11, 10));
        assert_eq!(b.len(), 2);
        assert_eq!(b.pop_tail(), Some(GridCoordinate::new(10, 10)));
        assert_eq!(b.pop_tail(), None);
        assert_eq!(b.head(), GridCoordinate::new(11, 10));
        assert_eq!(b.tail(), b.head());
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(SnakeBody::from_segments(Vec::new()).is_none());
    }
}
