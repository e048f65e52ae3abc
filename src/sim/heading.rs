//! Snake heading (movement direction)

use serde::{Deserialize, Serialize};

/// Direction the snake head moves each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
    /// Not moving yet (fresh game before the first start)
    #[default]
    Neutral,
}

impl Heading {
    /// Unit grid vector (dx, dy); screen coordinates, so Up is -y
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
            Heading::Neutral => (0, 0),
        }
    }

    /// Exact opposite direction (Neutral has none)
    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
            Heading::Neutral => Heading::Neutral,
        }
    }

    /// True if turning from `self` to `other` would be an instant reversal
    pub fn is_opposite(self, other: Heading) -> bool {
        self != Heading::Neutral && self.opposite() == other
    }

    pub fn is_neutral(self) -> bool {
        self == Heading::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Heading::Up.is_opposite(Heading::Down));
        assert!(Heading::Down.is_opposite(Heading::Up));
        assert!(Heading::Left.is_opposite(Heading::Right));
        assert!(Heading::Right.is_opposite(Heading::Left));

        assert!(!Heading::Up.is_opposite(Heading::Left));
        assert!(!Heading::Right.is_opposite(Heading::Right));
    }

    #[test]
    fn test_neutral_accepts_anything() {
        for h in [Heading::Up, Heading::Down, Heading::Left, Heading::Right] {
            assert!(!Heading::Neutral.is_opposite(h));
        }
        assert_eq!(Heading::Neutral.delta(), (0, 0));
    }

    #[test]
    fn test_heading_delta() {
        assert_eq!(Heading::Up.delta(), (0, -1));
        assert_eq!(Heading::Down.delta(), (0, 1));
        assert_eq!(Heading::Left.delta(), (-1, 0));
        assert_eq!(Heading::Right.delta(), (1, 0));
    }
}
