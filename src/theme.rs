//! Visual themes
//!
//! Themes only change colors; they never touch the simulation.

use serde::{Deserialize, Serialize};

/// `0xRRGGBB` plus alpha to a linear-ish RGBA array
const fn rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Board colors for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Diagonal background gradient: top-left, middle, bottom-right
    pub background: [[f32; 4]; 3],
    pub grid_line: [f32; 4],
    /// Checkerboard tint on cells where (x + y) is even
    pub cell_highlight: [f32; 4],
}

/// Background theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Grass,
    Dark,
    Ocean,
    Desert,
    Classic,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Grass,
        Theme::Dark,
        Theme::Ocean,
        Theme::Desert,
        Theme::Classic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Grass => "grass",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
            Theme::Desert => "desert",
            Theme::Classic => "classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grass" => Some(Theme::Grass),
            "dark" => Some(Theme::Dark),
            "ocean" => Some(Theme::Ocean),
            "desert" => Some(Theme::Desert),
            "classic" => Some(Theme::Classic),
            _ => None,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Grass => Palette {
                background: [rgba(0x1a4d1a, 1.0), rgba(0x2d5a2d, 1.0), rgba(0x1a4d1a, 1.0)],
                grid_line: rgba(0x4caf50, 0.2),
                cell_highlight: rgba(0x4caf50, 0.02),
            },
            Theme::Dark => Palette {
                background: [rgba(0x0a0a0a, 1.0), rgba(0x1a1a1a, 1.0), rgba(0x0a0a0a, 1.0)],
                grid_line: rgba(0x646464, 0.2),
                cell_highlight: rgba(0x646464, 0.02),
            },
            Theme::Ocean => Palette {
                background: [rgba(0x0066cc, 1.0), rgba(0x004499, 1.0), rgba(0x0066cc, 1.0)],
                grid_line: rgba(0x0096ff, 0.2),
                cell_highlight: rgba(0x0096ff, 0.02),
            },
            Theme::Desert => Palette {
                background: [rgba(0xd2691e, 1.0), rgba(0xcd853f, 1.0), rgba(0xd2691e, 1.0)],
                grid_line: rgba(0xd2b48c, 0.2),
                cell_highlight: rgba(0xd2b48c, 0.02),
            },
            Theme::Classic => Palette {
                background: [rgba(0x222222, 1.0), rgba(0x333333, 1.0), rgba(0x222222, 1.0)],
                grid_line: rgba(0xffffff, 0.1),
                cell_highlight: rgba(0xffffff, 0.01),
            },
        }
    }
}

/// Piece colors shared by all themes
pub mod colors {
    use super::rgba;

    pub const HEAD: [f32; 4] = rgba(0xff6b6b, 1.0);
    pub const HEAD_GLOW: [f32; 4] = rgba(0xff6464, 0.3);
    pub const BODY: [f32; 4] = rgba(0x4caf50, 1.0);
    pub const TAIL: [f32; 4] = rgba(0x4ecdc4, 1.0);
    pub const FOOD: [f32; 4] = rgba(0xffd700, 1.0);
    pub const COLLISION: [f32; 4] = rgba(0xff0000, 1.0);
    pub const COLLISION_GLOW: [f32; 4] = rgba(0xff0000, 0.4);
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_str("OCEAN"), Some(Theme::Ocean));
        assert_eq!(Theme::from_str("neon"), None);
    }

    #[test]
    fn test_palette_colors() {
        let grass = Theme::Grass.palette();
        assert!((grass.background[0][0] - 0x1a as f32 / 255.0).abs() < 1e-6);
        assert_eq!(grass.grid_line[3], 0.2);
        assert_eq!(Theme::Classic.palette().grid_line, [1.0, 1.0, 1.0, 0.1]);
    }
}
