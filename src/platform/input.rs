//! Input adapter
//!
//! Translates keyboard keys, touch swipes and on-screen buttons into commands.
//! Pure functions of the raw input (and the current phase for the space bar),
//! so the browser glue stays thin.

use crate::sim::{Command, GamePhase, Heading};

/// What an input means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Forward to the simulation command queue
    Sim(Command),
    /// Audio-only toggle, never reaches the simulation
    ToggleMute,
}

/// On-screen buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Pause,
    Restart,
}

impl Button {
    pub fn command(self) -> Command {
        match self {
            Button::Start => Command::Start,
            Button::Pause => Command::TogglePause,
            Button::Restart => Command::Restart { autostart: false },
        }
    }
}

/// Map a `KeyboardEvent.key` value to an action
pub fn key_action(key: &str, phase: GamePhase) -> Option<InputAction> {
    let heading = |h| Some(InputAction::Sim(Command::Heading(h)));
    match key {
        "ArrowUp" | "w" | "W" => heading(Heading::Up),
        "ArrowDown" | "s" | "S" => heading(Heading::Down),
        "ArrowLeft" | "a" | "A" => heading(Heading::Left),
        "ArrowRight" | "d" | "D" => heading(Heading::Right),
        " " | "Space" | "Spacebar" => space_command(phase).map(InputAction::Sim),
        "Escape" => Some(InputAction::Sim(Command::Pause)),
        "r" | "R" => Some(InputAction::Sim(Command::Restart { autostart: false })),
        "m" | "M" => Some(InputAction::ToggleMute),
        _ => None,
    }
}

/// Space starts, pauses/resumes, or replays depending on the phase
fn space_command(phase: GamePhase) -> Option<Command> {
    match phase {
        GamePhase::Idle => Some(Command::Start),
        GamePhase::Running | GamePhase::Paused => Some(Command::TogglePause),
        GamePhase::Over => Some(Command::Restart { autostart: true }),
        GamePhase::CollisionPending => None,
    }
}

/// Keys whose browser default (scrolling) should be suppressed
pub fn captures_key(key: &str) -> bool {
    matches!(
        key,
        "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " " | "Space" | "Spacebar"
    )
}

/// Turns touch movement into heading requests by dominant axis
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Touch started at (x, y)
    pub fn begin(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    /// Touch moved to (x, y). The origin follows the finger, so a long drag
    /// can turn more than once.
    pub fn moved(&mut self, x: f32, y: f32) -> Option<Command> {
        let (ox, oy) = self.origin?;
        self.origin = Some((x, y));

        let (dx, dy) = (x - ox, y - oy);
        let heading = if dx.abs() > dy.abs() {
            if dx > 0.0 { Heading::Right } else { Heading::Left }
        } else if dy > 0.0 {
            Heading::Down
        } else if dy < 0.0 {
            Heading::Up
        } else {
            return None;
        };
        Some(Command::Heading(heading))
    }

    pub fn end(&mut self) {
        self.origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(cmd: Command) -> Option<InputAction> {
        Some(InputAction::Sim(cmd))
    }

    #[test]
    fn test_arrow_and_wasd_keys() {
        let p = GamePhase::Running;
        assert_eq!(key_action("ArrowUp", p), sim(Command::Heading(Heading::Up)));
        assert_eq!(key_action("ArrowDown", p), sim(Command::Heading(Heading::Down)));
        assert_eq!(key_action("ArrowLeft", p), sim(Command::Heading(Heading::Left)));
        assert_eq!(key_action("ArrowRight", p), sim(Command::Heading(Heading::Right)));
        assert_eq!(key_action("w", p), sim(Command::Heading(Heading::Up)));
        assert_eq!(key_action("D", p), sim(Command::Heading(Heading::Right)));
        assert_eq!(key_action("x", p), None);
    }

    #[test]
    fn test_space_depends_on_phase() {
        assert_eq!(key_action(" ", GamePhase::Idle), sim(Command::Start));
        assert_eq!(key_action(" ", GamePhase::Running), sim(Command::TogglePause));
        assert_eq!(key_action(" ", GamePhase::Paused), sim(Command::TogglePause));
        assert_eq!(
            key_action(" ", GamePhase::Over),
            sim(Command::Restart { autostart: true })
        );
        assert_eq!(key_action(" ", GamePhase::CollisionPending), None);
    }

    #[test]
    fn test_mute_and_escape() {
        assert_eq!(key_action("m", GamePhase::Idle), Some(InputAction::ToggleMute));
        assert_eq!(key_action("Escape", GamePhase::Running), sim(Command::Pause));
        assert!(captures_key(" "));
        assert!(!captures_key("m"));
    }

    #[test]
    fn test_buttons() {
        assert_eq!(Button::Start.command(), Command::Start);
        assert_eq!(Button::Pause.command(), Command::TogglePause);
        assert_eq!(Button::Restart.command(), Command::Restart { autostart: false });
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let mut swipe = SwipeTracker::new();
        assert_eq!(swipe.moved(10.0, 0.0), None);

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.moved(130.0, 110.0), Some(Command::Heading(Heading::Right)));
        assert_eq!(swipe.moved(125.0, 150.0), Some(Command::Heading(Heading::Down)));
        assert_eq!(swipe.moved(90.0, 145.0), Some(Command::Heading(Heading::Left)));
        assert_eq!(swipe.moved(92.0, 100.0), Some(Command::Heading(Heading::Up)));
        assert_eq!(swipe.moved(92.0, 100.0), None);

        swipe.end();
        assert_eq!(swipe.moved(0.0, 0.0), None);
    }
}
