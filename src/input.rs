//! Input intent sources
//!
//! `KeyTracker` turns raw key-down/key-up events into the boolean intent the
//! simulation reads each frame. `autopilot` is the demo player used by the
//! headless runner.

use crate::level::Level;
use crate::sim::{SimulationState, TickInput};

/// Logical actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    /// Map a DOM-style key code (`KeyboardEvent.code`) to an action
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Action::MoveRight),
            "ArrowUp" | "KeyW" | "Space" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Tracks which actions are currently held
///
/// No debouncing and no repeat suppression: key-down sets, key-up clears,
/// whichever bound key it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTracker {
    intent: TickInput,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the host should suppress the
    /// key's default behaviour (page scroll on Space/ArrowUp).
    pub fn key_down(&mut self, code: &str) -> bool {
        match Action::from_code(code) {
            Some(action) => {
                self.set(action, true);
                action == Action::Jump
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(action) = Action::from_code(code) {
            self.set(action, false);
        }
    }

    fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.intent.move_left = held,
            Action::MoveRight => self.intent.move_right = held,
            Action::Jump => self.intent.jump = held,
        }
    }

    /// Current intent, read once per frame
    pub fn snapshot(&self) -> TickInput {
        self.intent
    }

    /// Drop all held keys (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.intent = TickInput::default();
    }
}

/// How far ahead of the player's leading edge the autopilot looks for danger
const AUTOPILOT_LOOKAHEAD: f32 = 60.0;

/// Demo player: run right, hop when something lethal starts just ahead
///
/// Only produces intent; never touches the state it reads.
pub fn autopilot(state: &SimulationState, level: &Level) -> TickInput {
    let player = state.player.rect();
    let ahead_start = player.right();
    let ahead_end = ahead_start + AUTOPILOT_LOOKAHEAD;
    let starts_ahead = |x: f32| x >= ahead_start && x <= ahead_end;

    let danger = level.pits.iter().any(|p| starts_ahead(p.left()))
        || state.hazards.iter().any(|h| starts_ahead(h.rect.left()))
        || state.enemies.iter().any(|e| starts_ahead(e.pos.x));

    TickInput {
        move_left: false,
        move_right: true,
        jump: danger && state.player.on_ground,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_code("KeyA"), Some(Action::MoveLeft));
        assert_eq!(Action::from_code("ArrowRight"), Some(Action::MoveRight));
        assert_eq!(Action::from_code("Space"), Some(Action::Jump));
        assert_eq!(Action::from_code("KeyW"), Some(Action::Jump));
        assert_eq!(Action::from_code("KeyS"), None);
    }

    #[test]
    fn test_down_sets_up_clears() {
        let mut keys = KeyTracker::new();
        assert!(!keys.key_down("ArrowLeft"));
        assert!(keys.key_down("Space"));
        assert_eq!(
            keys.snapshot(),
            TickInput {
                move_left: true,
                move_right: false,
                jump: true
            }
        );

        keys.key_up("Space");
        assert!(!keys.snapshot().jump);
        assert!(keys.snapshot().move_left);
    }

    #[test]
    fn test_either_binding_releases_action() {
        let mut keys = KeyTracker::new();
        keys.key_down("KeyD");
        keys.key_down("ArrowRight");
        keys.key_up("ArrowRight");
        // Shared flag per action, not per key
        assert!(!keys.snapshot().move_right);
    }

    #[test]
    fn test_repeat_and_unknown_keys() {
        let mut keys = KeyTracker::new();
        keys.key_down("KeyA");
        keys.key_down("KeyA");
        keys.key_down("Escape");
        keys.key_up("Escape");
        assert!(keys.snapshot().move_left);

        keys.release_all();
        assert_eq!(keys.snapshot(), TickInput::default());
    }

    #[test]
    fn test_autopilot_runs_right() {
        let level = Level::eth_oscape();
        let state = SimulationState::new(&level);
        let intent = autopilot(&state, &level);
        assert!(intent.move_right);
        assert!(!intent.move_left);
        // Airborne at spawn: never jumps
        assert!(!intent.jump);
    }

    #[test]
    fn test_autopilot_jumps_before_pit() {
        let level = Level::eth_oscape();
        let mut state = SimulationState::new(&level);
        // Standing on the ground just left of the first pit (x=300)
        state.player.pos = glam::Vec2::new(220.0, 350.0);
        state.player.on_ground = true;

        assert!(autopilot(&state, &level).jump);

        state.player.pos.x = 100.0;
        assert!(!autopilot(&state, &level).jump);
    }

    #[test]
    fn test_autopilot_ignores_danger_behind() {
        let mut level = Level::eth_oscape();
        level.pits = vec![Rect::new(50.0, 400.0, 50.0, 100.0)];
        level.hazards.clear();
        level.enemies.clear();
        let mut state = SimulationState::new(&level);
        state.player.on_ground = true;
        assert!(!autopilot(&state, &level).jump);
    }
}
