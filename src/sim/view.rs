//! Read-only frame snapshot for presentation
//!
//! A renderer gets everything it needs to draw one frame from here and has
//! no way to write back into the simulation.

use glam::Vec2;

use super::geometry::Rect;
use super::state::{Collectible, Enemy, Facing, Hazard, Player, SimulationState};
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::level::{Goal, Level, Platform};

/// Borrowed view of one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    state: &'a SimulationState,
    level: &'a Level,
}

/// Fire draw data for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameSprite {
    pub rect: Rect,
    pub flame_height: f32,
}

impl<'a> FrameView<'a> {
    pub fn new(state: &'a SimulationState, level: &'a Level) -> Self {
        Self { state, level }
    }

    pub fn camera_x(&self) -> f32 {
        self.state.camera.x
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn coins_left(&self) -> usize {
        self.state.coins_left()
    }

    pub fn player(&self) -> &'a Player {
        &self.state.player
    }

    /// Mirror the player sprite when this is `Facing::Left`
    pub fn player_facing(&self) -> Facing {
        self.state.player.facing()
    }

    pub fn platforms(&self) -> &'a [Platform] {
        &self.level.platforms
    }

    pub fn enemies(&self) -> &'a [Enemy] {
        &self.state.enemies
    }

    /// Coins still on the map
    pub fn visible_coins(&self) -> impl Iterator<Item = &'a Collectible> + 'a {
        self.state.collectibles.iter().filter(|c| !c.collected)
    }

    pub fn hazards(&self) -> &'a [Hazard] {
        &self.state.hazards
    }

    pub fn flames(&self) -> impl Iterator<Item = FlameSprite> + 'a {
        self.state.hazards.iter().map(|h| FlameSprite {
            rect: h.rect,
            flame_height: h.flame_height(),
        })
    }

    pub fn pits(&self) -> &'a [Rect] {
        &self.level.pits
    }

    pub fn goal(&self) -> &'a Goal {
        &self.level.goal
    }

    /// Visible window in world space
    pub fn viewport(&self) -> Rect {
        Rect::new(self.state.camera.x, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    /// World-space rectangle to screen space
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        Rect::from_pos_size(rect.pos - Vec2::new(self.state.camera.x, 0.0), rect.size)
    }

    /// Skip drawing anything outside the window
    pub fn on_screen(&self, rect: &Rect) -> bool {
        rect.overlaps(&self.viewport())
    }

    /// HUD line as the canvas shows it
    pub fn hud_text(&self) -> String {
        format!("Score: {}  Coins Left: {}", self.score(), self.coins_left())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_reflects_state() {
        let level = Level::eth_oscape();
        let mut state = SimulationState::new(&level);
        state.collectibles[2].collected = true;
        state.score = 10;
        state.camera.x = 300.0;
        state.player.vel.x = -2.0;

        let view = FrameView::new(&state, &level);
        assert_eq!(view.score(), 10);
        assert_eq!(view.coins_left(), 5);
        assert_eq!(view.visible_coins().count(), 5);
        assert_eq!(view.camera_x(), 300.0);
        assert_eq!(view.player_facing(), Facing::Left);
        assert_eq!(view.platforms().len(), 9);
        assert_eq!(view.pits().len(), 2);
        assert_eq!(view.goal().door, Rect::new(1440.0, 360.0, 40.0, 40.0));
        assert_eq!(view.hud_text(), "Score: 10  Coins Left: 5");
    }

    #[test]
    fn test_flames_follow_phase() {
        let level = Level::eth_oscape();
        let mut state = SimulationState::new(&level);
        state.hazards[0].phase = 3;

        let view = FrameView::new(&state, &level);
        let flames: Vec<FlameSprite> = view.flames().collect();
        assert_eq!(flames.len(), 4);
        assert_eq!(flames[1].flame_height, 20.0);
        assert!((flames[0].flame_height - (20.0 + 1.5f32.sin() * 5.0)).abs() < 1e-5);
    }

    #[test]
    fn test_on_screen_uses_camera() {
        let level = Level::eth_oscape();
        let mut state = SimulationState::new(&level);
        let club = level.goal.building;

        let view = FrameView::new(&state, &level);
        assert!(!view.on_screen(&club));

        state.camera.x = 1000.0;
        let view = FrameView::new(&state, &level);
        assert!(view.on_screen(&club));
        assert_eq!(view.to_screen(&club), Rect::new(400.0, 300.0, 120.0, 100.0));
    }
}
