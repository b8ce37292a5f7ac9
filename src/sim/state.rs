//! Entity state and the simulation aggregate
//!
//! Everything the step mutates lives in `SimulationState`. Static layout
//! (platforms, pits, goal) stays in `Level` and is only borrowed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::level::{EnemySpawn, Level, PlayerSpawn};

/// Which way an enemy is walking (and its sprite faces)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Horizontal speed while a direction is held
    pub speed: f32,
    /// Upward impulse magnitude
    pub jump_power: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn spawn(spawn: &PlayerSpawn) -> Self {
        Self {
            pos: spawn.rect.pos,
            size: spawn.rect.size,
            vel: Vec2::ZERO,
            speed: spawn.speed,
            jump_power: spawn.jump_power,
            on_ground: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Sprite is mirrored while moving left
    pub fn facing(&self) -> Facing {
        if self.vel.x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// A patrolling zombie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_x: f32,
    pub facing: Facing,
}

impl Enemy {
    pub fn spawn(spawn: &EnemySpawn) -> Self {
        Self {
            pos: spawn.rect.pos,
            size: spawn.rect.size,
            velocity_x: spawn.velocity_x,
            facing: spawn.facing,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Reverse walking direction; the only AI decision an enemy makes
    pub fn turn_around(&mut self) {
        self.velocity_x = -self.velocity_x;
        self.facing = self.facing.flipped();
    }
}

/// A coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub rect: Rect,
    /// Goes false -> true once per session
    pub collected: bool,
}

impl Collectible {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            collected: false,
        }
    }
}

/// A fire: lethal box with a looping flicker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
    /// Animation frame in [0, period)
    pub phase: u32,
}

impl Hazard {
    pub fn new(rect: Rect) -> Self {
        Self { rect, phase: 0 }
    }

    /// Advance the flicker, wrapping at `period`
    pub fn animate(&mut self, period: u32) {
        self.phase = (self.phase + 1) % period.max(1);
    }

    /// Visible flame height for the current phase (collision always uses `rect`)
    pub fn flame_height(&self) -> f32 {
        20.0 + (self.phase as f32 * 0.5).sin() * 5.0
    }
}

/// Horizontal scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

/// All mutable per-session simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub hazards: Vec<Hazard>,
    pub camera: Camera,
    /// Only ever increases within a session
    pub score: u32,
    /// Steps taken this session
    pub time_ticks: u64,
}

impl SimulationState {
    /// Fresh state at the level's initial values
    pub fn new(level: &Level) -> Self {
        Self {
            player: Player::spawn(&level.player),
            enemies: level.enemies.iter().map(Enemy::spawn).collect(),
            collectibles: level.collectibles.iter().copied().map(Collectible::new).collect(),
            hazards: level.hazards.iter().copied().map(Hazard::new).collect(),
            camera: Camera::default(),
            score: 0,
            time_ticks: 0,
        }
    }

    pub fn coins_left(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.collected).count()
    }

    /// Diagnostic only; collecting everything is not a win
    pub fn all_collected(&self) -> bool {
        self.collectibles.iter().all(|c| c.collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_matches_level() {
        let level = Level::eth_oscape();
        let state = SimulationState::new(&level);

        assert_eq!(state.player.pos, Vec2::new(100.0, 300.0));
        assert_eq!(state.player.size, Vec2::new(40.0, 50.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(!state.player.on_ground);
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.enemies[1].velocity_x, -1.5);
        assert_eq!(state.enemies[1].facing, Facing::Left);
        assert_eq!(state.coins_left(), 6);
        assert!(state.hazards.iter().all(|h| h.phase == 0));
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_turn_around_flips_both() {
        let mut enemy = Enemy::spawn(&EnemySpawn::new(0.0, 0.0, 40.0, 45.0, 1.5, Facing::Right));
        enemy.turn_around();
        assert_eq!(enemy.velocity_x, -1.5);
        assert_eq!(enemy.facing, Facing::Left);
        enemy.turn_around();
        assert_eq!(enemy.velocity_x, 1.5);
        assert_eq!(enemy.facing, Facing::Right);
    }

    #[test]
    fn test_hazard_phase_wraps() {
        let mut hazard = Hazard::new(Rect::new(0.0, 0.0, 30.0, 30.0));
        for _ in 0..19 {
            hazard.animate(20);
        }
        assert_eq!(hazard.phase, 19);
        hazard.animate(20);
        assert_eq!(hazard.phase, 0);
    }

    #[test]
    fn test_flame_height_range() {
        let mut hazard = Hazard::new(Rect::new(0.0, 0.0, 30.0, 30.0));
        assert_eq!(hazard.flame_height(), 20.0);
        for _ in 0..20 {
            hazard.animate(20);
            let h = hazard.flame_height();
            assert!((15.0..=25.0).contains(&h));
        }
    }

    #[test]
    fn test_all_collected_diagnostic() {
        let mut state = SimulationState::new(&Level::eth_oscape());
        assert!(!state.all_collected());
        for coin in &mut state.collectibles {
            coin.collected = true;
        }
        assert!(state.all_collected());
        assert_eq!(state.coins_left(), 0);
    }

    #[test]
    fn test_player_facing_follows_velocity() {
        let mut player = Player::spawn(&Level::eth_oscape().player);
        assert_eq!(player.facing(), Facing::Right);
        player.vel.x = -5.0;
        assert_eq!(player.facing(), Facing::Left);
    }
}
