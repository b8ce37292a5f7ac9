//! Level layout
//!
//! Immutable description of one level: platforms, coins, zombie roster,
//! fires, pits and the club whose door is the goal. Loaded fully before any
//! session starts; the simulation only ever borrows it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::geometry::Rect;
use crate::sim::state::Facing;

/// Errors raised while loading level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level has no name")]
    Unnamed,
    #[error("{what} #{index} has a negative or non-finite rectangle")]
    DegenerateRect { what: &'static str, index: usize },
    #[error("player spawn is invalid: {0}")]
    BadSpawn(&'static str),
}

/// Platform colouring; cosmetic only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    #[default]
    Grey,
    Blue,
}

impl Surface {
    /// Fill colour as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            Surface::Grey => 0x6b7280,
            Surface::Blue => 0x3b82f6,
        }
    }
}

/// A static obstacle the player can land on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    #[serde(default)]
    pub surface: Surface,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, surface: Surface) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            surface,
        }
    }
}

/// Initial player body and movement stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub rect: Rect,
    /// Horizontal speed while a direction is held
    pub speed: f32,
    /// Upward velocity applied on jump
    pub jump_power: f32,
}

/// Initial state of one patrolling zombie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub rect: Rect,
    pub velocity_x: f32,
    pub facing: Facing,
}

impl EnemySpawn {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, velocity_x: f32, facing: Facing) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            velocity_x,
            facing,
        }
    }
}

/// The club. Only the door counts for collision; the building is scenery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub building: Rect,
    pub door: Rect,
}

/// Complete level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub player: PlayerSpawn,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Rect>,
    pub enemies: Vec<EnemySpawn>,
    pub hazards: Vec<Rect>,
    pub pits: Vec<Rect>,
    pub goal: Goal,
}

impl Default for Level {
    fn default() -> Self {
        Self::eth_oscape()
    }
}

impl Level {
    /// The shipped level: a street run from the start lot to the club
    pub fn eth_oscape() -> Self {
        use Surface::{Blue, Grey};

        Self {
            name: "Eth OScape".to_string(),
            player: PlayerSpawn {
                rect: Rect::new(100.0, 300.0, 40.0, 50.0),
                speed: 5.0,
                jump_power: 15.0,
            },
            platforms: vec![
                Platform::new(0.0, 400.0, 300.0, 30.0, Grey), // ground
                Platform::new(350.0, 400.0, 200.0, 30.0, Grey), // between pits
                Platform::new(600.0, 400.0, 300.0, 30.0, Grey), // ground
                Platform::new(200.0, 320.0, 150.0, 20.0, Blue),
                Platform::new(400.0, 250.0, 150.0, 20.0, Grey),
                Platform::new(600.0, 180.0, 150.0, 20.0, Blue),
                Platform::new(800.0, 300.0, 200.0, 20.0, Grey),
                Platform::new(1050.0, 220.0, 150.0, 20.0, Blue),
                Platform::new(1250.0, 400.0, 300.0, 30.0, Grey), // final ground
            ],
            collectibles: vec![
                Rect::new(250.0, 280.0, 25.0, 25.0),
                Rect::new(450.0, 210.0, 25.0, 25.0),
                Rect::new(650.0, 140.0, 25.0, 25.0),
                Rect::new(850.0, 260.0, 25.0, 25.0),
                Rect::new(1100.0, 180.0, 25.0, 25.0),
                Rect::new(1300.0, 360.0, 25.0, 25.0),
            ],
            enemies: vec![
                EnemySpawn::new(300.0, 350.0, 40.0, 45.0, 1.0, Facing::Right),
                EnemySpawn::new(700.0, 270.0, 40.0, 45.0, -1.5, Facing::Left),
                EnemySpawn::new(900.0, 270.0, 40.0, 45.0, 1.0, Facing::Right),
            ],
            hazards: vec![
                Rect::new(320.0, 370.0, 30.0, 30.0),
                Rect::new(520.0, 220.0, 30.0, 30.0),
                Rect::new(780.0, 270.0, 30.0, 30.0),
                Rect::new(1200.0, 370.0, 30.0, 30.0),
            ],
            pits: vec![
                Rect::new(300.0, 400.0, 50.0, 100.0),
                Rect::new(550.0, 400.0, 50.0, 100.0),
            ],
            goal: Goal {
                building: Rect::new(1400.0, 300.0, 120.0, 100.0),
                door: Rect::new(1440.0, 360.0, 40.0, 40.0),
            },
        }
    }

    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Read, parse and validate a level file
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&json)?;
        log::info!(
            "Loaded level '{}' from {}: {} platforms, {} coins, {} enemies",
            level.name,
            path.display(),
            level.platforms.len(),
            level.collectibles.len(),
            level.enemies.len()
        );
        Ok(level)
    }

    pub fn to_json_pretty(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject layouts the simulation assumes never happen
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.name.trim().is_empty() {
            return Err(LevelError::Unnamed);
        }

        if self.player.rect.is_degenerate() {
            return Err(LevelError::BadSpawn("player rectangle"));
        }
        if !(self.player.speed.is_finite() && self.player.speed >= 0.0) {
            return Err(LevelError::BadSpawn("speed must be a non-negative number"));
        }
        if !(self.player.jump_power.is_finite() && self.player.jump_power >= 0.0) {
            return Err(LevelError::BadSpawn("jump power must be a non-negative number"));
        }

        check_rects("platform", self.platforms.iter().map(|p| &p.rect))?;
        check_rects("collectible", self.collectibles.iter())?;
        check_rects("enemy", self.enemies.iter().map(|e| &e.rect))?;
        check_rects("hazard", self.hazards.iter())?;
        check_rects("pit", self.pits.iter())?;
        check_rects("goal", [&self.goal.building, &self.goal.door])?;

        Ok(())
    }
}

fn check_rects<'a>(
    what: &'static str,
    rects: impl IntoIterator<Item = &'a Rect>,
) -> Result<(), LevelError> {
    match rects.into_iter().position(Rect::is_degenerate) {
        Some(index) => Err(LevelError::DegenerateRect { what, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_builtin_level_is_valid() {
        let level = Level::eth_oscape();
        level.validate().unwrap();
        assert_eq!(level.platforms.len(), 9);
        assert_eq!(level.collectibles.len(), 6);
        assert_eq!(level.enemies.len(), 3);
        assert_eq!(level.hazards.len(), 4);
        assert_eq!(level.pits.len(), 2);
        assert_eq!(level.player.rect.pos, Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_json_round_trip_preserves_layout() {
        let level = Level::eth_oscape();
        let json = level.to_json_pretty().unwrap();
        let parsed = Level::from_json(&json).unwrap();
        assert_eq!(parsed, level);
    }

    #[test]
    fn test_surface_defaults_to_grey() {
        let platform: Platform =
            serde_json::from_str(r#"{ "rect": { "pos": [0, 400], "size": [300, 30] } }"#).unwrap();
        assert_eq!(platform.surface, Surface::Grey);
        assert_eq!(platform.surface.color(), 0x6b7280);
    }

    #[test]
    fn test_rejects_negative_pit() {
        let mut level = Level::eth_oscape();
        level.pits[1].size.y = -100.0;
        match level.validate() {
            Err(LevelError::DegenerateRect { what, index }) => {
                assert_eq!(what, "pit");
                assert_eq!(index, 1);
            }
            other => panic!("expected degenerate pit, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unnamed_level() {
        let mut level = Level::eth_oscape();
        level.name = "   ".to_string();
        assert!(matches!(level.validate(), Err(LevelError::Unnamed)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Level::from_json("{ not json"),
            Err(LevelError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Level::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
