//! Eth OScape - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, enemy patrols, game state)
//! - `level`: Level layout data and loading
//! - `tuning`: Data-driven game balance
//! - `input`: Key-state tracking and the demo autopilot
//! - `runner`: Frame-driven tick source
//! - `settings`: Runtime configuration

pub mod input;
pub mod level;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use level::{Level, LevelError};
pub use settings::{Settings, SettingsError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Target frame rate; one simulation step per frame
    pub const FRAME_HZ: u32 = 60;

    /// Horizontal velocity decay per frame with no movement input
    pub const FRICTION: f32 = 0.8;
    /// Downward acceleration per frame² (no terminal velocity)
    pub const GRAVITY: f32 = 0.8;

    /// Camera trails the player by this many pixels
    pub const CAMERA_LEAD: f32 = 400.0;
    /// Player y beyond this is a fall off the screen
    pub const FALL_LIMIT_Y: f32 = 500.0;

    /// Enemies turn around at or past this x
    pub const ENEMY_PATROL_MAX_X: f32 = 1200.0;
    /// Enemy footing tolerance above a platform top
    pub const ENEMY_FOOT_ABOVE: f32 = 5.0;
    /// Enemy footing tolerance below a platform top
    pub const ENEMY_FOOT_BELOW: f32 = 25.0;

    /// Fire animation cycle length (frames)
    pub const HAZARD_PERIOD: u32 = 20;

    /// Score for each newly collected coin
    pub const POINTS_PER_COLLECTIBLE: u32 = 10;

    /// Completion code length and alphabet
    pub const CODE_LENGTH: usize = 7;
    pub const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Visible canvas size
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 450.0;
}
