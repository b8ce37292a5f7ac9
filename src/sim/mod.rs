//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only (completion codes)
//! - Stable iteration order (level order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod machine;
pub mod state;
pub mod tick;
pub mod view;

pub use geometry::{Rect, overlaps};
pub use machine::{GamePhase, LossCause, Session, SessionResult, completion_code};
pub use state::{Camera, Collectible, Enemy, Facing, Hazard, Player, SimulationState};
pub use tick::{StepOutcome, Terminal, TickInput, step};
pub use view::{FlameSprite, FrameView};
