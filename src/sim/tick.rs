//! One-frame simulation step
//!
//! Advances the player, coins, zombies and fires by exactly one frame. The
//! order of the phases below matters: when several terminal events happen in
//! the same frame the first one detected is the one reported.

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, overlaps};
use super::state::SimulationState;
use crate::level::Level;
use crate::tuning::Tuning;

/// Input intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Events that end a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    /// Dropped below the bottom of the screen
    Fell,
    HitEnemy,
    HitHazard,
    HitPit,
    /// Walked through the club door
    ReachedGoal,
}

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// First terminal event detected this frame, if any
    pub terminal: Option<Terminal>,
    /// Coins picked up this frame
    pub collected: u32,
}

/// Advance the simulation by one frame
pub fn step(
    state: &mut SimulationState,
    level: &Level,
    input: &TickInput,
    tuning: &Tuning,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    state.time_ticks += 1;

    let player = &mut state.player;

    // Horizontal input; left wins if both are held
    if input.move_left {
        player.vel.x = -player.speed;
    } else if input.move_right {
        player.vel.x = player.speed;
    } else {
        player.vel.x *= tuning.friction;
    }

    // Gated only by on_ground, so a held jump re-fires on landing
    if input.jump && player.on_ground {
        player.vel.y = -player.jump_power;
        player.on_ground = false;
    }

    player.vel.y += tuning.gravity;
    player.pos += player.vel;

    // Land on platforms from above only. No sideways blocking.
    player.on_ground = false;
    for platform in &level.platforms {
        if overlaps(&player.rect(), &platform.rect)
            && player.vel.y > 0.0
            && player.pos.y < platform.rect.top()
        {
            player.pos.y = platform.rect.top() - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
        }
    }

    let player_rect = player.rect();

    for coin in state.collectibles.iter_mut() {
        if !coin.collected && overlaps(&player_rect, &coin.rect) {
            coin.collected = true;
            state.score = state.score.saturating_add(tuning.points_per_collectible);
            outcome.collected += 1;
            log::debug!(
                "Coin collected at ({}, {}), score {}",
                coin.rect.pos.x,
                coin.rect.pos.y,
                state.score
            );
        }
    }

    for enemy in state.enemies.iter_mut() {
        enemy.pos.x += enemy.velocity_x;

        let on_platform = level
            .platforms
            .iter()
            .any(|platform| stands_on(&enemy.rect(), &platform.rect, tuning));

        // Overshoot past an edge is corrected by next frame's motion, not clamped
        if !on_platform || enemy.pos.x <= 0.0 || enemy.pos.x >= tuning.enemy_patrol_max_x {
            enemy.turn_around();
            log::trace!("Enemy turned at x={}", enemy.pos.x);
        }
    }

    if state.enemies.iter().any(|e| overlaps(&player_rect, &e.rect())) {
        report(&mut outcome, Terminal::HitEnemy);
    }

    for hazard in state.hazards.iter_mut() {
        hazard.animate(tuning.hazard_period);
    }

    if state.hazards.iter().any(|h| overlaps(&player_rect, &h.rect)) {
        report(&mut outcome, Terminal::HitHazard);
    }

    if level.pits.iter().any(|pit| overlaps(&player_rect, pit)) {
        report(&mut outcome, Terminal::HitPit);
    }

    if overlaps(&player_rect, &level.goal.door) {
        report(&mut outcome, Terminal::ReachedGoal);
    }

    state.camera.x = tuning.camera_x(state.player.pos.x);

    if state.player.pos.y > tuning.fall_limit_y {
        report(&mut outcome, Terminal::Fell);
    }

    if state.player.pos.x < 0.0 {
        state.player.pos.x = 0.0;
    }

    outcome
}

/// Enemy feet within the footing band of a platform top, horizontally over it
fn stands_on(enemy: &Rect, platform: &Rect, tuning: &Tuning) -> bool {
    enemy.right() > platform.left()
        && enemy.left() < platform.right()
        && enemy.bottom() >= platform.top() - tuning.enemy_foot_above
        && enemy.bottom() <= platform.top() + tuning.enemy_foot_below
}

#[inline]
fn report(outcome: &mut StepOutcome, terminal: Terminal) {
    outcome.terminal.get_or_insert(terminal);
}
