//! Data-driven game balance
//!
//! Defaults reproduce the shipped feel exactly; a settings file may override
//! any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// A tuning value the simulation cannot run with
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("friction must be within 0..=1, got {0}")]
    FrictionOutOfRange(f32),
    #[error("hazard_period must be at least 1")]
    ZeroHazardPeriod,
}

/// Physics and gameplay knobs consumed by the simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal velocity multiplier per frame when no direction is held
    pub friction: f32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Camera offset = max(0, player.x - camera_lead)
    pub camera_lead: f32,
    /// Falling below this y loses the run
    pub fall_limit_y: f32,
    /// Right-hand patrol bound for enemies
    pub enemy_patrol_max_x: f32,
    /// How far above a platform top an enemy's feet may be and still stand on it
    pub enemy_foot_above: f32,
    /// How far below a platform top an enemy's feet may sink and still stand on it
    pub enemy_foot_below: f32,
    /// Fire animation period in frames
    pub hazard_period: u32,
    /// Points per coin
    pub points_per_collectible: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            gravity: GRAVITY,
            camera_lead: CAMERA_LEAD,
            fall_limit_y: FALL_LIMIT_Y,
            enemy_patrol_max_x: ENEMY_PATROL_MAX_X,
            enemy_foot_above: ENEMY_FOOT_ABOVE,
            enemy_foot_below: ENEMY_FOOT_BELOW,
            hazard_period: HAZARD_PERIOD,
            points_per_collectible: POINTS_PER_COLLECTIBLE,
        }
    }
}

impl Tuning {
    /// Camera offset for a player at `player_x`
    #[inline]
    pub fn camera_x(&self, player_x: f32) -> f32 {
        (player_x - self.camera_lead).max(0.0)
    }

    /// Reject values that would stall or blow up the step
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("camera_lead", self.camera_lead),
            ("fall_limit_y", self.fall_limit_y),
            ("enemy_patrol_max_x", self.enemy_patrol_max_x),
            ("enemy_foot_above", self.enemy_foot_above),
            ("enemy_foot_below", self.enemy_foot_below),
        ];
        if let Some(&(field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NotFinite { field, value });
        }

        let non_negative = [
            ("camera_lead", self.camera_lead),
            ("enemy_patrol_max_x", self.enemy_patrol_max_x),
            ("enemy_foot_above", self.enemy_foot_above),
            ("enemy_foot_below", self.enemy_foot_below),
        ];
        if let Some(&(field, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(TuningError::Negative { field, value });
        }

        if !(0.0..=1.0).contains(&self.friction) {
            return Err(TuningError::FrictionOutOfRange(self.friction));
        }
        if self.hazard_period == 0 {
            return Err(TuningError::ZeroHazardPeriod);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gravity": 1.2 }"#).unwrap();
        assert_eq!(tuning.gravity, 1.2);
        assert_eq!(tuning.friction, FRICTION);
        assert_eq!(tuning.hazard_period, 20);
    }

    #[test]
    fn test_camera_never_negative() {
        let tuning = Tuning::default();
        assert_eq!(tuning.camera_x(0.0), 0.0);
        assert_eq!(tuning.camera_x(399.0), 0.0);
        assert_eq!(tuning.camera_x(650.0), 250.0);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let tuning = Tuning {
            gravity: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotFinite { field: "gravity", .. })
        ));

        let tuning = Tuning {
            enemy_foot_below: -1.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Negative { field: "enemy_foot_below", .. })
        ));

        let tuning = Tuning {
            friction: 1.5,
            ..Tuning::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::FrictionOutOfRange(1.5)));

        let tuning = Tuning {
            hazard_period: 0,
            ..Tuning::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::ZeroHazardPeriod));
    }
}
