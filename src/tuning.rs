//! Data-driven physics tuning
//!
//! Every constant the player physics reads lives here so balance tweaks can be
//! loaded as JSON without a rebuild. Defaults mirror `crate::consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Physics constants for one player body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Right edge of the playfield; x is clamped to `[0, world_width - width]`
    pub world_width: f32,
    pub death_zone_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Air jumps allowed between landings. Tuning may raise it above the
    /// default of two, but never to zero.
    pub max_jumps: u8,
    pub friction: f32,
    pub angular_friction: f32,
    pub max_angular_velocity: f32,
    pub momentum_spin: f32,
    pub command_spin: f32,
    pub restitution: f32,
    pub velocity_epsilon: f32,
    pub angular_epsilon: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            death_zone_y: DEATH_ZONE_Y,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            move_speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            max_jumps: MAX_JUMPS,
            friction: FRICTION,
            angular_friction: ANGULAR_FRICTION,
            max_angular_velocity: MAX_ANGULAR_VELOCITY,
            momentum_spin: MOMENTUM_SPIN,
            command_spin: COMMAND_SPIN,
            restitution: RESTITUTION,
            velocity_epsilon: VELOCITY_EPSILON,
            angular_epsilon: ANGULAR_EPSILON,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{0}` is not finite")]
    NotFinite(&'static str),
    #[error("tuning field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

impl PhysicsTuning {
    /// Parse and validate a tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject values that would break the physics invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("world_width", self.world_width),
            ("death_zone_y", self.death_zone_y),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("move_speed", self.move_speed),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("friction", self.friction),
            ("angular_friction", self.angular_friction),
            ("max_angular_velocity", self.max_angular_velocity),
            ("momentum_spin", self.momentum_spin),
            ("command_spin", self.command_spin),
            ("restitution", self.restitution),
            ("velocity_epsilon", self.velocity_epsilon),
            ("angular_epsilon", self.angular_epsilon),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NotFinite(field));
            }
        }

        let positive = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("max_angular_velocity", self.max_angular_velocity),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        if self.max_jumps == 0 {
            return Err(TuningError::OutOfRange {
                field: "max_jumps",
                value: 0.0,
            });
        }

        if self.world_width < self.player_width {
            return Err(TuningError::OutOfRange {
                field: "world_width",
                value: self.world_width,
            });
        }

        // Retention factors must shrink motion, never grow it
        let retention = [
            ("friction", self.friction),
            ("angular_friction", self.angular_friction),
        ];
        for (field, value) in retention {
            if !(0.0..1.0).contains(&value) {
                return Err(TuningError::OutOfRange { field, value });
            }
        }
        if !(-1.0..=0.0).contains(&self.restitution) {
            return Err(TuningError::OutOfRange {
                field: "restitution",
                value: self.restitution,
            });
        }

        Ok(())
    }

    /// Rightmost x the player's left edge may reach
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.world_width - self.player_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = PhysicsTuning::default();
        assert_eq!(tuning.world_width, 800.0);
        assert_eq!(tuning.death_zone_y, 500.0);
        assert_eq!(tuning.gravity, 900.0);
        assert_eq!(tuning.jump_impulse, -450.0);
        assert_eq!(tuning.move_speed, 350.0);
        assert_eq!(tuning.max_jumps, 2);
        assert_eq!(tuning.max_x(), 770.0);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = PhysicsTuning::from_json(r#"{ "gravity": 1200.0, "max_jumps": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 1200.0);
        assert_eq!(tuning.max_jumps, 3);
        assert_eq!(tuning.move_speed, MOVE_SPEED);
    }

    #[test]
    fn test_round_trip_through_json() {
        let tuning = PhysicsTuning {
            friction: 0.9,
            ..Default::default()
        };
        let parsed = PhysicsTuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            PhysicsTuning::from_json(r#"{ "friction": 1.5 }"#),
            Err(TuningError::OutOfRange { field: "friction", .. })
        ));
        assert!(matches!(
            PhysicsTuning::from_json(r#"{ "restitution": 0.5 }"#),
            Err(TuningError::OutOfRange { field: "restitution", .. })
        ));
        assert!(matches!(
            PhysicsTuning::from_json(r#"{ "player_width": 0.0 }"#),
            Err(TuningError::OutOfRange { field: "player_width", .. })
        ));
        assert!(matches!(
            PhysicsTuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_zero_jumps() {
        assert!(matches!(
            PhysicsTuning::from_json(r#"{ "max_jumps": 0 }"#),
            Err(TuningError::OutOfRange { field: "max_jumps", .. })
        ));
        assert!(PhysicsTuning::from_json(r#"{ "max_jumps": 1 }"#).is_ok());
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let err = PhysicsTuning::from_json("{").unwrap_err();
        assert!(err.to_string().starts_with("invalid tuning JSON: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_rejects_non_finite() {
        let tuning = PhysicsTuning {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::NotFinite("gravity"))));
    }
}
