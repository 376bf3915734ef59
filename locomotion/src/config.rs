/*!
Session-immutable tuning for the locomotion controller.

Every field has a default taken from [`crate::constants`], so a TOML file only needs to
list the values it overrides:

```toml
run_speed = 8.0
crouching_height = 1.2
```

Notes
- Distances are in meters, time in seconds.
- The config is validated once, when the controller is built; it never changes afterwards.
*/

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        CAMERA_OFFSET_M, CROUCH_SPEED_MPS, CROUCH_TRANSITION_RATE, CROUCHING_HEIGHT_M,
        FOOTSTEP_DEADZONE, GRAVITY_MPS2, HEIGHT_SNAP_EPSILON_M, JUMP_IMPULSE_MPS, RUN_SPEED_MPS,
        SETTLE_VELOCITY_MPS, STANDING_HEIGHT_M, WALK_SPEED_MPS,
    },
    error::ConfigError,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,

    /// Velocity written on jump, not added.
    pub jump_impulse: f32,
    /// Signed; negative pulls down.
    pub gravity: f32,
    pub settle_velocity: f32,

    pub standing_height: f32,
    pub crouching_height: f32,
    /// Exponential rate shared by body height and camera height smoothing.
    pub crouch_transition_rate: f32,
    /// Camera sits this far below the top of the body.
    pub camera_offset: f32,
    pub height_snap_epsilon: f32,

    pub footstep_deadzone: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED_MPS,
            run_speed: RUN_SPEED_MPS,
            crouch_speed: CROUCH_SPEED_MPS,
            jump_impulse: JUMP_IMPULSE_MPS,
            gravity: GRAVITY_MPS2,
            settle_velocity: SETTLE_VELOCITY_MPS,
            standing_height: STANDING_HEIGHT_M,
            crouching_height: CROUCHING_HEIGHT_M,
            crouch_transition_rate: CROUCH_TRANSITION_RATE,
            camera_offset: CAMERA_OFFSET_M,
            height_snap_epsilon: HEIGHT_SNAP_EPSILON_M,
            footstep_deadzone: FOOTSTEP_DEADZONE,
        }
    }
}

impl LocomotionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("crouch_speed", self.crouch_speed),
            ("jump_impulse", self.jump_impulse),
            ("gravity", self.gravity),
            ("settle_velocity", self.settle_velocity),
            ("standing_height", self.standing_height),
            ("crouching_height", self.crouching_height),
            ("crouch_transition_rate", self.crouch_transition_rate),
            ("camera_offset", self.camera_offset),
            ("height_snap_epsilon", self.height_snap_epsilon),
            ("footstep_deadzone", self.footstep_deadzone),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("crouch_speed", self.crouch_speed),
            ("jump_impulse", self.jump_impulse),
            ("height_snap_epsilon", self.height_snap_epsilon),
            ("footstep_deadzone", self.footstep_deadzone),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("standing_height", self.standing_height),
            ("crouching_height", self.crouching_height),
            ("crouch_transition_rate", self.crouch_transition_rate),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.gravity >= 0.0 {
            return Err(ConfigError::GravityNotDownward(self.gravity));
        }
        if self.settle_velocity >= 0.0 {
            return Err(ConfigError::SettleNotDownward(self.settle_velocity));
        }
        if self.crouching_height >= self.standing_height {
            return Err(ConfigError::CrouchNotLower {
                standing: self.standing_height,
                crouching: self.crouching_height,
            });
        }

        Ok(())
    }

    /// Camera height above the body origin for a given body height.
    #[inline]
    pub fn camera_height_for(&self, body_height: f32) -> f32 {
        body_height - self.camera_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LocomotionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config = LocomotionConfig::from_toml_str("run_speed = 8.0\ncrouching_height = 1.2\n")
            .expect("valid config");

        assert_eq!(config.run_speed, 8.0);
        assert_eq!(config.crouching_height, 1.2);
        assert_eq!(config.walk_speed, WALK_SPEED_MPS);
        assert_eq!(config.gravity, GRAVITY_MPS2);
    }

    #[test]
    fn rejects_upward_gravity() {
        let err = LocomotionConfig::from_toml_str("gravity = 10.0").unwrap_err();
        assert_eq!(err, ConfigError::GravityNotDownward(10.0));
    }

    #[test]
    fn rejects_crouch_taller_than_stand() {
        let config = LocomotionConfig {
            crouching_height: 2.5,
            ..LocomotionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CrouchNotLower { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let config = LocomotionConfig {
            walk_speed: f32::NAN,
            ..LocomotionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "walk_speed", .. })
        ));
    }

    #[test]
    fn rejects_unknown_toml_types() {
        let err = LocomotionConfig::from_toml_str("walk_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LocomotionConfig::load("/definitely/not/here/locomotion.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
