use thiserror::Error;

/// Reasons a [`crate::LocomotionConfig`] is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`gravity` must pull downward (negative), got {0}")]
    GravityNotDownward(f32),

    #[error("`settle_velocity` must be negative, got {0}")]
    SettleNotDownward(f32),

    #[error("crouching height {crouching} must be below standing height {standing}")]
    CrouchNotLower { standing: f32, crouching: f32 },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Construction failures of a [`crate::LocomotionController`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocomotionError {
    #[error("controller has no camera rig attached")]
    MissingCamera,

    #[error("controller has no character body attached")]
    MissingBody,

    #[error("character body radius must be positive and finite, got {0}")]
    InvalidBodyRadius(f32),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
