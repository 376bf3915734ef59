/// Walking speed on the horizontal plane (meters per second).
pub const WALK_SPEED_MPS: f32 = 5.0;

/// Sprinting speed while the sprint action is held (meters per second).
pub const RUN_SPEED_MPS: f32 = 10.0;

/// Speed while crouched. Crouching always wins over sprinting.
pub const CROUCH_SPEED_MPS: f32 = 2.5;

/// Upward velocity written on a successful jump (meters per second).
pub const JUMP_IMPULSE_MPS: f32 = 7.0;

/// Signed vertical acceleration (meters per second squared). Must be negative.
pub const GRAVITY_MPS2: f32 = -12.0;

/// Vertical velocity held while grounded.
///
/// Kept slightly negative so the next grounded probe still reads "touching" instead of
/// hovering exactly on the surface.
pub const SETTLE_VELOCITY_MPS: f32 = -2.0;

/// Full body height when standing (meters, including the capsule caps).
pub const STANDING_HEIGHT_M: f32 = 2.0;

/// Full body height when crouched (meters).
pub const CROUCHING_HEIGHT_M: f32 = 1.0;

/// Exponential rate used for body height and camera height smoothing (1/s).
pub const CROUCH_TRANSITION_RATE: f32 = 10.0;

/// Distance between the top of the body and the camera (meters).
pub const CAMERA_OFFSET_M: f32 = 0.5;

/// Minimum move-input magnitude counted as "moving" for the footstep cue.
pub const FOOTSTEP_DEADZONE: f32 = 0.1;

/// Height error below which the body snaps exactly onto its target height (meters).
pub const HEIGHT_SNAP_EPSILON_M: f32 = 0.01;

/// Default capsule radius for a freshly spawned body (meters).
pub const DEFAULT_BODY_RADIUS_M: f32 = 0.5;

/// Maximum reach of the line-of-sight interaction ray (meters).
pub const INTERACTION_DISTANCE_M: f32 = 3.0;

/// Default keypad code.
pub const DEFAULT_KEYPAD_CODE: &str = "1234";

/// Default number of digits a keypad accepts before ignoring further input.
pub const DEFAULT_KEYPAD_CODE_LENGTH: usize = 4;
