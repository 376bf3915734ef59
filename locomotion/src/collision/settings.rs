/*!
Collision tolerances used by the Rapier-backed physical world.

Notes
- Distances are in meters, time in seconds.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
*/

/// Separation from surfaces kept by the kinematic controller (meters).
/// Too large creates visible gaps; too small risks jitter on contact.
pub const DEFAULT_SKIN: f32 = 0.02;

/// How far below the feet the ground probe reaches (meters).
/// Must exceed `DEFAULT_SKIN` so a resting body still reads as supported.
pub const GROUND_PROBE_DISTANCE: f32 = 0.1;

/// The ground probe starts this far above the feet to avoid starting inside geometry.
pub const GROUND_PROBE_LIFT: f32 = 0.02;

/// Cosine of the steepest slope still counted as ground (~50 degrees).
pub const MIN_GROUND_NORMAL_Y: f32 = 0.64;

/// Practical small distance for comparisons (meters).
pub const DIST_EPS: f32 = 1.0e-4;

/// Fixed step handed to Rapier's character controller when the host did not set one.
pub const DEFAULT_STEP_SECONDS: f32 = 1.0 / 60.0;
