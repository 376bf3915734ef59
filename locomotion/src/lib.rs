pub mod bitmask_flags;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod interaction;
pub mod movement;

pub use collision::{
    CharacterBody, CollisionFlag, CollisionFlags, Footprint, LineOfSight, PhysicsWorld, Quat,
    RapierPhysicsWorld, Vec2, Vec3,
};
pub use config::LocomotionConfig;
pub use error::{ConfigError, LocomotionError};
pub use interaction::{Interactable, InteractionDetector, Keypad, KeypadActivator};
pub use movement::{
    AudioCue, CameraRig, InputDispatcher, InputEvent, LocomotionController, Stance, TickReport,
};
