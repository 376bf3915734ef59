/*!
Locomotion components and the per-tick orchestrator.

- vertical:   gravity, settle clamp and jump impulse
- horizontal: view-relative direction, speed selection, displacement
- stance:     crouch state machine and height smoothing
- camera:     camera rig handle (view rotation + local offset)
- footsteps:  level-triggered audio cue
- input:      input events, latches and the shared dispatcher
- controller: `LocomotionController`
*/

pub mod camera;
pub mod controller;
pub mod footsteps;
pub mod horizontal;
pub mod input;
pub mod stance;
pub mod vertical;

pub use camera::CameraRig;
pub use controller::{LocomotionController, LocomotionControllerBuilder, TickReport};
pub use footsteps::AudioCue;
pub use input::{InputBridge, InputDispatcher, InputEvent, SubscriptionId};
pub use stance::Stance;
pub use vertical::VerticalIntegrator;
