//! Peripheral collaborators sharing the per-frame loop with the controller:
//! a line-of-sight detector, interactables, and the keypad panel.

pub mod activator;
pub mod detector;
pub mod keypad;

pub use activator::{Interactable, KeypadActivator};
pub use detector::InteractionDetector;
pub use keypad::{Keypad, SubmitOutcome, SuccessCallback};
