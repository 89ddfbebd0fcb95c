//! Input handling: platform-agnostic events, key bindings, and the tracker
//! that folds a frame's events into a [`CameraInput`] snapshot.

/// Platform-agnostic input events.
pub mod event;
/// Per-frame input snapshot consumed by the camera controller.
pub mod state;
/// Event accumulation and key bindings.
pub mod tracker;

pub use event::{GamepadAxis, InputEvent, MouseButton};
pub use state::{CameraAction, CameraInput, GamepadState};
pub use tracker::{InputTracker, KeyBindings};
