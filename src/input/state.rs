use glam::Vec2;
use rustc_hash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::event::GamepadAxis;

/// Camera actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// KeyW = "forward"
/// NumpadAdd = "zoom_in"
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CameraAction {
    /// Move along the view direction.
    Forward,
    /// Move against the view direction.
    Back,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
    /// Rise (free mode only).
    Up,
    /// Sink (free mode only).
    Down,
    /// Look up.
    PitchUp,
    /// Look down.
    PitchDown,
    /// Turn left.
    YawLeft,
    /// Turn right.
    YawRight,
    /// Tilt the horizon counter-clockwise.
    RollLeft,
    /// Tilt the horizon clockwise.
    RollRight,
    /// Step towards the target (edge-triggered).
    ZoomIn,
    /// Step away from the target (edge-triggered).
    ZoomOut,
}

/// Analog state of a connected gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadState {
    /// Axis values in `[-1, 1]`, indexed by [`GamepadAxis::index`].
    pub axes: [f32; GamepadAxis::COUNT],
}

impl GamepadState {
    /// Current value of an axis.
    #[inline]
    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis.index()]
    }

    /// Same state with one axis replaced.
    #[must_use]
    pub fn with_axis(mut self, axis: GamepadAxis, value: f32) -> Self {
        self.axes[axis.index()] = value;
        self
    }
}

/// Everything the camera controller reads from the input devices for one
/// frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraInput {
    /// Mouse movement since the previous frame, in pixels.
    pub mouse_delta: Vec2,
    /// Actions whose key is held.
    pub actions_down: FxHashSet<CameraAction>,
    /// Actions whose key went down during this frame.
    pub actions_pressed: FxHashSet<CameraAction>,
    /// Whether the middle mouse button is held (pans in free mode).
    pub middle_button_down: bool,
    /// Gamepad axes, `None` when no gamepad is connected.
    pub gamepad: Option<GamepadState>,
    /// Scroll wheel movement during this frame.
    pub wheel: f32,
    /// Seconds elapsed since the previous frame.
    pub frame_time: f32,
}

impl CameraInput {
    /// Empty input for a frame of the given duration.
    #[must_use]
    pub fn idle(frame_time: f32) -> Self {
        Self {
            frame_time,
            ..Self::default()
        }
    }

    /// Whether the action's key is held.
    #[inline]
    pub fn is_down(&self, action: CameraAction) -> bool {
        self.actions_down.contains(&action)
    }

    /// Whether the action's key went down this frame.
    #[inline]
    pub fn is_pressed(&self, action: CameraAction) -> bool {
        self.actions_pressed.contains(&action)
    }

    /// Same input with an action held.
    #[must_use]
    pub fn with_down(mut self, action: CameraAction) -> Self {
        let _ = self.actions_down.insert(action);
        self
    }

    /// Same input with an action pressed (and held) this frame.
    #[must_use]
    pub fn with_pressed(mut self, action: CameraAction) -> Self {
        let _ = self.actions_pressed.insert(action);
        let _ = self.actions_down.insert(action);
        self
    }

    /// Same input with the given mouse movement.
    #[must_use]
    pub fn with_mouse_delta(mut self, delta: Vec2) -> Self {
        self.mouse_delta = delta;
        self
    }

    /// Same input with the given wheel movement.
    #[must_use]
    pub fn with_wheel(mut self, wheel: f32) -> Self {
        self.wheel = wheel;
        self
    }

    /// Same input with a connected gamepad.
    #[must_use]
    pub fn with_gamepad(mut self, gamepad: GamepadState) -> Self {
        self.gamepad = Some(gamepad);
        self
    }
}
