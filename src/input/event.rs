/// Platform-agnostic input events.
///
/// These are fed into an [`InputTracker`](super::InputTracker). Keyboard
/// input goes through
/// [`InputTracker::handle_key`](super::InputTracker::handle_key) instead,
/// because keys are identified by their physical key string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Raw relative mouse motion (e.g. with a grabbed cursor).
    MouseMotion {
        /// Horizontal motion in pixels.
        dx: f32,
        /// Vertical motion in pixels.
        dy: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = away from the user).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// The first gamepad was plugged in or removed.
    GamepadConnected {
        /// Whether a gamepad is now available.
        connected: bool,
    },
    /// A gamepad axis moved.
    GamepadAxis {
        /// Axis that changed.
        axis: GamepadAxis,
        /// New value in `[-1, 1]`.
        value: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Gamepad analog axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    /// Left stick, horizontal.
    LeftX,
    /// Left stick, vertical (negative = pushed forward).
    LeftY,
    /// Right stick, horizontal.
    RightX,
    /// Right stick, vertical.
    RightY,
    /// Left trigger pressure.
    LeftTrigger,
    /// Right trigger pressure.
    RightTrigger,
}

impl GamepadAxis {
    /// Number of axes.
    pub const COUNT: usize = 6;

    /// Index into a per-axis array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
