//! Folds raw platform events into per-frame camera input.
//!
//! The `InputTracker` owns all transient input state (held keys, cursor
//! tracking, wheel and gamepad state) and the key-binding map. Call
//! [`InputTracker::snapshot`] once per frame, hand the result to the
//! camera controller, then [`InputTracker::end_frame`].

use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use super::state::{CameraAction, CameraInput, GamepadState};

/// Maps physical key strings to [`CameraAction`]s.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyW"`, `"ArrowUp"`, `"NumpadAdd"`, etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → action.
    bindings: FxHashMap<String, CameraAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            ("KeyW", CameraAction::Forward),
            ("KeyS", CameraAction::Back),
            ("KeyA", CameraAction::Left),
            ("KeyD", CameraAction::Right),
            ("Space", CameraAction::Up),
            ("ControlLeft", CameraAction::Down),
            ("ArrowUp", CameraAction::PitchUp),
            ("ArrowDown", CameraAction::PitchDown),
            ("ArrowLeft", CameraAction::YawLeft),
            ("ArrowRight", CameraAction::YawRight),
            ("KeyQ", CameraAction::RollLeft),
            ("KeyE", CameraAction::RollRight),
            ("NumpadAdd", CameraAction::ZoomIn),
            ("NumpadSubtract", CameraAction::ZoomOut),
        ]
        .into_iter()
        .map(|(key, action)| (key.to_owned(), action))
        .collect();
        Self { bindings }
    }
}

impl KeyBindings {
    /// Bindings with no keys mapped.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    /// Look up the action for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<CameraAction> {
        self.bindings.get(key).copied()
    }

    /// Bind a key to an action, returning the action it replaced.
    pub fn bind(
        &mut self,
        key: impl Into<String>,
        action: CameraAction,
    ) -> Option<CameraAction> {
        self.bindings.insert(key.into(), action)
    }

    /// Remove a key binding.
    pub fn unbind(&mut self, key: &str) -> Option<CameraAction> {
        self.bindings.remove(key)
    }

    /// Number of bound keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no keys are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Accumulates input events between frames.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    key_bindings: KeyBindings,
    keys_down: FxHashSet<String>,
    actions_down: FxHashSet<CameraAction>,
    actions_pressed: FxHashSet<CameraAction>,
    buttons_down: FxHashSet<MouseButton>,
    last_cursor: Option<Vec2>,
    mouse_delta: Vec2,
    wheel: f32,
    gamepad: Option<GamepadState>,
}

impl InputTracker {
    /// Tracker with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::default()
        }
    }

    /// Replace the key bindings. Held actions are released.
    pub fn set_key_bindings(&mut self, key_bindings: KeyBindings) {
        self.key_bindings = key_bindings;
        self.keys_down.clear();
        self.actions_down.clear();
        self.actions_pressed.clear();
    }

    /// Active key bindings.
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Process a physical key change. Returns true if the key is bound.
    ///
    /// An action stays down while any key bound to it is held.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        let Some(action) = self.key_bindings.lookup(key) else {
            return false;
        };
        if pressed {
            // Auto-repeat presses only count once.
            if self.keys_down.insert(key.to_owned())
                && self.actions_down.insert(action)
            {
                let _ = self.actions_pressed.insert(action);
            }
        } else {
            let _ = self.keys_down.remove(key);
            if !self.is_action_held(action) {
                let _ = self.actions_down.remove(&action);
            }
        }
        true
    }

    fn is_action_held(&self, action: CameraAction) -> bool {
        self.keys_down
            .iter()
            .any(|key| self.key_bindings.lookup(key) == Some(action))
    }

    /// Process a non-keyboard event. Returns true if the event was used.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::CursorMoved { x, y } => {
                let current = Vec2::new(x, y);
                if let Some(last) = self.last_cursor {
                    self.mouse_delta += current - last;
                }
                self.last_cursor = Some(current);
                true
            }
            InputEvent::MouseMotion { dx, dy } => {
                self.mouse_delta += Vec2::new(dx, dy);
                true
            }
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    let _ = self.buttons_down.insert(button);
                } else {
                    let _ = self.buttons_down.remove(&button);
                }
                true
            }
            InputEvent::Scroll { delta } => {
                self.wheel += delta;
                true
            }
            InputEvent::GamepadConnected { connected } => {
                self.gamepad = connected.then(GamepadState::default);
                true
            }
            InputEvent::GamepadAxis { axis, value } => {
                match self.gamepad.as_mut() {
                    Some(pad) => {
                        pad.axes[axis.index()] = value.clamp(-1.0, 1.0);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Whether a mouse button is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Input accumulated since the last [`end_frame`](Self::end_frame).
    pub fn snapshot(&self, frame_time: f32) -> CameraInput {
        CameraInput {
            mouse_delta: self.mouse_delta,
            actions_down: self.actions_down.clone(),
            actions_pressed: self.actions_pressed.clone(),
            middle_button_down: self.is_button_down(MouseButton::Middle),
            gamepad: self.gamepad,
            wheel: self.wheel,
            frame_time,
        }
    }

    /// Reset per-frame state (mouse delta, wheel, pressed edges).
    ///
    /// Held keys, buttons, cursor position and gamepad axes persist.
    pub fn end_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.wheel = 0.0;
        self.actions_pressed.clear();
    }
}
