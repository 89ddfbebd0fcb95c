use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::core::{CULL_DISTANCE_FAR, CULL_DISTANCE_NEAR};
use crate::camera::CameraMode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera mode, projection and control parameters.
pub struct CameraOptions {
    /// How input moves the camera.
    #[schemars(title = "Mode")]
    pub mode: CameraMode,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Distance moved per frame while a movement key is held.
    #[schemars(title = "Move Speed", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub move_speed: f32,
    /// Radians turned per frame while a rotation key is held.
    #[schemars(title = "Rotation Speed", range(min = 0.005, max = 0.2), extend("step" = 0.005))]
    pub rotation_speed: f32,
    /// Distance panned per frame while dragging in free mode.
    #[schemars(title = "Pan Speed", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub pan_speed: f32,
    /// Radians turned per pixel of mouse movement.
    #[schemars(title = "Mouse Sensitivity", range(min = 0.0005, max = 0.02), extend("step" = 0.0005))]
    pub mouse_sensitivity: f32,
    /// Turntable speed in orbital mode, radians per second.
    #[schemars(title = "Orbital Speed", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub orbital_speed: f32,
    /// Stick deflection below which gamepad input is ignored.
    #[schemars(title = "Gamepad Deadzone", range(min = 0.0, max = 0.9), extend("step" = 0.05))]
    pub gamepad_deadzone: f32,
    /// Target distance change per zoom key press.
    #[schemars(title = "Zoom Step", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub zoom_step: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            mode: CameraMode::FirstPerson,
            fovy: 45.0,
            znear: CULL_DISTANCE_NEAR,
            zfar: CULL_DISTANCE_FAR,
            move_speed: 0.09,
            rotation_speed: 0.03,
            pan_speed: 0.2,
            mouse_sensitivity: 0.003,
            orbital_speed: 0.5,
            gamepad_deadzone: 0.25,
            zoom_step: 2.0,
        }
    }
}
