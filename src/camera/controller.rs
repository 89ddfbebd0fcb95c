use glam::{Mat4, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::core::{Camera, CameraUniform};
use crate::input::{CameraAction, CameraInput, GamepadAxis, GamepadState};
use crate::options::CameraOptions;

/// How [`update_camera`] turns input into camera motion.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// The caller moves the camera; updates do nothing.
    Custom,
    /// Unconstrained flight with zoom; middle mouse drag pans.
    Free,
    /// Continuous turntable rotation around the target, zoom only.
    Orbital,
    /// Ground-plane walking with locked pitch.
    #[default]
    FirstPerson,
    /// Ground-plane walking, orbiting the target, with zoom.
    ThirdPerson,
}

impl CameraMode {
    /// Movement ignores the vertical component of the view.
    pub const fn moves_in_world_plane(self) -> bool {
        matches!(self, Self::FirstPerson | Self::ThirdPerson)
    }

    /// Rotations pivot on the target instead of the eye.
    pub const fn rotates_around_target(self) -> bool {
        matches!(self, Self::ThirdPerson | Self::Orbital)
    }

    /// Pitch is clamped short of straight up/down.
    pub const fn locks_view(self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Wheel and zoom keys change the target distance.
    pub const fn zooms(self) -> bool {
        matches!(self, Self::ThirdPerson | Self::Orbital | Self::Free)
    }
}

/// Advance `camera` by one frame of `input` according to `mode`.
///
/// Per-frame steps (`move_speed`, `rotation_speed`, ...) are applied once
/// per call regardless of frame time; only the orbital turntable scales
/// with [`CameraInput::frame_time`].
pub fn update_camera(
    camera: &mut Camera,
    mode: CameraMode,
    input: &CameraInput,
    options: &CameraOptions,
) {
    match mode {
        CameraMode::Custom => {}
        CameraMode::Orbital => {
            camera.yaw(options.orbital_speed * input.frame_time, true);
        }
        CameraMode::Free
        | CameraMode::FirstPerson
        | CameraMode::ThirdPerson => {
            rotate_from_keys(camera, mode, input, options);
            apply_mouse(camera, mode, input, options);
            move_from_keys(camera, mode, input, options);
            if let Some(pad) = input.gamepad {
                apply_gamepad(camera, mode, &pad, options);
            }
            if mode == CameraMode::Free {
                if input.is_down(CameraAction::Up) {
                    camera.move_up(options.move_speed);
                }
                if input.is_down(CameraAction::Down) {
                    camera.move_up(-options.move_speed);
                }
            }
        }
    }

    if mode.zooms() {
        camera.move_to_target(-input.wheel);
        if input.is_pressed(CameraAction::ZoomOut) {
            camera.move_to_target(options.zoom_step);
        }
        if input.is_pressed(CameraAction::ZoomIn) {
            camera.move_to_target(-options.zoom_step);
        }
    }
}

fn rotate_from_keys(
    camera: &mut Camera,
    mode: CameraMode,
    input: &CameraInput,
    options: &CameraOptions,
) {
    let lock = mode.locks_view();
    let around = mode.rotates_around_target();
    let step = options.rotation_speed;

    if input.is_down(CameraAction::PitchDown) {
        camera.pitch(-step, lock, around, false);
    }
    if input.is_down(CameraAction::PitchUp) {
        camera.pitch(step, lock, around, false);
    }
    if input.is_down(CameraAction::YawRight) {
        camera.yaw(-step, around);
    }
    if input.is_down(CameraAction::YawLeft) {
        camera.yaw(step, around);
    }
    if input.is_down(CameraAction::RollLeft) {
        camera.roll(-step);
    }
    if input.is_down(CameraAction::RollRight) {
        camera.roll(step);
    }
}

fn apply_mouse(
    camera: &mut Camera,
    mode: CameraMode,
    input: &CameraInput,
    options: &CameraOptions,
) {
    let delta = input.mouse_delta;
    let in_plane = mode.moves_in_world_plane();

    if mode == CameraMode::Free && input.middle_button_down {
        let pan = options.pan_speed;
        if delta.x > 0.0 {
            camera.move_right(pan, in_plane);
        }
        if delta.x < 0.0 {
            camera.move_right(-pan, in_plane);
        }
        if delta.y > 0.0 {
            camera.move_up(-pan);
        }
        if delta.y < 0.0 {
            camera.move_up(pan);
        }
    } else {
        let around = mode.rotates_around_target();
        let sensitivity = options.mouse_sensitivity;
        camera.yaw(-delta.x * sensitivity, around);
        camera.pitch(-delta.y * sensitivity, mode.locks_view(), around, false);
    }
}

fn move_from_keys(
    camera: &mut Camera,
    mode: CameraMode,
    input: &CameraInput,
    options: &CameraOptions,
) {
    let in_plane = mode.moves_in_world_plane();
    let speed = options.move_speed;

    if input.is_down(CameraAction::Forward) {
        camera.move_forward(speed, in_plane);
    }
    if input.is_down(CameraAction::Left) {
        camera.move_right(-speed, in_plane);
    }
    if input.is_down(CameraAction::Back) {
        camera.move_forward(-speed, in_plane);
    }
    if input.is_down(CameraAction::Right) {
        camera.move_right(speed, in_plane);
    }
}

fn apply_gamepad(
    camera: &mut Camera,
    mode: CameraMode,
    pad: &GamepadState,
    options: &CameraOptions,
) {
    let deadzone = options.gamepad_deadzone;
    let around = mode.rotates_around_target();
    let in_plane = mode.moves_in_world_plane();
    let sensitivity = options.mouse_sensitivity;

    let look_x = past_deadzone(pad.axis(GamepadAxis::RightX), deadzone);
    let look_y = past_deadzone(pad.axis(GamepadAxis::RightY), deadzone);
    camera.yaw(-(look_x * 2.0) * sensitivity, around);
    camera.pitch(
        -(look_y * 2.0) * sensitivity,
        mode.locks_view(),
        around,
        false,
    );

    let move_x = pad.axis(GamepadAxis::LeftX);
    let move_y = pad.axis(GamepadAxis::LeftY);
    let speed = options.move_speed;
    if move_y <= -deadzone {
        camera.move_forward(speed, in_plane);
    }
    if move_x <= -deadzone {
        camera.move_right(-speed, in_plane);
    }
    if move_y >= deadzone {
        camera.move_forward(-speed, in_plane);
    }
    if move_x >= deadzone {
        camera.move_right(speed, in_plane);
    }
}

/// Zero out stick values inside the deadzone.
#[inline]
fn past_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        value
    }
}

/// A camera together with the mode and tuning that drive it.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// The controlled camera. Callers may edit it directly.
    pub camera: Camera,
    mode: CameraMode,
    options: CameraOptions,
}

impl CameraController {
    /// Controller for `camera` using the mode and field of view in
    /// `options`.
    pub fn new(camera: Camera, options: CameraOptions) -> Self {
        let mut controller = Self {
            camera,
            mode: options.mode,
            options: CameraOptions::default(),
        };
        controller.apply_options(options);
        controller
    }

    /// Current mode.
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Switch mode. Takes effect on the next update.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode != self.mode {
            log::debug!("camera mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Active tuning.
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Replace the tuning, mode and field of view.
    pub fn apply_options(&mut self, options: CameraOptions) {
        self.set_mode(options.mode);
        self.camera.fovy = options.fovy;
        self.options = options;
    }

    /// Advance the camera by one frame of input in the current mode.
    pub fn update(&mut self, input: &CameraInput) {
        update_camera(&mut self.camera, self.mode, input, &self.options);
    }

    /// Mode-independent update from explicit deltas. See
    /// [`Camera::update_pro`].
    pub fn update_pro(&mut self, movement: Vec3, rotation: Vec3, zoom: f32) {
        self.camera.update_pro(movement, rotation, zoom);
    }

    /// View matrix of the controlled camera.
    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    /// Projection matrix using the configured clipping planes.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.camera.projection_matrix_with(
            aspect,
            self.options.znear,
            self.options.zfar,
        )
    }

    /// GPU uniform for the current camera state.
    pub fn uniform(&self, aspect: f32) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update(
            &self.camera,
            aspect,
            self.options.znear,
            self.options.zfar,
        );
        uniform
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::math::angle_between;

    const EPS: f32 = 1e-4;

    fn camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, 2.0, 10.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::Y,
            45.0,
        )
    }

    fn run(mode: CameraMode, input: &CameraInput) -> Camera {
        let mut camera = camera();
        update_camera(&mut camera, mode, input, &CameraOptions::default());
        camera
    }

    #[test]
    fn custom_mode_ignores_everything() {
        let input = CameraInput::idle(1.0)
            .with_down(CameraAction::Forward)
            .with_pressed(CameraAction::ZoomIn)
            .with_mouse_delta(Vec2::new(40.0, -12.0))
            .with_wheel(3.0);
        assert_eq!(run(CameraMode::Custom, &input), camera());
    }

    #[test]
    fn orbital_mode_turns_around_target_over_time() {
        let input = CameraInput::idle(1.0).with_down(CameraAction::Forward);
        let orbited = run(CameraMode::Orbital, &input);
        let start = camera();
        assert_eq!(orbited.target, start.target);
        assert!((orbited.target_distance() - 10.0).abs() < EPS);
        let angle = angle_between(
            start.position - start.target,
            orbited.position - orbited.target,
        );
        assert!((angle - 0.5).abs() < EPS);
    }

    #[test]
    fn first_person_walks_on_the_ground_plane() {
        let mut start = camera();
        start.target.y = -3.0;
        let mut moved = start;
        let input = CameraInput::idle(0.016).with_down(CameraAction::Forward);
        update_camera(
            &mut moved,
            CameraMode::FirstPerson,
            &input,
            &CameraOptions::default(),
        );
        let step = moved.position - start.position;
        assert!(step.y.abs() < EPS);
        assert!((step.length() - 0.09).abs() < EPS);
    }

    #[test]
    fn free_mode_flies_along_the_view() {
        let mut start = camera();
        start.target.y = -3.0;
        let mut moved = start;
        let input = CameraInput::idle(0.016).with_down(CameraAction::Forward);
        update_camera(
            &mut moved,
            CameraMode::Free,
            &input,
            &CameraOptions::default(),
        );
        assert!(moved.position.y < start.position.y);
    }

    #[test]
    fn rise_and_sink_only_in_free_mode() {
        let input = CameraInput::idle(0.016).with_down(CameraAction::Up);
        let free = run(CameraMode::Free, &input);
        assert!((free.position.y - 2.09).abs() < EPS);
        let walking = run(CameraMode::FirstPerson, &input);
        assert!((walking.position.y - 2.0).abs() < EPS);
    }

    #[test]
    fn mouse_right_turns_right() {
        let input =
            CameraInput::idle(0.016).with_mouse_delta(Vec2::new(100.0, 0.0));
        let turned = run(CameraMode::FirstPerson, &input);
        assert!(turned.forward().x > 0.0);
        assert!((turned.position - camera().position).length() < EPS);
    }

    #[test]
    fn third_person_mouse_orbits_the_target() {
        let input =
            CameraInput::idle(0.016).with_mouse_delta(Vec2::new(100.0, 30.0));
        let turned = run(CameraMode::ThirdPerson, &input);
        assert!((turned.target - camera().target).length() < EPS);
        assert!((turned.target_distance() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn free_mode_middle_drag_pans() {
        let mut input =
            CameraInput::idle(0.016).with_mouse_delta(Vec2::new(5.0, -5.0));
        input.middle_button_down = true;
        let panned = run(CameraMode::Free, &input);
        let start = camera();
        assert!((panned.forward() - start.forward()).length() < EPS);
        let offset = panned.position - start.position;
        assert!(offset.abs_diff_eq(Vec3::new(0.2, 0.2, 0.0), EPS));
    }

    #[test]
    fn key_rotation_uses_rotation_speed() {
        let input = CameraInput::idle(0.016).with_down(CameraAction::YawLeft);
        let turned = run(CameraMode::FirstPerson, &input);
        let angle = angle_between(camera().forward(), turned.forward());
        assert!((angle - 0.03).abs() < EPS);
        assert!(turned.forward().x < 0.0);
    }

    #[test]
    fn wheel_zoom_depends_on_mode() {
        let input = CameraInput::idle(0.016).with_wheel(1.0);
        let distance = |mode| run(mode, &input).target_distance();
        assert!((distance(CameraMode::ThirdPerson) - 9.0).abs() < EPS);
        assert!((distance(CameraMode::Free) - 9.0).abs() < EPS);
        assert!((distance(CameraMode::FirstPerson) - 10.0).abs() < EPS);
    }

    #[test]
    fn zoom_keys_step_on_press() {
        let zoom_out =
            CameraInput::idle(0.016).with_pressed(CameraAction::ZoomOut);
        let zoomed = run(CameraMode::ThirdPerson, &zoom_out);
        assert!((zoomed.target_distance() - 12.0).abs() < EPS);

        // Held without a fresh press: no step.
        let held = CameraInput::idle(0.016).with_down(CameraAction::ZoomIn);
        let unchanged = run(CameraMode::ThirdPerson, &held);
        assert!((unchanged.target_distance() - 10.0).abs() < EPS);
    }

    #[test]
    fn gamepad_sticks_respect_the_deadzone() {
        let small = GamepadState::default()
            .with_axis(GamepadAxis::LeftY, -0.2)
            .with_axis(GamepadAxis::RightX, 0.2);
        let input = CameraInput::idle(0.016).with_gamepad(small);
        let still = run(CameraMode::FirstPerson, &input);
        assert!((still.position - camera().position).length() < EPS);
        assert!((still.forward() - camera().forward()).length() < EPS);

        let pushed =
            GamepadState::default().with_axis(GamepadAxis::LeftY, -1.0);
        let input = CameraInput::idle(0.016).with_gamepad(pushed);
        let walked = run(CameraMode::FirstPerson, &input);
        assert!(walked.position.abs_diff_eq(Vec3::new(0.0, 2.0, 9.91), EPS));
    }

    #[test]
    fn gamepad_right_stick_turns() {
        let pad = GamepadState::default().with_axis(GamepadAxis::RightX, 1.0);
        let input = CameraInput::idle(0.016).with_gamepad(pad);
        let turned = run(CameraMode::FirstPerson, &input);
        let angle = angle_between(camera().forward(), turned.forward());
        assert!((angle - 0.006).abs() < EPS);
    }

    #[test]
    fn controller_applies_options() {
        let options = CameraOptions {
            mode: CameraMode::ThirdPerson,
            fovy: 70.0,
            ..CameraOptions::default()
        };
        let mut controller = CameraController::new(camera(), options);
        assert_eq!(controller.mode(), CameraMode::ThirdPerson);
        assert_eq!(controller.camera.fovy, 70.0);

        controller.set_mode(CameraMode::Custom);
        controller.update(&CameraInput::idle(0.016).with_wheel(5.0));
        assert_eq!(controller.camera.target_distance(), 10.0);

        controller.update_pro(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 0.0);
        assert!(controller
            .camera
            .position
            .abs_diff_eq(Vec3::new(0.0, 2.0, 9.0), EPS));
    }

    #[test]
    fn controller_projection_uses_configured_planes() {
        let options = CameraOptions {
            znear: 0.5,
            zfar: 50.0,
            ..CameraOptions::default()
        };
        let controller = CameraController::new(camera(), options);
        let expected = Mat4::perspective_rh_gl(
            45.0_f32.to_radians(),
            1.5,
            0.5,
            50.0,
        );
        assert!(controller
            .projection_matrix(1.5)
            .abs_diff_eq(expected, 1e-6));
        let uniform = controller.uniform(1.5);
        assert_eq!(uniform.projection, expected.to_cols_array_2d());
    }
}
