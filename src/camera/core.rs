use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::math::{angle_between, rotate_by_axis_angle};

/// Default near clipping plane distance.
pub const CULL_DISTANCE_NEAR: f32 = 0.01;
/// Default far clipping plane distance.
pub const CULL_DISTANCE_FAR: f32 = 1000.0;

/// Smallest distance `move_to_target` leaves between eye and target.
pub const MIN_TARGET_DISTANCE: f32 = 0.001;

/// Margin in radians kept between the view vector and `±up` when pitch is
/// locked.
pub const PITCH_LOCK_MARGIN: f32 = 0.001;

/// How the camera projects onto the screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Perspective projection; `fovy` is the vertical aperture in degrees.
    #[default]
    Perspective,
    /// Orthographic projection; `fovy` is the view height in world units.
    Orthographic,
    /// No projection configured. The projection matrix is the identity.
    Unset,
}

/// Half-line in world space, as produced by
/// [`Camera::screen_to_world_ray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub position: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Point `distance` units along the ray.
    #[must_use]
    #[inline]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.position + self.direction * distance
    }
}

/// Eye position, look-at target and orientation of a 3D viewpoint.
///
/// Every operation mutates the camera in place. Degenerate states
/// (`position == target`, or `up` parallel to the view vector) are a
/// caller error: the maths keeps running and produces NaN or infinite
/// values instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub position: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction. Normalized before use, never re-orthogonalized.
    pub up: Vec3,
    /// Vertical field of view in degrees (perspective) or view height in
    /// world units (orthographic).
    pub fovy: f32,
    /// Projection mode.
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(10.0, 10.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 45.0,
            projection: Projection::Perspective,
        }
    }
}

impl Camera {
    /// Perspective camera looking from `position` at `target`.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3, up: Vec3, fovy: f32) -> Self {
        Self {
            position,
            target,
            up,
            fovy,
            projection: Projection::Perspective,
        }
    }

    /// Same camera with another projection mode.
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Normalized direction from position towards target.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Normalized up vector. It is not necessarily perpendicular to
    /// [`forward`](Self::forward).
    #[inline]
    pub fn up_direction(&self) -> Vec3 {
        self.up.normalize()
    }

    /// Normalized right vector, `forward × up`.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up_direction()).normalize()
    }

    /// Distance between eye and target.
    #[inline]
    pub fn target_distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Move position and target along the forward vector.
    ///
    /// With `move_in_world_plane` the vertical component is dropped first,
    /// so the camera walks on the ground plane instead of flying.
    pub fn move_forward(&mut self, distance: f32, move_in_world_plane: bool) {
        let mut forward = self.forward();
        if move_in_world_plane {
            forward.y = 0.0;
            forward = forward.normalize();
        }
        self.translate(forward * distance);
    }

    /// Move position and target along the right vector.
    pub fn move_right(&mut self, distance: f32, move_in_world_plane: bool) {
        let mut right = self.right();
        if move_in_world_plane {
            right.y = 0.0;
            right = right.normalize();
        }
        self.translate(right * distance);
    }

    /// Move position and target along the up vector.
    pub fn move_up(&mut self, distance: f32) {
        self.translate(self.up_direction() * distance);
    }

    /// Move the eye closer to (`delta < 0`) or farther from the target.
    ///
    /// The target stays put. The distance never drops below
    /// [`MIN_TARGET_DISTANCE`], so the eye cannot round onto the target.
    pub fn move_to_target(&mut self, delta: f32) {
        let distance =
            (self.target_distance() + delta).max(MIN_TARGET_DISTANCE);
        self.position = self.target - self.forward() * distance;
    }

    /// Rotate about the up vector ("look left/right"), `angle` in radians.
    ///
    /// With `rotate_around_target` the eye orbits a fixed target; otherwise
    /// the target swings around a fixed eye.
    pub fn yaw(&mut self, angle: f32, rotate_around_target: bool) {
        let view = self.target - self.position;
        let view = rotate_by_axis_angle(view, self.up_direction(), angle);
        self.apply_view(view, rotate_around_target);
    }

    /// Rotate about the right vector ("look up/down"), `angle` in radians.
    ///
    /// `lock_view` clamps the angle so the view vector stays at least
    /// [`PITCH_LOCK_MARGIN`] away from `up` and `-up`. The bound is taken
    /// from the current view each call, so the clamp depends on the path
    /// the camera took. `rotate_up` also rotates the stored up vector,
    /// which keeps roll-free flight consistent in free mode.
    pub fn pitch(
        &mut self,
        angle: f32,
        lock_view: bool,
        rotate_around_target: bool,
        rotate_up: bool,
    ) {
        let up = self.up_direction();
        let view = self.target - self.position;

        let mut angle = angle;
        if lock_view {
            let max_angle_up = angle_between(up, view) - PITCH_LOCK_MARGIN;
            if angle > max_angle_up {
                angle = max_angle_up;
            }
            let max_angle_down =
                -angle_between(-up, view) + PITCH_LOCK_MARGIN;
            if angle < max_angle_down {
                angle = max_angle_down;
            }
        }

        let right = self.right();
        let view = rotate_by_axis_angle(view, right, angle);
        self.apply_view(view, rotate_around_target);

        if rotate_up {
            self.up = rotate_by_axis_angle(self.up, right, angle);
        }
    }

    /// Rotate the up vector about the forward vector, `angle` in radians.
    pub fn roll(&mut self, angle: f32) {
        self.up = rotate_by_axis_angle(self.up, self.forward(), angle);
    }

    /// Right-handed look-at view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Projection matrix with the default culling planes.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix_with(
            aspect,
            CULL_DISTANCE_NEAR,
            CULL_DISTANCE_FAR,
        )
    }

    /// Projection matrix with explicit near/far planes (OpenGL clip depth).
    pub fn projection_matrix_with(
        &self,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Mat4 {
        match self.projection {
            Projection::Perspective => Mat4::perspective_rh_gl(
                self.fovy.to_radians(),
                aspect,
                near,
                far,
            ),
            Projection::Orthographic => {
                let top = self.fovy / 2.0;
                let right = top * aspect;
                Mat4::orthographic_rh_gl(-right, right, -top, top, near, far)
            }
            Projection::Unset => Mat4::IDENTITY,
        }
    }

    /// Screen-space position of a world-space point in a `width` x
    /// `height` viewport (origin top-left, y down).
    ///
    /// Points behind the eye project mirrored; callers that care should
    /// check the view-space depth first.
    #[must_use]
    pub fn world_to_screen(
        &self,
        point: Vec3,
        width: f32,
        height: f32,
    ) -> Vec2 {
        let view_proj =
            self.projection_matrix(width / height) * self.view_matrix();
        let clip = view_proj * point.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        )
    }

    /// World-space ray through a screen position in a `width` x `height`
    /// viewport (origin top-left, y down).
    ///
    /// A perspective ray starts at the eye; an orthographic ray starts on
    /// the near plane and runs parallel to the view direction.
    #[must_use]
    pub fn screen_to_world_ray(
        &self,
        screen: Vec2,
        width: f32,
        height: f32,
    ) -> Ray {
        let ndc_x = (screen.x / width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen.y / height) * 2.0;

        let inverse_view_proj = (self.projection_matrix(width / height)
            * self.view_matrix())
        .inverse();
        let unproject = |depth: f32| {
            let world =
                inverse_view_proj * Vec4::new(ndc_x, ndc_y, depth, 1.0);
            world.truncate() / world.w
        };
        // OpenGL clip depth runs from -1 (near) to 1 (far).
        let near = unproject(-1.0);
        let far = unproject(1.0);

        let position = match self.projection {
            Projection::Perspective => self.position,
            Projection::Orthographic | Projection::Unset => near,
        };
        Ray {
            position,
            direction: (far - near).normalize(),
        }
    }

    /// Apply explicit movement, rotation and zoom in one call.
    ///
    /// - `movement`: x forward, y right, z up (world units)
    /// - `rotation`: x yaw, y pitch, z roll (degrees)
    /// - `zoom`: change of target distance
    ///
    /// Order is pitch, yaw, roll, forward, right, up, zoom. Movement stays in
    /// the world plane, pitch is locked, and rotations pivot on the eye.
    pub fn update_pro(&mut self, movement: Vec3, rotation: Vec3, zoom: f32) {
        self.pitch(-rotation.y.to_radians(), true, false, false);
        self.yaw(-rotation.x.to_radians(), false);
        self.roll(rotation.z.to_radians());

        self.move_forward(movement.x, true);
        self.move_right(movement.y, true);
        self.move_up(movement.z);

        self.move_to_target(zoom);
    }

    fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.target += offset;
    }

    fn apply_view(&mut self, view: Vec3, rotate_around_target: bool) {
        if rotate_around_target {
            self.position = self.target - view;
        } else {
            self.target = self.position + view;
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the camera matrices and metadata.
pub struct CameraUniform {
    /// View matrix.
    pub view: [[f32; 4]; 4],
    /// Projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Vertical field of view (degrees or world units).
    pub fovy: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Uniform with identity matrices.
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            fovy: 45.0,
            forward: [0.0, 0.0, -1.0],
            aspect: 1.0,
        }
    }

    /// Update uniform fields from the camera's current state.
    pub fn update(
        &mut self,
        camera: &Camera,
        aspect: f32,
        near: f32,
        far: f32,
    ) {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix_with(aspect, near, far);
        self.view = view.to_cols_array_2d();
        self.projection = projection.to_cols_array_2d();
        self.view_proj = (projection * view).to_cols_array_2d();
        self.position = camera.position.to_array();
        self.fovy = camera.fovy;
        self.forward = camera.forward().to_array();
        self.aspect = aspect;
    }
}
