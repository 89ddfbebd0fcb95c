//! Camera system for 3D scene viewing.
//!
//! [`Camera`] holds the viewpoint and the primitive move/rotate operations;
//! [`CameraController`] drives it from per-frame input in one of the
//! [`CameraMode`]s.

/// Mode-driven camera updates.
pub mod controller;
/// Camera struct, primitive operations and GPU uniform.
pub mod core;

pub use self::controller::{update_camera, CameraController, CameraMode};
pub use self::core::{Camera, CameraUniform, Projection, Ray};
