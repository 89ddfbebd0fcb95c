//! Math helpers layered on top of `glam`.
//!
//! `glam` supplies vectors, quaternions and matrices. This module adds the
//! translation/rotation/scale [`Transform`] used by the skeleton code and a
//! couple of vector helpers whose numeric behaviour the camera relies on.

mod transform;
mod vector;

pub use transform::Transform;
pub use vector::{angle_between, rotate_by_axis_angle};
