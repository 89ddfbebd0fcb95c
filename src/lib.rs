// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests unwrap freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

//! Camera controller and skeletal pose evaluation for real-time 3D.
//!
//! camrig provides the two per-frame updates a 3D viewer runs before it
//! draws: moving the viewpoint from user input, and posing a skinned model
//! from a baked animation clip.
//!
//! # Key entry points
//!
//! - [`camera::Camera`] - viewpoint with move/yaw/pitch/roll primitives and
//!   view/projection matrices
//! - [`camera::CameraController`] - drives a camera from [`input`] in one
//!   of the [`camera::CameraMode`]s
//! - [`animation::Skeleton`] and [`animation::AnimationClip`] - validated
//!   bone hierarchy and per-frame local transforms
//! - [`animation::evaluate_pose`] / [`animation::Pose::evaluate`] /
//!   [`animation::Pose::evaluate_blended`] - model-space bone transforms
//!   for one frame or a blend of two
//! - [`animation::AnimationPlayer`] - time-driven clip playback
//! - [`options::Options`] - TOML-backed runtime configuration
//!
//! # Frame flow
//!
//! Platform events go into an [`input::InputTracker`]; once per frame its
//! snapshot is handed to the controller, the player is ticked, and the
//! renderer reads the camera uniform and the skinning palette.

pub mod animation;
pub mod camera;
pub mod error;
pub mod input;
pub mod math;
pub mod options;

pub use error::RigError;
