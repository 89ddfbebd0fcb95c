//! Skeletal animation: bone hierarchies, baked clips, pose evaluation,
//! skinning and playback.
//!
//! A [`Skeleton`] is validated once at construction and caches a
//! parents-first traversal order. [`Pose::evaluate`] walks that order to
//! turn a clip frame of local transforms into model-space transforms,
//! which a [`SkinPalette`] converts to skinning matrices.

mod clip;
mod player;
mod pose;
mod skeleton;
mod skinning;

pub use clip::AnimationClip;
pub use player::{AnimationPlayer, FramePolicy};
pub use pose::{evaluate_pose, Pose};
pub use skeleton::{Bone, Skeleton};
pub use skinning::{
    BoneMatrixUniform, SkinPalette, SkinnedMesh, MAX_BONE_INFLUENCES,
};
