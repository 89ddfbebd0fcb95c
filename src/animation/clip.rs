//! Baked per-frame local bone transforms.

use super::skeleton::{Bone, Skeleton};
use crate::error::{ClipMismatch, RigError};
use crate::math::Transform;

/// An animation baked to one local transform per bone per frame.
///
/// The frame table is stored flat, row-major by frame:
/// `poses[frame * bone_count + bone]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    name: String,
    bones: Vec<Bone>,
    frame_count: usize,
    poses: Vec<Transform>,
}

impl AnimationClip {
    /// Clip from a flat frame table.
    ///
    /// Fails with [`RigError::InvalidClip`] when `poses` does not hold
    /// exactly `frame_count * bones.len()` transforms.
    pub fn new(
        name: impl Into<String>,
        bones: Vec<Bone>,
        frame_count: usize,
        poses: Vec<Transform>,
    ) -> Result<Self, RigError> {
        let name = name.into();
        let expected = frame_count.checked_mul(bones.len()).ok_or_else(|| {
            RigError::InvalidClip(format!("clip '{name}' is too large"))
        })?;
        if poses.len() != expected {
            return Err(RigError::InvalidClip(format!(
                "clip '{name}' has {} transforms, expected {frame_count} \
                 frames x {} bones",
                poses.len(),
                bones.len()
            )));
        }
        Ok(Self {
            name,
            bones,
            frame_count,
            poses,
        })
    }

    /// Clip from one `Vec` of local transforms per frame.
    pub fn from_frames(
        name: impl Into<String>,
        bones: Vec<Bone>,
        frames: Vec<Vec<Transform>>,
    ) -> Result<Self, RigError> {
        let name = name.into();
        if let Some((frame, row)) = frames
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != bones.len())
        {
            return Err(RigError::InvalidClip(format!(
                "clip '{name}' frame {frame} has {} transforms for {} bones",
                row.len(),
                bones.len()
            )));
        }
        let frame_count = frames.len();
        let poses = frames.into_iter().flatten().collect();
        Self::new(name, bones, frame_count, poses)
    }

    /// Clip name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bone layout the clip was authored for.
    #[inline]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Bones per frame.
    #[inline]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Number of frames.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Whether the clip has no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Local transforms of one frame, `None` past the end.
    pub fn frame(&self, frame: usize) -> Option<&[Transform]> {
        if frame >= self.frame_count {
            return None;
        }
        let start = frame * self.bones.len();
        self.poses.get(start..start + self.bones.len())
    }

    /// Local transform of one bone in one frame.
    pub fn local(&self, frame: usize, bone: usize) -> Option<Transform> {
        self.frame(frame)?.get(bone).copied()
    }

    /// Frame index looped into range, `None` for an empty clip.
    #[inline]
    pub fn wrap_frame(&self, frame: usize) -> Option<usize> {
        frame.checked_rem(self.frame_count)
    }

    /// Frame index held at the last frame, `None` for an empty clip.
    #[inline]
    pub fn clamp_frame(&self, frame: usize) -> Option<usize> {
        self.frame_count.checked_sub(1).map(|last| frame.min(last))
    }

    /// First structural difference between this clip and `skeleton`.
    ///
    /// A clip matches when it has at least one frame and the same bone
    /// count, names and parents per index.
    pub fn validate_against(
        &self,
        skeleton: &Skeleton,
    ) -> Result<(), ClipMismatch> {
        if self.bones.len() != skeleton.bone_count() {
            return Err(ClipMismatch::BoneCount {
                skeleton: skeleton.bone_count(),
                clip: self.bones.len(),
            });
        }
        for (index, (ours, theirs)) in
            self.bones.iter().zip(skeleton.bones()).enumerate()
        {
            if ours.name != theirs.name {
                return Err(ClipMismatch::BoneName {
                    index,
                    expected: theirs.name.clone(),
                    found: ours.name.clone(),
                });
            }
            if ours.parent != theirs.parent {
                return Err(ClipMismatch::BoneParent {
                    index,
                    expected: theirs.parent,
                    found: ours.parent,
                });
            }
        }
        if self.is_empty() {
            return Err(ClipMismatch::NoFrames);
        }
        Ok(())
    }

    /// Whether the clip can drive `skeleton`.
    pub fn is_valid_for(&self, skeleton: &Skeleton) -> bool {
        self.validate_against(skeleton).is_ok()
    }
}
