//! Model-space bone transforms for one frame of a clip.

use glam::Mat4;

use super::clip::AnimationClip;
use super::skeleton::Skeleton;
use crate::math::Transform;

/// World (model-space) transform of every bone, by bone index.
///
/// Reused across frames: [`Pose::evaluate`] only allocates when the bone
/// count grows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pose {
    world: Vec<Transform>,
}

impl Pose {
    /// Empty pose.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pose holding the skeleton's bind pose.
    #[must_use]
    pub fn from_bind_pose(skeleton: &Skeleton) -> Self {
        Self {
            world: skeleton.bind_pose().to_vec(),
        }
    }

    /// Evaluate `clip` at `frame` into this buffer.
    ///
    /// `frame` wraps modulo the clip's frame count. Bones are visited in
    /// the skeleton's parents-first order: a root takes its local transform,
    /// a child composes its local transform onto its parent's world one.
    ///
    /// The clip should satisfy [`AnimationClip::is_valid_for`]. If it does
    /// not, only bones present in both are written, and an empty clip
    /// leaves the pose untouched.
    pub fn evaluate(
        &mut self,
        skeleton: &Skeleton,
        clip: &AnimationClip,
        frame: usize,
    ) {
        let Some(locals) =
            clip.wrap_frame(frame).and_then(|frame| clip.frame(frame))
        else {
            return;
        };
        self.accumulate(skeleton, |bone| locals.get(bone).copied());
    }

    /// Evaluate `clip` between two frames into this buffer.
    ///
    /// The whole part of `frame` picks the frame (wrapped like
    /// [`evaluate`](Self::evaluate)); the fraction blends each local
    /// transform towards the following frame, which after the last frame
    /// is frame 0. Negative or non-finite times evaluate frame 0.
    pub fn evaluate_blended(
        &mut self,
        skeleton: &Skeleton,
        clip: &AnimationClip,
        frame: f32,
    ) {
        let frame = if frame.is_finite() { frame.max(0.0) } else { 0.0 };
        let whole = frame.floor();
        let blend = frame - whole;
        let base = whole as usize;

        let sample = |frame: usize| {
            clip.wrap_frame(frame).and_then(|frame| clip.frame(frame))
        };
        let (Some(from), Some(to)) =
            (sample(base), sample(base.saturating_add(1)))
        else {
            return;
        };
        self.accumulate(skeleton, |bone| {
            let from = from.get(bone)?;
            let to = to.get(bone)?;
            Some(from.lerp(to, blend))
        });
    }

    /// Compose local transforms into world transforms, parents first.
    /// Bones without a local transform keep their previous value.
    fn accumulate(
        &mut self,
        skeleton: &Skeleton,
        mut locals: impl FnMut(usize) -> Option<Transform>,
    ) {
        self.world.resize(skeleton.bone_count(), Transform::IDENTITY);
        for &bone in skeleton.evaluation_order() {
            let Some(local) = locals(bone) else {
                continue;
            };
            self.world[bone] = match skeleton.bones()[bone].parent {
                Some(parent) => self.world[parent].compose(&local),
                None => local,
            };
        }
    }

    /// World transforms, by bone index.
    #[inline]
    pub fn transforms(&self) -> &[Transform] {
        &self.world
    }

    /// World transform of one bone.
    #[inline]
    pub fn get(&self, bone: usize) -> Option<&Transform> {
        self.world.get(bone)
    }

    /// Number of bones in the pose.
    #[inline]
    pub fn len(&self) -> usize {
        self.world.len()
    }

    /// Whether the pose holds no bones.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    /// World matrices, by bone index.
    pub fn matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        self.world.iter().map(Transform::to_matrix)
    }
}

/// Evaluate `clip` at `frame` into a fresh [`Pose`].
///
/// Allocating convenience over [`Pose::evaluate`]; the frame wraps.
#[must_use]
pub fn evaluate_pose(
    skeleton: &Skeleton,
    clip: &AnimationClip,
    frame: usize,
) -> Pose {
    let mut pose = Pose::from_bind_pose(skeleton);
    pose.evaluate(skeleton, clip, frame);
    pose
}
