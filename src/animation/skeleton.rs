//! Bone hierarchy stored as a flat arena with parent indices.

use rustc_hash::FxHashMap;

use crate::error::{RigError, SkeletonError};
use crate::math::Transform;

/// A named node of a skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bone {
    /// Bone name, unique within a well-formed skeleton.
    pub name: String,
    /// Index of the parent bone, `None` for roots.
    pub parent: Option<usize>,
}

impl Bone {
    /// Bone with an optional parent.
    pub fn new(name: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            parent,
        }
    }

    /// Root bone.
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Bone parented to the bone at index `parent`.
    pub fn child(name: impl Into<String>, parent: usize) -> Self {
        Self::new(name, Some(parent))
    }

    /// Bone from a loader-style parent index where any negative value
    /// (conventionally `-1`) means "no parent".
    pub fn from_raw_parent(name: impl Into<String>, parent: i32) -> Self {
        Self::new(name, usize::try_from(parent).ok())
    }

    /// Whether the bone has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A bone forest with its bind pose.
///
/// Parents are referenced by index and may appear after their children in
/// the bone list. A parents-first traversal order is computed once here,
/// so pose evaluation never relies on array order.
#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<Bone>,
    /// Model-space rest transform per bone.
    bind_pose: Vec<Transform>,
    /// Every bone appears after its parent.
    order: Vec<usize>,
    by_name: FxHashMap<String, usize>,
}

impl Skeleton {
    /// Build a skeleton, validating parent links and the bind pose.
    ///
    /// `bind_pose` holds one model-space transform per bone. Parent indices
    /// out of range, parent cycles (including a bone parenting itself) and
    /// a bind pose of the wrong length are rejected.
    pub fn new(
        bones: Vec<Bone>,
        bind_pose: Vec<Transform>,
    ) -> Result<Self, RigError> {
        if bind_pose.len() != bones.len() {
            return Err(SkeletonError::BindPoseLength {
                bones: bones.len(),
                transforms: bind_pose.len(),
            }
            .into());
        }
        let order = traversal_order(&bones)?;

        let mut by_name = FxHashMap::default();
        for (index, bone) in bones.iter().enumerate() {
            let _ = by_name.entry(bone.name.clone()).or_insert(index);
        }

        log::debug!(
            "skeleton: {} bones, {} roots",
            bones.len(),
            bones.iter().filter(|b| b.is_root()).count()
        );

        Ok(Self {
            bones,
            bind_pose,
            order,
            by_name,
        })
    }

    /// Skeleton whose bind pose is the identity for every bone.
    pub fn with_identity_bind_pose(bones: Vec<Bone>) -> Result<Self, RigError> {
        let bind_pose = vec![Transform::IDENTITY; bones.len()];
        Self::new(bones, bind_pose)
    }

    /// Number of bones.
    #[inline]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// All bones, by index.
    #[inline]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Bone at `index`.
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// Model-space rest transforms, by bone index.
    #[inline]
    pub fn bind_pose(&self) -> &[Transform] {
        &self.bind_pose
    }

    /// Bone indices ordered so every parent precedes its children.
    #[inline]
    pub fn evaluation_order(&self) -> &[usize] {
        &self.order
    }

    /// Index of the first bone with the given name.
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Indices of root bones.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, bone)| bone.is_root())
            .map(|(index, _)| index)
    }
}

/// Breadth-first order from the roots, failing on dangling or cyclic
/// parent links.
fn traversal_order(bones: &[Bone]) -> Result<Vec<usize>, SkeletonError> {
    let bone_count = bones.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); bone_count];
    let mut order = Vec::with_capacity(bone_count);

    for (index, bone) in bones.iter().enumerate() {
        match bone.parent {
            Some(parent) if parent >= bone_count => {
                return Err(SkeletonError::ParentOutOfRange {
                    bone: index,
                    parent,
                    bone_count,
                });
            }
            Some(parent) => children[parent].push(index),
            None => order.push(index),
        }
    }

    let mut head = 0;
    while head < order.len() {
        let bone = order[head];
        head += 1;
        order.extend_from_slice(&children[bone]);
    }

    if order.len() < bone_count {
        let mut reached = vec![false; bone_count];
        for &bone in &order {
            reached[bone] = true;
        }
        let unreached = reached.iter().position(|r| !r).unwrap_or_default();
        return Err(SkeletonError::Cycle {
            bone: bone_on_cycle(bones, unreached),
        });
    }

    Ok(order)
}

/// Walk up from a bone that never reaches a root until the walk is
/// guaranteed to be inside the cycle.
fn bone_on_cycle(bones: &[Bone], start: usize) -> usize {
    let mut bone = start;
    for _ in 0..bones.len() {
        match bones[bone].parent {
            Some(parent) => bone = parent,
            None => break,
        }
    }
    bone
}
