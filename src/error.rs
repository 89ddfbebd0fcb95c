//! Crate-level error types.

use std::fmt;

/// Why a skeleton could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    /// A bone names a parent index past the end of the bone list.
    ParentOutOfRange {
        /// Offending bone.
        bone: usize,
        /// Parent index it refers to.
        parent: usize,
        /// Number of bones in the skeleton.
        bone_count: usize,
    },
    /// Following parent links from this bone never reaches a root.
    Cycle {
        /// A bone that lies on the cycle.
        bone: usize,
    },
    /// The bind pose does not hold one transform per bone.
    BindPoseLength {
        /// Number of bones.
        bones: usize,
        /// Number of bind pose transforms.
        transforms: usize,
    },
}

impl fmt::Display for SkeletonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentOutOfRange {
                bone,
                parent,
                bone_count,
            } => write!(
                f,
                "bone {bone} has parent {parent} but only {bone_count} bones \
                 exist"
            ),
            Self::Cycle { bone } => {
                write!(f, "bone {bone} is part of a parent cycle")
            }
            Self::BindPoseLength { bones, transforms } => write!(
                f,
                "bind pose has {transforms} transforms for {bones} bones"
            ),
        }
    }
}

/// First structural difference between an animation clip and a skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipMismatch {
    /// Bone counts differ.
    BoneCount {
        /// Bones in the skeleton.
        skeleton: usize,
        /// Bones in the clip.
        clip: usize,
    },
    /// Bone names differ at an index.
    BoneName {
        /// Bone index.
        index: usize,
        /// Name in the skeleton.
        expected: String,
        /// Name in the clip.
        found: String,
    },
    /// Parent links differ at an index.
    BoneParent {
        /// Bone index.
        index: usize,
        /// Parent in the skeleton.
        expected: Option<usize>,
        /// Parent in the clip.
        found: Option<usize>,
    },
    /// The clip has no frames.
    NoFrames,
}

impl fmt::Display for ClipMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoneCount { skeleton, clip } => write!(
                f,
                "clip has {clip} bones, skeleton has {skeleton}"
            ),
            Self::BoneName {
                index,
                expected,
                found,
            } => write!(
                f,
                "bone {index} is named '{found}', expected '{expected}'"
            ),
            Self::BoneParent {
                index,
                expected,
                found,
            } => write!(
                f,
                "bone {index} has parent {found:?}, expected {expected:?}"
            ),
            Self::NoFrames => write!(f, "clip has no frames"),
        }
    }
}

/// Errors produced by the camrig crate.
#[derive(Debug)]
pub enum RigError {
    /// Bone hierarchy or bind pose is malformed.
    InvalidSkeleton(SkeletonError),
    /// Animation clip data is internally inconsistent.
    InvalidClip(String),
    /// Animation clip does not fit the skeleton it is used with.
    ClipMismatch {
        /// Name of the rejected clip.
        clip: String,
        /// What differs.
        reason: ClipMismatch,
    },
    /// Skinned mesh vertex attributes are inconsistent.
    InvalidMesh(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSkeleton(e) => write!(f, "invalid skeleton: {e}"),
            Self::InvalidClip(msg) => write!(f, "invalid clip: {msg}"),
            Self::ClipMismatch { clip, reason } => {
                write!(f, "clip '{clip}' does not match skeleton: {reason}")
            }
            Self::InvalidMesh(msg) => write!(f, "invalid mesh: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for RigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SkeletonError> for RigError {
    fn from(e: SkeletonError) -> Self {
        Self::InvalidSkeleton(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_includes_details() {
        let err = RigError::ClipMismatch {
            clip: "walk".into(),
            reason: ClipMismatch::BoneCount {
                skeleton: 3,
                clip: 2,
            },
        };
        assert_eq!(
            err.to_string(),
            "clip 'walk' does not match skeleton: clip has 2 bones, \
             skeleton has 3"
        );
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = RigError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        let err = RigError::from(SkeletonError::Cycle { bone: 1 });
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "invalid skeleton: bone 1 is part of a parent cycle"
        );
    }
}
