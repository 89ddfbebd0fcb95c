//! Linear blend skinning: matrix palettes for the GPU and a CPU fallback.

use glam::{Mat4, Vec3};

use super::pose::Pose;
use super::skeleton::Skeleton;
use crate::error::RigError;

/// Bone influences stored per vertex.
pub const MAX_BONE_INFLUENCES: usize = 4;

/// One skinning matrix laid out for a GPU storage/uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoneMatrixUniform {
    /// Column-major `world * inverse_bind`.
    pub matrix: [[f32; 4]; 4],
}

impl From<Mat4> for BoneMatrixUniform {
    fn from(matrix: Mat4) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
        }
    }
}

/// Per-bone skinning matrices (`world * inverse_bind`).
#[derive(Debug, Clone)]
pub struct SkinPalette {
    inverse_bind: Vec<Mat4>,
    matrices: Vec<Mat4>,
}

impl SkinPalette {
    /// Palette for `skeleton`, initialised to identity (rest pose).
    #[must_use]
    pub fn from_bind_pose(skeleton: &Skeleton) -> Self {
        let inverse_bind: Vec<Mat4> = skeleton
            .bind_pose()
            .iter()
            .map(|bind| bind.to_matrix().inverse())
            .collect();
        let matrices = vec![Mat4::IDENTITY; inverse_bind.len()];
        Self {
            inverse_bind,
            matrices,
        }
    }

    /// Recompute the skinning matrices from an evaluated pose.
    ///
    /// Bones missing from `pose` keep their previous matrix.
    pub fn update(&mut self, pose: &Pose) {
        for ((matrix, inverse_bind), world) in self
            .matrices
            .iter_mut()
            .zip(&self.inverse_bind)
            .zip(pose.transforms())
        {
            *matrix = world.to_matrix() * *inverse_bind;
        }
    }

    /// Skinning matrices, by bone index.
    #[inline]
    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    /// Number of bones in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Whether the palette has no bones.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Skinning matrices ready for `bytemuck::cast_slice` upload.
    #[must_use]
    pub fn uniforms(&self) -> Vec<BoneMatrixUniform> {
        let mut out = Vec::with_capacity(self.matrices.len());
        self.write_uniforms(&mut out);
        out
    }

    /// Refill `out` with the skinning matrices, reusing its allocation.
    pub fn write_uniforms(&self, out: &mut Vec<BoneMatrixUniform>) {
        out.clear();
        out.extend(self.matrices.iter().copied().map(BoneMatrixUniform::from));
    }
}

/// Mesh deformed on the CPU by a [`SkinPalette`].
///
/// Keeps the bind-pose vertices and writes animated copies on every
/// [`apply`](Self::apply).
#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    bind_positions: Vec<Vec3>,
    bind_normals: Vec<Vec3>,
    bone_ids: Vec<[u16; MAX_BONE_INFLUENCES]>,
    bone_weights: Vec<[f32; MAX_BONE_INFLUENCES]>,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
}

impl SkinnedMesh {
    /// Mesh from bind-pose vertex attributes.
    ///
    /// `normals` may be empty; otherwise every attribute needs one entry per
    /// position, or [`RigError::InvalidMesh`] is returned.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        bone_ids: Vec<[u16; MAX_BONE_INFLUENCES]>,
        bone_weights: Vec<[f32; MAX_BONE_INFLUENCES]>,
    ) -> Result<Self, RigError> {
        let vertex_count = positions.len();
        if !normals.is_empty() && normals.len() != vertex_count {
            return Err(RigError::InvalidMesh(format!(
                "{} normals for {vertex_count} vertices",
                normals.len()
            )));
        }
        if bone_ids.len() != vertex_count {
            return Err(RigError::InvalidMesh(format!(
                "{} bone id sets for {vertex_count} vertices",
                bone_ids.len()
            )));
        }
        if bone_weights.len() != vertex_count {
            return Err(RigError::InvalidMesh(format!(
                "{} bone weight sets for {vertex_count} vertices",
                bone_weights.len()
            )));
        }
        Ok(Self {
            positions: positions.clone(),
            normals: normals.clone(),
            bind_positions: positions,
            bind_normals: normals,
            bone_ids,
            bone_weights,
        })
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.bind_positions.len()
    }

    /// Animated positions from the last [`apply`](Self::apply).
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Animated normals from the last [`apply`](Self::apply).
    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Restore the bind pose.
    pub fn reset(&mut self) {
        self.positions.copy_from_slice(&self.bind_positions);
        self.normals.copy_from_slice(&self.bind_normals);
    }

    /// Deform the bind-pose vertices by `palette`.
    ///
    /// Influences with a non-positive weight or a bone id outside the
    /// palette are skipped and the remaining weights are renormalized. A
    /// vertex with no usable influence keeps its bind position.
    pub fn apply(&mut self, palette: &SkinPalette) {
        let skin = palette.matrices();
        let influences = self.bone_ids.iter().zip(&self.bone_weights);
        for (vertex, (ids, weights)) in influences.enumerate() {
            let bind_position = self.bind_positions[vertex];
            let bind_normal = self.bind_normals.get(vertex).copied();
            let Some(blend) = blend_matrices(skin, ids, weights) else {
                self.positions[vertex] = bind_position;
                if let Some(normal) = bind_normal {
                    self.normals[vertex] = normal;
                }
                continue;
            };
            self.positions[vertex] = blend.transform_point3(bind_position);
            if let Some(normal) = bind_normal {
                self.normals[vertex] = blend
                    .transform_vector3(normal)
                    .try_normalize()
                    .unwrap_or(normal);
            }
        }
    }
}

/// Weighted average of the skin matrices influencing one vertex.
fn blend_matrices(
    skin: &[Mat4],
    ids: &[u16; MAX_BONE_INFLUENCES],
    weights: &[f32; MAX_BONE_INFLUENCES],
) -> Option<Mat4> {
    let mut sum = Mat4::ZERO;
    let mut total = 0.0;
    for (&id, &weight) in ids.iter().zip(weights) {
        if weight <= 0.0 {
            continue;
        }
        let Some(matrix) = skin.get(usize::from(id)) else {
            continue;
        };
        sum += *matrix * weight;
        total += weight;
    }
    (total > 0.0).then(|| sum * total.recip())
}
